//! Reward computation for accepted proofs.
//!
//! The gross reward is `baseReward x complexityMultiplier x
//! significanceMultiplier x researchValue / 10000`; the burn is a
//! significance-scaled slice of whatever was sourced; and when the mining
//! pool cannot cover the gross the engine switches to a bounded asymptotic
//! emission instead of failing. All math is integer and truncating.

mod schedule;

pub use schedule::{RewardSchedule, SignificanceClass};

use serde::{Deserialize, Serialize};

use crate::types::{MintAmount, GENESIS_SUPPLY};

/// Where an accepted proof's payout came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardSource {
    /// Funded by the mining-rewards pool
    MiningPool,
    /// Funded by the asymptotic emission fallback
    AsymptoticEmission,
}

/// The full payout math for one accepted proof
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Pool-path gross computed from the tier tables
    pub requested: MintAmount,
    /// Amount actually sourced (equals `requested` on the pool path)
    pub gross: MintAmount,
    /// Portion destroyed
    pub burn: MintAmount,
    /// Portion credited to the miner
    pub net: MintAmount,
    /// Funding source
    pub source: RewardSource,
}

/// Gross reward for a scored proof. Saturates at `GENESIS_SUPPLY` if a
/// custom schedule overflows the multiplication chain.
#[must_use]
pub fn gross_reward(
    schedule: &RewardSchedule,
    base_reward: MintAmount,
    complexity: u8,
    significance: u8,
    research_value: u64,
) -> MintAmount {
    let complexity_multiplier = schedule.complexity_multiplier(complexity);
    let significance_multiplier = schedule.significance_multiplier(significance);

    base_reward
        .checked_mul(u128::from(complexity_multiplier))
        .and_then(|r| r.checked_mul(u128::from(significance_multiplier)))
        .and_then(|r| r.checked_mul(u128::from(research_value)))
        .and_then(|r| r.checked_div(10_000))
        .unwrap_or(MintAmount::from_raw(GENESIS_SUPPLY))
}

/// Asymptotic emission for a research value:
/// `baseEmission x (10000 + researchValue x 25 / 10000) / 10000`, capped.
#[must_use]
pub fn asymptotic_emission(
    base_emission: MintAmount,
    emission_cap: MintAmount,
    research_value: u64,
) -> MintAmount {
    let bump = u128::from(research_value) * 25 / 10_000;
    let factor = 10_000 + bump;

    let emission = base_emission
        .checked_mul(factor)
        .and_then(|e| e.checked_div(10_000))
        .unwrap_or(emission_cap);

    emission.min(emission_cap)
}

/// Decide the payout for an accepted proof given the current mining-pool
/// balance. Pool depletion is a funding decision here, never an error.
#[must_use]
pub fn reward_for(
    schedule: &RewardSchedule,
    base_reward: MintAmount,
    complexity: u8,
    significance: u8,
    research_value: u64,
    pool_available: MintAmount,
    base_emission: MintAmount,
    emission_cap: MintAmount,
) -> RewardBreakdown {
    let requested = gross_reward(schedule, base_reward, complexity, significance, research_value);
    let burn_bps = schedule.burn_rate_bps(significance);

    if pool_available >= requested {
        let burn = requested.basis_points(burn_bps);
        RewardBreakdown {
            requested,
            gross: requested,
            burn,
            net: requested.saturating_sub(burn),
            source: RewardSource::MiningPool,
        }
    } else {
        let emission = asymptotic_emission(base_emission, emission_cap, research_value);
        let burn = emission.basis_points(burn_bps);
        RewardBreakdown {
            requested,
            gross: emission,
            burn,
            net: emission.saturating_sub(burn),
            source: RewardSource::AsymptoticEmission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ONE_MINT;

    fn base() -> MintAmount {
        // top-tier catalog base reward
        MintAmount::from_micro(100)
    }

    #[test]
    fn test_millennium_gross() {
        // complexity 95 (10x), significance 10 (25x), research value 95000
        let gross = gross_reward(&RewardSchedule::default(), base(), 95, 10, 95_000);

        // 1e14 * 1000 * 2500 * 95000 / 10000 = 2375 MINT
        assert_eq!(gross, MintAmount::from_mint(2375));
    }

    #[test]
    fn test_minimal_gross() {
        // complexity 1 (1x), significance 2 (1x), research value 200
        let gross = gross_reward(&RewardSchedule::default(), base(), 1, 2, 200);

        // 1e14 * 100 * 100 * 200 / 10000 = 0.02 MINT
        assert_eq!(gross.raw(), ONE_MINT / 50);
    }

    #[test]
    fn test_pool_path_breakdown() {
        let breakdown = reward_for(
            &RewardSchedule::default(),
            base(),
            95,
            10,
            95_000,
            MintAmount::from_mint(100_000_000),
            MintAmount::from_mint(1000),
            MintAmount::from_mint(1500),
        );

        assert_eq!(breakdown.source, RewardSource::MiningPool);
        assert_eq!(breakdown.requested, MintAmount::from_mint(2375));
        assert_eq!(breakdown.gross, breakdown.requested);
        // 25% millennium burn
        assert_eq!(breakdown.burn.raw(), MintAmount::from_mint(2375).raw() / 4);
        assert_eq!(breakdown.net, breakdown.gross - breakdown.burn);
    }

    #[test]
    fn test_emission_path_breakdown() {
        let breakdown = reward_for(
            &RewardSchedule::default(),
            base(),
            95,
            10,
            95_000,
            MintAmount::from_mint(10),
            MintAmount::from_mint(1000),
            MintAmount::from_mint(1500),
        );

        assert_eq!(breakdown.source, RewardSource::AsymptoticEmission);
        // 1000 * (10000 + 95000*25/10000) / 10000 = 1023.7 MINT
        assert_eq!(breakdown.gross.raw(), 1_023_700_000_000_000_000_000);
        assert_eq!(breakdown.burn, breakdown.gross.basis_points(2500));
        assert_eq!(breakdown.net, breakdown.gross - breakdown.burn);
        // the pool-path number is preserved for observability
        assert_eq!(breakdown.requested, MintAmount::from_mint(2375));
    }

    #[test]
    fn test_emission_cap() {
        let emission = asymptotic_emission(
            MintAmount::from_mint(1000),
            MintAmount::from_mint(1010),
            100_000,
        );
        assert_eq!(emission, MintAmount::from_mint(1010));

        // under the cap the formula applies untouched
        let emission = asymptotic_emission(
            MintAmount::from_mint(1000),
            MintAmount::from_mint(1500),
            100_000,
        );
        assert_eq!(emission, MintAmount::from_mint(1025));
    }

    #[test]
    fn test_emission_grows_with_research_value() {
        let cap = MintAmount::from_mint(1500);
        let base_emission = MintAmount::from_mint(1000);

        let small = asymptotic_emission(base_emission, cap, 400);
        let large = asymptotic_emission(base_emission, cap, 95_000);

        assert!(small >= base_emission);
        assert!(large > small);
    }

    #[test]
    fn test_truncating_division() {
        // research value 399: 399*25/10000 truncates to 0, so no bump
        let emission = asymptotic_emission(
            MintAmount::from_mint(1000),
            MintAmount::from_mint(1500),
            399,
        );
        assert_eq!(emission, MintAmount::from_mint(1000));
    }
}
