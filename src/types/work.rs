//! The mathematical work-type registry.
//!
//! 25 problem domains are seeded at genesis. Each carries a base reward and
//! a difficulty multiplier derived from its hardness tier; both can be
//! retuned later through the owner-only update operation.

use serde::{Deserialize, Serialize};

use super::MintAmount;

/// Number of registered work types (ids 0..=24)
pub const WORK_TYPE_COUNT: u8 = 25;

/// Hardness tier of a work type.
///
/// The tier fixes the genesis economics: base rewards are expressed per
/// research-value unit, so even the lowest tier compounds into meaningful
/// payouts once multipliers apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Millennium-class open problems
    UltraExtreme,
    /// Longstanding open conjectures
    Extreme,
    /// Hard research problems
    High,
    /// Structured exploratory work
    Medium,
}

impl Tier {
    /// Genesis base reward for this tier, per research-value unit
    #[must_use]
    pub const fn base_reward(self) -> MintAmount {
        match self {
            Self::UltraExtreme => MintAmount::from_micro(100),
            Self::Extreme => MintAmount::from_micro(80),
            Self::High => MintAmount::from_micro(60),
            Self::Medium => MintAmount::from_micro(40),
        }
    }

    /// Genesis difficulty multiplier for this tier
    #[must_use]
    pub const fn difficulty_multiplier(self) -> u64 {
        match self {
            Self::UltraExtreme => 1000,
            Self::Extreme => 800,
            Self::High => 600,
            Self::Medium => 400,
        }
    }
}

/// A registered mathematical work type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkType {
    /// Registry id (0..=24)
    pub id: u8,
    /// Human-readable problem domain
    pub name: String,
    /// Hardness tier
    pub tier: Tier,
    /// Base token reward per research-value unit
    pub base_reward: MintAmount,
    /// Difficulty weighting used by miners when picking session difficulty
    pub difficulty_multiplier: u64,
    /// Whether sessions may target this work type
    pub active: bool,
}

impl WorkType {
    /// Create a work type with its tier's genesis economics
    #[must_use]
    pub fn new(id: u8, name: &str, tier: Tier) -> Self {
        Self {
            id,
            name: name.to_string(),
            tier,
            base_reward: tier.base_reward(),
            difficulty_multiplier: tier.difficulty_multiplier(),
            active: true,
        }
    }
}

/// The genesis catalog: 25 work types, ids 0..=24, all active.
#[must_use]
pub fn genesis_work_types() -> Vec<WorkType> {
    let catalog: [(&str, Tier); WORK_TYPE_COUNT as usize] = [
        ("Riemann Zeta Zeros", Tier::UltraExtreme),
        ("Goldbach Conjecture", Tier::Extreme),
        ("Birch-Swinnerton-Dyer", Tier::Extreme),
        ("Prime Pattern Discovery", Tier::High),
        ("Twin Prime Conjecture", Tier::Extreme),
        ("Collatz Trajectories", Tier::High),
        ("Perfect Number Search", Tier::Extreme),
        ("Mersenne Prime Search", Tier::UltraExtreme),
        ("Fibonacci Patterns", Tier::Medium),
        ("Pascal Triangle Structure", Tier::Medium),
        ("Differential Equation Systems", Tier::High),
        ("Computational Number Theory", Tier::High),
        ("Yang-Mills Mass Gap", Tier::UltraExtreme),
        ("Navier-Stokes Smoothness", Tier::UltraExtreme),
        ("Elliptic Curve Structure", Tier::High),
        ("Lattice Problems", Tier::UltraExtreme),
        ("Cryptographic Hash Analysis", Tier::High),
        ("Poincare Recurrence", Tier::UltraExtreme),
        ("Algebraic Topology", Tier::UltraExtreme),
        ("Euclidean Geometry", Tier::High),
        ("Quantum Circuit Optimization", Tier::UltraExtreme),
        ("Learning Theory Bounds", Tier::High),
        ("Blockchain Protocol Analysis", Tier::High),
        ("Distributed Consensus Bounds", Tier::High),
        ("Combinatorial Optimization", Tier::High),
    ];

    (0..WORK_TYPE_COUNT)
        .zip(catalog)
        .map(|(id, (name, tier))| WorkType::new(id, name, tier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_catalog_shape() {
        let types = genesis_work_types();

        assert_eq!(types.len(), WORK_TYPE_COUNT as usize);
        for (i, wt) in types.iter().enumerate() {
            assert_eq!(wt.id as usize, i);
            assert!(wt.active);
            assert!(!wt.base_reward.is_zero());
            assert!(wt.difficulty_multiplier > 0);
        }
    }

    #[test]
    fn test_tier_economics() {
        let types = genesis_work_types();

        // Riemann zeros sit in the top tier
        assert_eq!(types[0].tier, Tier::UltraExtreme);
        assert_eq!(types[0].base_reward, MintAmount::from_micro(100));
        assert_eq!(types[0].difficulty_multiplier, 1000);

        // Fibonacci patterns are the entry tier
        assert_eq!(types[8].tier, Tier::Medium);
        assert_eq!(types[8].base_reward, MintAmount::from_micro(40));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::UltraExtreme.base_reward() > Tier::Extreme.base_reward());
        assert!(Tier::Extreme.base_reward() > Tier::High.base_reward());
        assert!(Tier::High.base_reward() > Tier::Medium.base_reward());
    }
}
