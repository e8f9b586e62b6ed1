//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::consensus::QuorumRule;
use crate::ledger::GenesisAllocation;
use crate::rewards::RewardSchedule;
use crate::types::{Address, MintAmount};

/// Full configuration for a ledger engine instance
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Administrative owner
    pub owner: Address,
    /// Genesis pool allocation
    pub allocation: GenesisAllocation,
    /// Reward multipliers and burn rates
    pub schedule: RewardSchedule,
    /// Highest accepted session difficulty
    pub max_difficulty: u64,
    /// Open-session cap per miner
    pub max_open_sessions: u32,
    /// Base emission when the mining pool cannot fund a reward
    pub base_emission: MintAmount,
    /// Hard cap on any single emission
    pub emission_cap: MintAmount,
    /// Flat payment per processed validation
    pub validator_reward: MintAmount,
    /// Validators seeded at genesis
    pub genesis_validators: Vec<(Address, MintAmount)>,
    /// Quorum rule for discovery validation
    pub quorum: QuorumRule,
    /// Bit strength before any discovery
    pub base_bit_strength: u64,
    /// Ceiling for bit strength and height projections
    pub max_bit_strength: u64,
    /// Initial raw network health reading
    pub initial_health: u8,
    /// Initial security scaling rate
    pub initial_scaling_rate: u32,
    /// Start with proof targets bypassed
    pub test_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let genesis_validators = (1..=5)
            .map(|i| (Address::from_low_u64(i), MintAmount::from_mint(1_000)))
            .collect();

        Self {
            owner: Address::from_low_u64(100),
            allocation: GenesisAllocation::default(),
            schedule: RewardSchedule::default(),
            max_difficulty: 50_000,
            max_open_sessions: 16,
            base_emission: MintAmount::from_mint(1_000),
            emission_cap: MintAmount::from_mint(1_500),
            validator_reward: MintAmount::from_mint(100),
            genesis_validators,
            quorum: QuorumRule::Unanimous,
            base_bit_strength: 256,
            max_bit_strength: 18_432,
            initial_health: 100,
            initial_scaling_rate: 100,
            test_mode: false,
        }
    }
}

impl EngineConfig {
    /// Validate internal consistency
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.allocation.is_balanced()
            && self.schedule.is_valid()
            && self.max_difficulty >= 1
            && self.max_open_sessions >= 1
            && self.base_emission <= self.emission_cap
            && self.base_bit_strength <= self.max_bit_strength
            && self.initial_health <= 100
            && self.initial_scaling_rate <= 100
    }
}
