//! Structured events describing successful state transitions.
//!
//! Events accumulate inside the engine and are handed over when the
//! caller drains them. They are a side effect of an accepted operation,
//! never part of its return contract, and failed operations emit none.

use serde::{Deserialize, Serialize};

use crate::ledger::PoolKind;
use crate::rewards::RewardSource;
use crate::types::{Address, DiscoveryId, MintAmount, ProofId, SessionId};

/// One state-transition event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A mining session was opened
    SessionStarted {
        /// New session id
        session: SessionId,
        /// Miner who opened it
        miner: Address,
        /// Work type being mined
        work_type: u8,
        /// Requested difficulty
        difficulty: u64,
        /// Derived proof target
        target: u128,
    },
    /// A proof was accepted and its session completed
    ProofSubmitted {
        /// New proof id
        proof: ProofId,
        /// The completed session
        session: SessionId,
        /// Miner who solved it
        miner: Address,
        /// Reward before burn
        gross: MintAmount,
        /// Amount destroyed
        burn: MintAmount,
        /// Amount credited to the miner
        net: MintAmount,
        /// Which path funded the reward
        source: RewardSource,
    },
    /// A discovery entered the ledger
    DiscoverySubmitted {
        /// New discovery id
        discovery: DiscoveryId,
        /// Submitting researcher
        researcher: Address,
        /// Work type the discovery belongs to
        work_type: u8,
        /// Derived research value
        research_value: u64,
        /// Whether it came out of an accepted proof
        from_proof: bool,
    },
    /// A discovery reached quorum
    DiscoveryValidated {
        /// The validated discovery
        discovery: DiscoveryId,
        /// Validators that processed it
        validations: u32,
    },
    /// A validator was paid for processing a discovery
    ValidatorRewarded {
        /// The paid validator
        validator: Address,
        /// Discovery that was processed
        discovery: DiscoveryId,
        /// Payment amount
        amount: MintAmount,
    },
    /// Tokens were destroyed
    TokensBurned {
        /// Amount removed from supply
        amount: MintAmount,
        /// Which reward path produced the burn
        source: RewardSource,
    },
    /// A pool balance changed
    PoolBalanceUpdated {
        /// The affected pool
        pool: PoolKind,
        /// Balance after the change
        balance: MintAmount,
    },
    /// Security posture moved
    SecurityScalingUpdated {
        /// Bit strength after the update
        bit_strength: u64,
        /// Cumulative complexity after the update
        cumulative_complexity: u64,
        /// Network health in effect
        network_health: u64,
        /// Scaling rate in effect
        scaling_rate: u64,
    },
    /// The mining pool could not fund a reward
    RewardPoolDepleted {
        /// Reward the schedule asked for
        requested: MintAmount,
        /// What the mining pool held
        available: MintAmount,
    },
}
