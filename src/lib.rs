//! # ProofMint
//!
//! A deterministic token-ledger engine for proof-of-mathematical-work.
//!
//! ## Architecture
//!
//! Every state change flows through three stages:
//! - **Mining**: sessions bind a miner to a work type and a hash target
//! - **Verification**: proofs are re-derived from scratch, scored, and paid
//! - **Consensus**: validators process each discovery and extend the chain
//!
//! ## Economic Model
//!
//! - 1 billion MINT genesis supply split across seven pools
//! - Significance-tiered burn on every payout
//! - Asymptotic emission once the mining pool runs dry
//! - Supply conservation identities checkable after every transition

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rust_2018_idioms
)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod crypto;
pub mod types;
pub mod consensus;
pub mod rewards;
pub mod ledger;
pub mod security;
pub mod engine;

pub use types::{
    Address, Discovery, MiningSession, MintAmount, ProofResult,
    Validator, WorkType,
};
pub use crypto::Hash;
pub use consensus::{QuorumRule, ValidatorSet};
pub use rewards::{RewardSchedule, RewardSource};
pub use ledger::{GenesisAllocation, PoolKind, SupplyStats};
pub use security::SecurityState;
pub use engine::{
    EngineConfig, EngineError, EngineEvent, FailureKind, IntegrityReport, LedgerEngine,
};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Proof scoring bounds
pub mod scores {
    /// Highest complexity score a proof may claim
    pub const MAX_COMPLEXITY: u8 = 100;
    /// Highest significance level a proof may claim
    pub const MAX_SIGNIFICANCE: u8 = 10;
    /// Multiplier folding the two scores into a research value
    pub const VALUE_SCALE: u64 = 100;
}
