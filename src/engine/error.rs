//! Engine failure taxonomy.

use serde::{Deserialize, Serialize};

use crate::consensus::ConsensusError;
use crate::ledger::LedgerError;
use crate::types::{DiscoveryId, SessionId};

/// Broad classification of an engine failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The input itself is malformed or out of range
    Validation,
    /// The input is well formed but incompatible with current state
    StateConflict,
    /// The operation is blocked by administrative controls
    Administrative,
}

/// Any failure of an engine operation.
///
/// A failed operation leaves the engine unchanged. Pool depletion is not
/// represented here at all: reward payouts that the mining pool cannot
/// fund fall back to emission, and validator payments that the staking
/// pool cannot fund are skipped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Work type id outside the registry, or deactivated
    #[error("work type {work_type} unknown or inactive")]
    InvalidWorkType {
        /// The rejected id
        work_type: u8,
    },
    /// Difficulty outside the accepted range
    #[error("difficulty {difficulty} outside 1..={max}")]
    InvalidDifficulty {
        /// Requested difficulty
        difficulty: u64,
        /// Configured ceiling
        max: u64,
    },
    /// Complexity outside 1..=100
    #[error("complexity {complexity} outside 1..=100")]
    InvalidComplexity {
        /// Rejected value
        complexity: u8,
    },
    /// Significance outside 1..=10
    #[error("significance {significance} outside 1..=10")]
    InvalidSignificance {
        /// Rejected value
        significance: u8,
    },
    /// A parameter update with an out-of-range value
    #[error("invalid value for {name}")]
    InvalidParameter {
        /// Which parameter was rejected
        name: &'static str,
    },
    /// Proof digest does not meet the session target
    #[error("proof digest {digest:#034x} above target {target:#034x}")]
    HashAboveTarget {
        /// Digest computed for the submitted nonce
        digest: u128,
        /// Target the session requires
        target: u128,
    },
    /// No session with this id
    #[error("session {session} not found")]
    SessionNotFound {
        /// The missing id
        session: SessionId,
    },
    /// Session belongs to a different miner
    #[error("session {session} belongs to another miner")]
    NotSessionOwner {
        /// The contested session
        session: SessionId,
    },
    /// Session already consumed by an accepted proof
    #[error("session {session} already completed")]
    SessionAlreadyCompleted {
        /// The completed session
        session: SessionId,
    },
    /// Miner is at the open-session cap
    #[error("miner has {open} open sessions, limit {limit}")]
    TooManySessions {
        /// Currently open sessions
        open: u32,
        /// Configured cap
        limit: u32,
    },
    /// No discovery with this id
    #[error("discovery {discovery} not found")]
    DiscoveryNotFound {
        /// The missing id
        discovery: DiscoveryId,
    },
    /// The engine is paused
    #[error("engine is paused")]
    Paused,
    /// Caller lacks owner rights
    #[error("caller is not the owner")]
    NotOwner,
    /// Balance or stake bookkeeping rejected the operation
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// Validator registry rejected the operation
    #[error(transparent)]
    Consensus(#[from] ConsensusError),
}

impl EngineError {
    /// Classify this failure
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidWorkType { .. }
            | Self::InvalidDifficulty { .. }
            | Self::InvalidComplexity { .. }
            | Self::InvalidSignificance { .. }
            | Self::InvalidParameter { .. }
            | Self::HashAboveTarget { .. } => FailureKind::Validation,
            Self::SessionNotFound { .. }
            | Self::NotSessionOwner { .. }
            | Self::SessionAlreadyCompleted { .. }
            | Self::TooManySessions { .. }
            | Self::DiscoveryNotFound { .. }
            | Self::Ledger(_)
            | Self::Consensus(_) => FailureKind::StateConflict,
            Self::Paused | Self::NotOwner => FailureKind::Administrative,
        }
    }
}

/// Snapshot encode or decode failure
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct SnapshotError(#[from] bincode::Error);
