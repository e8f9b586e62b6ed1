//! Accepted proof-of-work results.

use serde::{Deserialize, Serialize};

use super::SessionId;

/// Sequential proof-result identifier (first result is 1)
pub type ProofId = u64;

/// The record of an accepted proof submission.
///
/// Only proofs that survive the full verification sequence are stored, so
/// `valid` is true for every persisted result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProofResult {
    /// Result id
    pub id: ProofId,
    /// Session the proof completed
    pub session_id: SessionId,
    /// Winning nonce
    pub nonce: u64,
    /// The 128-bit proof digest recomputed by the engine
    pub hash_value: u128,
    /// Claimed complexity score (1..=100)
    pub complexity: u8,
    /// Claimed significance level (1..=10)
    pub significance: u8,
    /// Whether the proof passed verification
    pub valid: bool,
}

impl ProofResult {
    /// Record an accepted proof
    #[must_use]
    pub const fn new(
        id: ProofId,
        session_id: SessionId,
        nonce: u64,
        hash_value: u128,
        complexity: u8,
        significance: u8,
    ) -> Self {
        Self {
            id,
            session_id,
            nonce,
            hash_value,
            complexity,
            significance,
            valid: true,
        }
    }
}
