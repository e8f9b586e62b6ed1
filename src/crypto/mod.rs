//! Hashing primitives for the ledger engine.
//!
//! - Keccak-256 derives the 128-bit proof-of-work digest
//! - BLAKE3 chains discovery commitments

mod hash;
mod pow;

pub use hash::{Hash, Hasher};
pub use pow::{meets_target, proof_digest, target_for, MAX_TARGET};

use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Clone, Error)]
pub enum CryptoError {
    /// Invalid hash format
    #[error("invalid hash: {0}")]
    InvalidHash(String),
}
