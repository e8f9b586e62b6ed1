//! Proof-of-work digests and difficulty targets.
//!
//! A proof digest is the first 128 bits of Keccak-256 over
//! (session id, miner address, nonce). A session at difficulty `d` accepts a
//! digest iff it is at most `MAX_TARGET / d`, so difficulty 1 accepts every
//! nonce and expected search time grows linearly with difficulty.

use sha3::{Digest, Keccak256};

use crate::types::{Address, SessionId};

/// The widest possible hash target (difficulty 1)
pub const MAX_TARGET: u128 = u128::MAX;

/// Compute the 128-bit proof digest for a session attempt.
#[must_use]
pub fn proof_digest(session: SessionId, miner: &Address, nonce: u64) -> u128 {
    let mut hasher = Keccak256::new();
    hasher.update(session.to_le_bytes());
    hasher.update(miner.as_bytes());
    hasher.update(nonce.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(bytes)
}

/// Hash target for a difficulty. Difficulty below 1 is clamped to 1.
#[must_use]
pub const fn target_for(difficulty: u64) -> u128 {
    if difficulty == 0 {
        MAX_TARGET
    } else {
        MAX_TARGET / difficulty as u128
    }
}

/// Whether a digest satisfies a target
#[must_use]
pub const fn meets_target(digest: u128, target: u128) -> bool {
    digest <= target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miner() -> Address {
        Address::from_low_u64(0xa11ce)
    }

    #[test]
    fn test_digest_deterministic() {
        let a = proof_digest(1, &miner(), 42);
        let b = proof_digest(1, &miner(), 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_varies_with_inputs() {
        let base = proof_digest(1, &miner(), 42);
        assert_ne!(base, proof_digest(2, &miner(), 42));
        assert_ne!(base, proof_digest(1, &miner(), 43));
        assert_ne!(base, proof_digest(1, &Address::from_low_u64(0xb0b), 42));
    }

    #[test]
    fn test_target_shrinks_with_difficulty() {
        assert_eq!(target_for(1), MAX_TARGET);
        assert!(target_for(2) < target_for(1));
        assert!(target_for(1000) < target_for(100));
        assert_eq!(target_for(0), MAX_TARGET);
    }

    #[test]
    fn test_difficulty_one_accepts_everything() {
        let target = target_for(1);
        for nonce in 0..50 {
            assert!(meets_target(proof_digest(9, &miner(), nonce), target));
        }
    }

    #[test]
    fn test_search_finds_nonce_at_moderate_difficulty() {
        let target = target_for(1000);
        let found = (0..200_000).find(|&n| meets_target(proof_digest(3, &miner(), n), target));
        assert!(found.is_some());
    }
}
