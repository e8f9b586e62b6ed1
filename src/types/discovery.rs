//! The discovery ledger records.

use serde::{Deserialize, Serialize};

use super::{now_millis, Address, Timestamp};
use crate::crypto::{Hash, Hasher};

/// Sequential discovery identifier (first discovery is 1)
pub type DiscoveryId = u64;

/// Scalar weight of a discovery: complexity x significance x 100
#[must_use]
pub const fn research_value(complexity: u8, significance: u8) -> u64 {
    complexity as u64 * significance as u64 * 100
}

/// A recorded mathematical discovery.
///
/// Discoveries form an append-only chain: each commitment hashes the parent
/// commitment together with the discovery's scoring fields, and the chain
/// head lives in the security state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Discovery {
    /// Discovery id
    pub id: DiscoveryId,
    /// Who produced it
    pub researcher: Address,
    /// The work type it belongs to (0..=24)
    pub work_type: u8,
    /// Complexity score (1..=100)
    pub complexity: u8,
    /// Significance level (1..=10)
    pub significance: u8,
    /// complexity x significance x 100
    pub research_value: u64,
    /// When it was recorded (millis)
    pub submitted_at: Timestamp,
    /// Whether validator consensus has confirmed it
    pub validated: bool,
    /// Whether it came from an accepted proof (vs. direct submission)
    pub from_proof: bool,
    /// Number of validators that processed it
    pub validation_count: u32,
    /// Commitment of the previous discovery in the chain
    pub parent_commitment: Hash,
    /// This discovery's chain commitment
    pub commitment: Hash,
}

impl Discovery {
    /// Record a discovery, extending the integrity chain from `parent`.
    #[must_use]
    pub fn new(
        id: DiscoveryId,
        researcher: Address,
        work_type: u8,
        complexity: u8,
        significance: u8,
        from_proof: bool,
        parent_commitment: Hash,
    ) -> Self {
        let value = research_value(complexity, significance);
        let commitment = Self::commit(
            &parent_commitment,
            id,
            &researcher,
            work_type,
            complexity,
            significance,
            from_proof,
        );

        Self {
            id,
            researcher,
            work_type,
            complexity,
            significance,
            research_value: value,
            submitted_at: now_millis(),
            validated: false,
            from_proof,
            validation_count: 0,
            parent_commitment,
            commitment,
        }
    }

    /// Recompute this discovery's commitment from its stored fields.
    #[must_use]
    pub fn recompute_commitment(&self) -> Hash {
        Self::commit(
            &self.parent_commitment,
            self.id,
            &self.researcher,
            self.work_type,
            self.complexity,
            self.significance,
            self.from_proof,
        )
    }

    fn commit(
        parent: &Hash,
        id: DiscoveryId,
        researcher: &Address,
        work_type: u8,
        complexity: u8,
        significance: u8,
        from_proof: bool,
    ) -> Hash {
        let mut hasher = Hasher::new();
        hasher.update(parent.as_bytes());
        hasher.update(&id.to_le_bytes());
        hasher.update(researcher.as_bytes());
        hasher.update(&[work_type, complexity, significance, u8::from(from_proof)]);
        hasher.update(&research_value(complexity, significance).to_le_bytes());
        hasher.finalize()
    }
}
