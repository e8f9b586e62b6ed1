//! Validator records.

use serde::{Deserialize, Serialize};

use super::{now_millis, Address, MintAmount, Timestamp};

/// Reputation every validator starts with
pub const INITIAL_REPUTATION: u8 = 100;

/// A consensus validator.
///
/// Validator records are never removed from the registry; deactivation is
/// the only exit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Validator {
    /// Validator address
    pub address: Address,
    /// Bookkeeping stake backing this validator
    pub staked_amount: MintAmount,
    /// Total discoveries this validator has processed
    pub total_validations: u64,
    /// Reputation score, bumped on each validation
    pub reputation: u8,
    /// Whether the validator participates in consensus rounds
    pub active: bool,
    /// When the validator was registered (millis)
    pub registered_at: Timestamp,
}

impl Validator {
    /// Register a new active validator
    #[must_use]
    pub fn new(address: Address, staked_amount: MintAmount) -> Self {
        Self {
            address,
            staked_amount,
            total_validations: 0,
            reputation: INITIAL_REPUTATION,
            active: true,
            registered_at: now_millis(),
        }
    }

    /// Record one processed validation
    pub fn record_validation(&mut self) {
        self.total_validations += 1;
        self.reputation = self.reputation.saturating_add(1);
    }
}
