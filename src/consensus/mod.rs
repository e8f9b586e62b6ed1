//! Validator registry and quorum policy.
//!
//! Consensus is synchronous: every discovery is processed by the full
//! active validator set inside the same state transition that created it.
//! The quorum rule deciding when a discovery counts as validated is
//! configuration, so partial participation can be exercised directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Address, MintAmount, Validator};

/// When a discovery counts as validated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuorumRule {
    /// Every active validator must process the discovery
    Unanimous,
    /// More than half of the active validators
    Majority,
    /// Approving stake must reach a basis-point share of active stake
    StakeWeighted {
        /// Required share of active stake, basis points
        threshold_bps: u32,
    },
}

impl QuorumRule {
    /// Evaluate the rule for one round.
    ///
    /// A round with no active validators never reaches quorum.
    #[must_use]
    pub fn met(
        &self,
        approvals: u32,
        active: u32,
        approving_stake: MintAmount,
        active_stake: MintAmount,
    ) -> bool {
        if active == 0 {
            return false;
        }

        match self {
            Self::Unanimous => approvals >= active,
            Self::Majority => u64::from(approvals) * 2 > u64::from(active),
            Self::StakeWeighted { threshold_bps } => {
                if active_stake.is_zero() {
                    return false;
                }
                approving_stake.raw() * 10_000 >= active_stake.raw() * u128::from(*threshold_bps)
            }
        }
    }
}

/// The validator registry. Records are never removed, only deactivated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidatorSet {
    validators: HashMap<Address, Validator>,
}

impl ValidatorSet {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the genesis validators
    #[must_use]
    pub fn genesis(entries: &[(Address, MintAmount)]) -> Self {
        let validators = entries
            .iter()
            .map(|(address, stake)| (*address, Validator::new(*address, *stake)))
            .collect();

        Self { validators }
    }

    /// Register a new validator
    ///
    /// # Errors
    /// Returns error if the address is already registered
    pub fn register(&mut self, address: Address, stake: MintAmount) -> Result<(), ConsensusError> {
        if self.validators.contains_key(&address) {
            return Err(ConsensusError::DuplicateValidator { address });
        }

        self.validators.insert(address, Validator::new(address, stake));
        Ok(())
    }

    /// Deactivate a validator. The record stays in the registry.
    ///
    /// # Errors
    /// Returns error if the address is unknown
    pub fn deactivate(&mut self, address: &Address) -> Result<(), ConsensusError> {
        let validator = self
            .validators
            .get_mut(address)
            .ok_or(ConsensusError::ValidatorNotFound { address: *address })?;

        validator.active = false;
        Ok(())
    }

    /// Record one processed validation for a validator
    ///
    /// # Errors
    /// Returns error if the address is unknown
    pub fn record_validation(&mut self, address: &Address) -> Result<(), ConsensusError> {
        let validator = self
            .validators
            .get_mut(address)
            .ok_or(ConsensusError::ValidatorNotFound { address: *address })?;

        validator.record_validation();
        Ok(())
    }

    /// Look up a validator
    #[must_use]
    pub fn get(&self, address: &Address) -> Option<&Validator> {
        self.validators.get(address)
    }

    /// Active validator addresses, sorted for deterministic processing
    #[must_use]
    pub fn active_addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<Address> = self
            .validators
            .values()
            .filter(|v| v.active)
            .map(|v| v.address)
            .collect();
        addresses.sort_unstable();
        addresses
    }

    /// Number of active validators
    #[must_use]
    pub fn active_count(&self) -> u32 {
        let count = self.validators.values().filter(|v| v.active).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Total stake behind active validators
    #[must_use]
    pub fn active_stake(&self) -> MintAmount {
        self.validators
            .values()
            .filter(|v| v.active)
            .fold(MintAmount::ZERO, |acc, v| {
                acc.saturating_add(v.staked_amount)
            })
    }

    /// All validators, sorted by address
    #[must_use]
    pub fn all(&self) -> Vec<&Validator> {
        let mut all: Vec<&Validator> = self.validators.values().collect();
        all.sort_unstable_by_key(|v| v.address);
        all
    }

    /// Total number of registered validators
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Consensus errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConsensusError {
    /// Address already registered
    #[error("validator {address} already registered")]
    DuplicateValidator {
        /// The conflicting address
        address: Address,
    },
    /// Address not in the registry
    #[error("validator {address} not found")]
    ValidatorNotFound {
        /// The missing address
        address: Address,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genesis_set(n: u64) -> ValidatorSet {
        let entries: Vec<(Address, MintAmount)> = (1..=n)
            .map(|i| (Address::from_low_u64(i), MintAmount::from_mint(1000)))
            .collect();
        ValidatorSet::genesis(&entries)
    }

    #[test]
    fn test_genesis_registry() {
        let set = genesis_set(5);

        assert_eq!(set.len(), 5);
        assert_eq!(set.active_count(), 5);
        assert_eq!(set.active_stake(), MintAmount::from_mint(5000));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut set = genesis_set(5);

        let result = set.register(Address::from_low_u64(3), MintAmount::from_mint(1000));
        assert!(matches!(
            result,
            Err(ConsensusError::DuplicateValidator { .. })
        ));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_deactivation_keeps_record() {
        let mut set = genesis_set(5);
        let third = Address::from_low_u64(3);

        set.deactivate(&third).unwrap();

        assert_eq!(set.active_count(), 4);
        assert_eq!(set.len(), 5);
        assert!(!set.get(&third).unwrap().active);
        assert!(!set.active_addresses().contains(&third));
    }

    #[test]
    fn test_active_addresses_sorted() {
        let set = genesis_set(5);
        let addresses = set.active_addresses();

        let mut sorted = addresses.clone();
        sorted.sort_unstable();
        assert_eq!(addresses, sorted);
    }

    #[test]
    fn test_unanimous_quorum() {
        let rule = QuorumRule::Unanimous;
        let stake = MintAmount::from_mint(1000);

        assert!(rule.met(5, 5, stake, stake));
        assert!(!rule.met(4, 5, stake, stake));
        assert!(!rule.met(0, 0, stake, stake));
    }

    #[test]
    fn test_majority_quorum() {
        let rule = QuorumRule::Majority;
        let stake = MintAmount::from_mint(1000);

        assert!(rule.met(3, 5, stake, stake));
        assert!(!rule.met(2, 5, stake, stake));
        assert!(rule.met(2, 3, stake, stake));
    }

    #[test]
    fn test_stake_weighted_quorum() {
        let rule = QuorumRule::StakeWeighted { threshold_bps: 6600 };
        let total = MintAmount::from_mint(1000);

        assert!(rule.met(1, 3, MintAmount::from_mint(800), total));
        assert!(!rule.met(2, 3, MintAmount::from_mint(200), total));
        // exactly at the threshold counts
        assert!(rule.met(2, 3, MintAmount::from_mint(660), total));
    }
}
