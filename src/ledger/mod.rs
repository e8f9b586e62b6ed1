//! Pool and balance accounting.
//!
//! Seven named pools plus externally-held balances and stake records. Two
//! identities hold after every operation:
//!
//! - `initial_supply + cumulative_emission == total_supply + cumulative_burn`
//! - `total_supply == sum(pools) + sum(external balances)`
//!
//! Every debit is checked; a failed operation leaves the ledger untouched.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Address, MintAmount};

/// The seven named pools
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    /// Funds proof rewards
    MiningRewards,
    /// Backs stakes and validator payments
    Staking,
    /// Reserved for governance incentives
    Governance,
    /// Reserved for research-access grants
    ResearchAccess,
    /// Reserved for fee rebates
    TransactionFee,
    /// Protocol treasury
    Treasury,
    /// Reserved validator incentive buffer
    ValidatorReward,
}

impl PoolKind {
    /// All pools, in allocation order
    pub const ALL: [Self; 7] = [
        Self::MiningRewards,
        Self::Staking,
        Self::Governance,
        Self::ResearchAccess,
        Self::TransactionFee,
        Self::Treasury,
        Self::ValidatorReward,
    ];

    /// Stable lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MiningRewards => "mining_rewards",
            Self::Staking => "staking",
            Self::Governance => "governance",
            Self::ResearchAccess => "research_access",
            Self::TransactionFee => "transaction_fee",
            Self::Treasury => "treasury",
            Self::ValidatorReward => "validator_reward",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Genesis pool split. Must sum exactly to `initial_supply`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenesisAllocation {
    /// Total supply minted at genesis
    pub initial_supply: MintAmount,
    /// Mining-rewards pool
    pub mining_rewards: MintAmount,
    /// Staking pool
    pub staking: MintAmount,
    /// Governance pool
    pub governance: MintAmount,
    /// Research-access pool
    pub research_access: MintAmount,
    /// Transaction-fee pool
    pub transaction_fee: MintAmount,
    /// Treasury pool
    pub treasury: MintAmount,
    /// Validator-reward pool
    pub validator_reward: MintAmount,
}

impl Default for GenesisAllocation {
    fn default() -> Self {
        Self {
            initial_supply: MintAmount::from_mint(1_000_000_000),
            mining_rewards: MintAmount::from_mint(100_000_000),
            staking: MintAmount::from_mint(200_000_000),
            governance: MintAmount::from_mint(50_000_000),
            research_access: MintAmount::from_mint(100_000_000),
            transaction_fee: MintAmount::from_mint(50_000_000),
            treasury: MintAmount::from_mint(450_000_000),
            validator_reward: MintAmount::from_mint(50_000_000),
        }
    }
}

impl GenesisAllocation {
    /// Whether the pool split sums exactly to the initial supply
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let sum = self
            .mining_rewards
            .checked_add(self.staking)
            .and_then(|s| s.checked_add(self.governance))
            .and_then(|s| s.checked_add(self.research_access))
            .and_then(|s| s.checked_add(self.transaction_fee))
            .and_then(|s| s.checked_add(self.treasury))
            .and_then(|s| s.checked_add(self.validator_reward));

        sum == Some(self.initial_supply)
    }
}

/// Supply statistics snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SupplyStats {
    /// Supply minted at genesis
    pub initial_supply: MintAmount,
    /// Current total supply
    pub total_supply: MintAmount,
    /// Sum of the seven pools
    pub pools_total: MintAmount,
    /// Sum of externally-held balances
    pub external_total: MintAmount,
    /// Sum of all stake records
    pub total_staked: MintAmount,
    /// Tokens destroyed since genesis
    pub cumulative_burn: MintAmount,
    /// Tokens emitted via the asymptotic fallback
    pub cumulative_emission: MintAmount,
}

/// The pool ledger: all token accounting lives here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolLedger {
    initial_supply: MintAmount,
    total_supply: MintAmount,
    mining_rewards: MintAmount,
    staking: MintAmount,
    governance: MintAmount,
    research_access: MintAmount,
    transaction_fee: MintAmount,
    treasury: MintAmount,
    validator_reward: MintAmount,
    balances: HashMap<Address, MintAmount>,
    stakes: HashMap<Address, MintAmount>,
    cumulative_burn: MintAmount,
    cumulative_emission: MintAmount,
}

impl PoolLedger {
    /// Open a ledger from a genesis allocation
    #[must_use]
    pub fn new(alloc: &GenesisAllocation) -> Self {
        assert!(
            alloc.is_balanced(),
            "Genesis pools must sum to the initial supply"
        );
        Self {
            initial_supply: alloc.initial_supply,
            total_supply: alloc.initial_supply,
            mining_rewards: alloc.mining_rewards,
            staking: alloc.staking,
            governance: alloc.governance,
            research_access: alloc.research_access,
            transaction_fee: alloc.transaction_fee,
            treasury: alloc.treasury,
            validator_reward: alloc.validator_reward,
            balances: HashMap::new(),
            stakes: HashMap::new(),
            cumulative_burn: MintAmount::ZERO,
            cumulative_emission: MintAmount::ZERO,
        }
    }

    fn pool_mut(&mut self, kind: PoolKind) -> &mut MintAmount {
        match kind {
            PoolKind::MiningRewards => &mut self.mining_rewards,
            PoolKind::Staking => &mut self.staking,
            PoolKind::Governance => &mut self.governance,
            PoolKind::ResearchAccess => &mut self.research_access,
            PoolKind::TransactionFee => &mut self.transaction_fee,
            PoolKind::Treasury => &mut self.treasury,
            PoolKind::ValidatorReward => &mut self.validator_reward,
        }
    }

    /// Current balance of a pool
    #[must_use]
    pub const fn pool_balance(&self, kind: PoolKind) -> MintAmount {
        match kind {
            PoolKind::MiningRewards => self.mining_rewards,
            PoolKind::Staking => self.staking,
            PoolKind::Governance => self.governance,
            PoolKind::ResearchAccess => self.research_access,
            PoolKind::TransactionFee => self.transaction_fee,
            PoolKind::Treasury => self.treasury,
            PoolKind::ValidatorReward => self.validator_reward,
        }
    }

    /// Debit a pool
    ///
    /// # Errors
    /// Returns error if the pool holds less than `amount`
    pub fn debit_pool(&mut self, kind: PoolKind, amount: MintAmount) -> Result<(), LedgerError> {
        let pool = self.pool_mut(kind);
        if *pool < amount {
            return Err(LedgerError::InsufficientPool {
                pool: kind,
                have: *pool,
                need: amount,
            });
        }

        *pool = pool.saturating_sub(amount);
        Ok(())
    }

    /// Credit a pool
    pub fn credit_pool(&mut self, kind: PoolKind, amount: MintAmount) {
        let pool = self.pool_mut(kind);
        *pool = pool.saturating_add(amount);
    }

    /// External balance of an account
    #[must_use]
    pub fn balance_of(&self, address: &Address) -> MintAmount {
        self.balances
            .get(address)
            .copied()
            .unwrap_or(MintAmount::ZERO)
    }

    /// Staked amount of an account
    #[must_use]
    pub fn staked_of(&self, address: &Address) -> MintAmount {
        self.stakes
            .get(address)
            .copied()
            .unwrap_or(MintAmount::ZERO)
    }

    /// Credit an external balance
    pub fn credit(&mut self, address: Address, amount: MintAmount) {
        let balance = self.balances.entry(address).or_insert(MintAmount::ZERO);
        *balance = balance.saturating_add(amount);
    }

    /// Debit an external balance
    ///
    /// # Errors
    /// Returns error if the account holds less than `amount`
    pub fn debit(&mut self, address: &Address, amount: MintAmount) -> Result<(), LedgerError> {
        let have = self.balance_of(address);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }

        if let Some(balance) = self.balances.get_mut(address) {
            *balance = balance.saturating_sub(amount);
        }
        Ok(())
    }

    /// Move tokens from a pool to an external account
    ///
    /// # Errors
    /// Returns error if the pool holds less than `amount`
    pub fn pool_to_account(
        &mut self,
        kind: PoolKind,
        address: Address,
        amount: MintAmount,
    ) -> Result<(), LedgerError> {
        self.debit_pool(kind, amount)?;
        self.credit(address, amount);
        Ok(())
    }

    /// Destroy tokens held by a pool: the pool and the total supply both
    /// shrink, and the cumulative burn grows.
    ///
    /// # Errors
    /// Returns error if the pool holds less than `amount`
    pub fn burn_from_pool(&mut self, kind: PoolKind, amount: MintAmount) -> Result<(), LedgerError> {
        self.debit_pool(kind, amount)?;
        self.total_supply = self.total_supply.saturating_sub(amount);
        self.cumulative_burn = self.cumulative_burn.saturating_add(amount);
        Ok(())
    }

    /// Apply an asymptotic emission: `emission` new tokens enter the supply,
    /// `burn` of them are destroyed immediately, and the remainder lands in
    /// the recipient's balance.
    pub fn emit(&mut self, recipient: Address, emission: MintAmount, burn: MintAmount) {
        let net = emission.saturating_sub(burn);

        self.total_supply = self.total_supply.saturating_add(emission).saturating_sub(burn);
        self.cumulative_emission = self.cumulative_emission.saturating_add(emission);
        self.cumulative_burn = self.cumulative_burn.saturating_add(burn);
        self.credit(recipient, net);
    }

    /// Move balance into the staking pool and record the stake
    ///
    /// # Errors
    /// Returns error if the account balance is insufficient
    pub fn stake(&mut self, address: Address, amount: MintAmount) -> Result<(), LedgerError> {
        self.debit(&address, amount)?;

        let stake = self.stakes.entry(address).or_insert(MintAmount::ZERO);
        *stake = stake.saturating_add(amount);
        self.staking = self.staking.saturating_add(amount);
        Ok(())
    }

    /// Release a stake back to the account balance
    ///
    /// # Errors
    /// Returns error if the account has staked less than `amount`, or if
    /// validator payouts have drained the staking pool below it
    pub fn unstake(&mut self, address: &Address, amount: MintAmount) -> Result<(), LedgerError> {
        let staked = self.staked_of(address);
        if staked < amount {
            return Err(LedgerError::InsufficientStake {
                have: staked,
                need: amount,
            });
        }

        self.debit_pool(PoolKind::Staking, amount)?;
        if let Some(stake) = self.stakes.get_mut(address) {
            *stake = stake.saturating_sub(amount);
        }
        self.credit(*address, amount);
        Ok(())
    }

    /// Current total supply
    #[must_use]
    pub const fn total_supply(&self) -> MintAmount {
        self.total_supply
    }

    /// Supply minted at genesis
    #[must_use]
    pub const fn initial_supply(&self) -> MintAmount {
        self.initial_supply
    }

    /// Tokens destroyed since genesis
    #[must_use]
    pub const fn cumulative_burn(&self) -> MintAmount {
        self.cumulative_burn
    }

    /// Tokens emitted via the asymptotic fallback
    #[must_use]
    pub const fn cumulative_emission(&self) -> MintAmount {
        self.cumulative_emission
    }

    /// Sum of the seven pools
    #[must_use]
    pub fn pools_total(&self) -> MintAmount {
        PoolKind::ALL
            .iter()
            .fold(MintAmount::ZERO, |acc, kind| {
                acc.saturating_add(self.pool_balance(*kind))
            })
    }

    /// Sum of all external balances
    #[must_use]
    pub fn external_total(&self) -> MintAmount {
        self.balances
            .values()
            .fold(MintAmount::ZERO, |acc, b| acc.saturating_add(*b))
    }

    /// Sum of all stake records
    #[must_use]
    pub fn total_staked(&self) -> MintAmount {
        self.stakes
            .values()
            .fold(MintAmount::ZERO, |acc, s| acc.saturating_add(*s))
    }

    /// Check both conservation identities
    #[must_use]
    pub fn conservation_holds(&self) -> bool {
        let sources = self.initial_supply.checked_add(self.cumulative_emission);
        let sinks = self.total_supply.checked_add(self.cumulative_burn);
        let held = self.pools_total().checked_add(self.external_total());

        sources == sinks && held == Some(self.total_supply)
    }

    /// Supply statistics snapshot
    #[must_use]
    pub fn supply_stats(&self) -> SupplyStats {
        SupplyStats {
            initial_supply: self.initial_supply,
            total_supply: self.total_supply,
            pools_total: self.pools_total(),
            external_total: self.external_total(),
            total_staked: self.total_staked(),
            cumulative_burn: self.cumulative_burn,
            cumulative_emission: self.cumulative_emission,
        }
    }
}

/// Ledger errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LedgerError {
    /// Pool cannot cover a debit
    #[error("insufficient {pool} pool: have {have}, need {need}")]
    InsufficientPool {
        /// The pool that was debited
        pool: PoolKind,
        /// Current pool balance
        have: MintAmount,
        /// Amount requested
        need: MintAmount,
    },
    /// Account balance cannot cover a debit
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Current balance
        have: MintAmount,
        /// Amount requested
        need: MintAmount,
    },
    /// Stake record cannot cover an unstake
    #[error("insufficient stake: have {have}, need {need}")]
    InsufficientStake {
        /// Current staked amount
        have: MintAmount,
        /// Amount requested
        need: MintAmount,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> PoolLedger {
        PoolLedger::new(&GenesisAllocation::default())
    }

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    #[test]
    fn test_default_allocation_is_balanced() {
        assert!(GenesisAllocation::default().is_balanced());
    }

    #[test]
    fn test_genesis_conservation() {
        let ledger = ledger();

        assert!(ledger.conservation_holds());
        assert_eq!(ledger.total_supply(), MintAmount::from_mint(1_000_000_000));
        assert_eq!(ledger.pools_total(), ledger.total_supply());
        assert!(ledger.external_total().is_zero());
    }

    #[test]
    fn test_pool_debit_fail_closed() {
        let mut ledger = ledger();
        let before = ledger.pool_balance(PoolKind::Governance);

        let result = ledger.debit_pool(PoolKind::Governance, MintAmount::from_mint(60_000_000));
        assert!(matches!(result, Err(LedgerError::InsufficientPool { .. })));
        assert_eq!(ledger.pool_balance(PoolKind::Governance), before);
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn test_pool_to_account() {
        let mut ledger = ledger();
        let miner = addr(1);

        ledger
            .pool_to_account(PoolKind::MiningRewards, miner, MintAmount::from_mint(500))
            .unwrap();

        assert_eq!(ledger.balance_of(&miner), MintAmount::from_mint(500));
        assert_eq!(
            ledger.pool_balance(PoolKind::MiningRewards),
            MintAmount::from_mint(99_999_500)
        );
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn test_burn_shrinks_supply() {
        let mut ledger = ledger();
        let before = ledger.total_supply();

        ledger
            .burn_from_pool(PoolKind::MiningRewards, MintAmount::from_mint(1000))
            .unwrap();

        assert_eq!(ledger.total_supply(), before - MintAmount::from_mint(1000));
        assert_eq!(ledger.cumulative_burn(), MintAmount::from_mint(1000));
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn test_emission_grows_supply_net_of_burn() {
        let mut ledger = ledger();
        let miner = addr(2);
        let before = ledger.total_supply();

        ledger.emit(miner, MintAmount::from_mint(1000), MintAmount::from_mint(250));

        assert_eq!(ledger.total_supply(), before + MintAmount::from_mint(750));
        assert_eq!(ledger.balance_of(&miner), MintAmount::from_mint(750));
        assert_eq!(ledger.cumulative_emission(), MintAmount::from_mint(1000));
        assert_eq!(ledger.cumulative_burn(), MintAmount::from_mint(250));
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn test_stake_roundtrip() {
        let mut ledger = ledger();
        let staker = addr(3);
        ledger.credit(staker, MintAmount::from_mint(100));
        // conservation needs the credit matched by a pool debit
        ledger
            .debit_pool(PoolKind::Treasury, MintAmount::from_mint(100))
            .unwrap();

        ledger.stake(staker, MintAmount::from_mint(60)).unwrap();
        assert_eq!(ledger.staked_of(&staker), MintAmount::from_mint(60));
        assert_eq!(ledger.balance_of(&staker), MintAmount::from_mint(40));
        assert!(ledger.conservation_holds());

        ledger.unstake(&staker, MintAmount::from_mint(60)).unwrap();
        assert_eq!(ledger.staked_of(&staker), MintAmount::ZERO);
        assert_eq!(ledger.balance_of(&staker), MintAmount::from_mint(100));
        assert!(ledger.conservation_holds());
    }

    #[test]
    fn test_unstake_more_than_staked() {
        let mut ledger = ledger();
        let staker = addr(4);
        ledger.credit(staker, MintAmount::from_mint(10));
        ledger
            .debit_pool(PoolKind::Treasury, MintAmount::from_mint(10))
            .unwrap();
        ledger.stake(staker, MintAmount::from_mint(10)).unwrap();

        let result = ledger.unstake(&staker, MintAmount::from_mint(11));
        assert!(matches!(result, Err(LedgerError::InsufficientStake { .. })));
        assert_eq!(ledger.staked_of(&staker), MintAmount::from_mint(10));
    }
}
