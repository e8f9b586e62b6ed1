//! The ledger engine.
//!
//! Every state transition in the system enters through [`LedgerEngine`]:
//! mining sessions, proof verification and payout, the discovery ledger,
//! validator consensus, security scaling, and the administrative control
//! plane. Operations validate fully before touching state, so a failed
//! call leaves the engine exactly as it was and emits no events.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consensus::ValidatorSet;
use crate::crypto::{meets_target, proof_digest, target_for};
use crate::ledger::{PoolKind, PoolLedger, SupplyStats};
use crate::rewards::{reward_for, RewardSource};
use crate::security::SecurityState;
use crate::types::{
    genesis_work_types, research_value, Address, Discovery, DiscoveryId, MiningSession,
    MintAmount, ProofId, ProofResult, SessionId, Validator, WorkType,
};

mod config;
mod error;
mod events;

pub use config::EngineConfig;
pub use error::{EngineError, FailureKind, SnapshotError};
pub use events::EngineEvent;

/// Result of re-deriving a discovery's stored fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Stored research value and chain commitment match recomputation
    pub consistent: bool,
    /// Chain security level at the time of the check
    pub security_level: u64,
}

/// The deterministic token-ledger engine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerEngine {
    config: EngineConfig,
    ledger: PoolLedger,
    work_types: Vec<WorkType>,
    sessions: HashMap<SessionId, MiningSession>,
    results: HashMap<ProofId, ProofResult>,
    discoveries: HashMap<DiscoveryId, Discovery>,
    validators: ValidatorSet,
    security: SecurityState,
    open_sessions: HashMap<Address, u32>,
    next_session: SessionId,
    next_proof: ProofId,
    next_discovery: DiscoveryId,
    height: u64,
    #[serde(skip)]
    events: Vec<EngineEvent>,
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LedgerEngine {
    /// Construct an engine at genesis
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        assert!(config.is_valid(), "Engine configuration must be consistent");

        let ledger = PoolLedger::new(&config.allocation);
        let validators = ValidatorSet::genesis(&config.genesis_validators);
        let mut security = SecurityState::new(
            config.base_bit_strength,
            config.max_bit_strength,
            config.initial_health,
            config.initial_scaling_rate,
        );
        security.set_test_mode(config.test_mode);

        Self {
            ledger,
            work_types: genesis_work_types(),
            sessions: HashMap::new(),
            results: HashMap::new(),
            discoveries: HashMap::new(),
            validators,
            security,
            open_sessions: HashMap::new(),
            next_session: 1,
            next_proof: 1,
            next_discovery: 1,
            height: 0,
            events: Vec::new(),
            config,
        }
    }

    fn ensure_active(&self) -> Result<(), EngineError> {
        if self.security.is_paused() {
            return Err(EngineError::Paused);
        }
        Ok(())
    }

    fn ensure_owner(&self, caller: &Address) -> Result<(), EngineError> {
        if *caller != self.config.owner {
            return Err(EngineError::NotOwner);
        }
        Ok(())
    }

    fn active_work_type(&self, work_type: u8) -> Result<&WorkType, EngineError> {
        self.work_types
            .get(usize::from(work_type))
            .filter(|entry| entry.active)
            .ok_or(EngineError::InvalidWorkType { work_type })
    }

    /// Open a mining session
    ///
    /// # Errors
    /// Fails when paused, on an unknown or inactive work type, on a
    /// difficulty outside `1..=max_difficulty`, or when the miner is at
    /// the open-session cap
    pub fn start_session(
        &mut self,
        caller: Address,
        work_type: u8,
        difficulty: u64,
    ) -> Result<SessionId, EngineError> {
        self.ensure_active()?;
        self.active_work_type(work_type)?;

        if difficulty == 0 || difficulty > self.config.max_difficulty {
            return Err(EngineError::InvalidDifficulty {
                difficulty,
                max: self.config.max_difficulty,
            });
        }

        let open = self.open_sessions.get(&caller).copied().unwrap_or(0);
        if open >= self.config.max_open_sessions {
            return Err(EngineError::TooManySessions {
                open,
                limit: self.config.max_open_sessions,
            });
        }

        let target = target_for(difficulty);
        let id = self.next_session;
        self.next_session += 1;
        self.sessions
            .insert(id, MiningSession::new(id, caller, work_type, difficulty, target));
        *self.open_sessions.entry(caller).or_insert(0) += 1;

        self.events.push(EngineEvent::SessionStarted {
            session: id,
            miner: caller,
            work_type,
            difficulty,
            target,
        });
        self.height += 1;
        Ok(id)
    }

    /// Submit a proof against an open session.
    ///
    /// The digest is recomputed here from the session id, the caller, and
    /// the nonce; callers never supply hashes. An accepted proof completes
    /// the session, pays the reward (pool-funded or emission fallback),
    /// records a discovery, and runs one validation round over it.
    ///
    /// # Errors
    /// Fails when paused, on unknown sessions, foreign sessions, completed
    /// sessions, digests above target, and out-of-range scores
    pub fn submit_proof(
        &mut self,
        caller: Address,
        session_id: SessionId,
        nonce: u64,
        complexity: u8,
        significance: u8,
    ) -> Result<ProofId, EngineError> {
        self.ensure_active()?;

        let session = self
            .sessions
            .get(&session_id)
            .ok_or(EngineError::SessionNotFound { session: session_id })?;
        if session.miner != caller {
            return Err(EngineError::NotSessionOwner { session: session_id });
        }
        if session.completed {
            return Err(EngineError::SessionAlreadyCompleted { session: session_id });
        }
        let work_type = session.work_type;
        let target = session.target_threshold;

        let digest = proof_digest(session_id, &caller, nonce);
        if !self.security.is_test_mode() && !meets_target(digest, target) {
            return Err(EngineError::HashAboveTarget { digest, target });
        }

        if !(1..=100).contains(&complexity) {
            return Err(EngineError::InvalidComplexity { complexity });
        }
        if !(1..=10).contains(&significance) {
            return Err(EngineError::InvalidSignificance { significance });
        }

        let base_reward = self
            .work_types
            .get(usize::from(work_type))
            .ok_or(EngineError::InvalidWorkType { work_type })?
            .base_reward;
        let value = research_value(complexity, significance);
        let breakdown = reward_for(
            &self.config.schedule,
            base_reward,
            complexity,
            significance,
            value,
            self.ledger.pool_balance(PoolKind::MiningRewards),
            self.config.base_emission,
            self.config.emission_cap,
        );

        match breakdown.source {
            RewardSource::MiningPool => {
                self.ledger
                    .pool_to_account(PoolKind::MiningRewards, caller, breakdown.net)?;
                self.ledger
                    .burn_from_pool(PoolKind::MiningRewards, breakdown.burn)?;
            }
            RewardSource::AsymptoticEmission => {
                self.events.push(EngineEvent::RewardPoolDepleted {
                    requested: breakdown.requested,
                    available: self.ledger.pool_balance(PoolKind::MiningRewards),
                });
                self.ledger.emit(caller, breakdown.gross, breakdown.burn);
            }
        }

        if let Some(session) = self.sessions.get_mut(&session_id) {
            session.complete();
        }
        if let Some(open) = self.open_sessions.get_mut(&caller) {
            *open = open.saturating_sub(1);
        }

        let proof_id = self.next_proof;
        self.next_proof += 1;
        self.results.insert(
            proof_id,
            ProofResult::new(proof_id, session_id, nonce, digest, complexity, significance),
        );

        self.events.push(EngineEvent::ProofSubmitted {
            proof: proof_id,
            session: session_id,
            miner: caller,
            gross: breakdown.gross,
            burn: breakdown.burn,
            net: breakdown.net,
            source: breakdown.source,
        });
        if !breakdown.burn.is_zero() {
            self.events.push(EngineEvent::TokensBurned {
                amount: breakdown.burn,
                source: breakdown.source,
            });
        }
        if breakdown.source == RewardSource::MiningPool {
            self.events.push(EngineEvent::PoolBalanceUpdated {
                pool: PoolKind::MiningRewards,
                balance: self.ledger.pool_balance(PoolKind::MiningRewards),
            });
        }

        self.ingest_discovery(caller, work_type, complexity, significance, true)?;

        self.height += 1;
        Ok(proof_id)
    }

    /// Record a discovery directly, without a mining session.
    ///
    /// Direct submissions earn no token reward; they extend the discovery
    /// chain and feed security scaling once validated.
    ///
    /// # Errors
    /// Fails when paused, on an unknown or inactive work type, and on
    /// out-of-range scores
    pub fn submit_discovery(
        &mut self,
        caller: Address,
        work_type: u8,
        complexity: u8,
        significance: u8,
    ) -> Result<DiscoveryId, EngineError> {
        self.ensure_active()?;
        self.active_work_type(work_type)?;

        if !(1..=100).contains(&complexity) {
            return Err(EngineError::InvalidComplexity { complexity });
        }
        if !(1..=10).contains(&significance) {
            return Err(EngineError::InvalidSignificance { significance });
        }

        let id = self.ingest_discovery(caller, work_type, complexity, significance, false)?;
        self.height += 1;
        Ok(id)
    }

    fn ingest_discovery(
        &mut self,
        researcher: Address,
        work_type: u8,
        complexity: u8,
        significance: u8,
        from_proof: bool,
    ) -> Result<DiscoveryId, EngineError> {
        let id = self.next_discovery;
        let discovery = Discovery::new(
            id,
            researcher,
            work_type,
            complexity,
            significance,
            from_proof,
            self.security.chain_head(),
        );
        let value = discovery.research_value;
        let commitment = discovery.commitment;

        self.next_discovery += 1;
        self.discoveries.insert(id, discovery);
        self.events.push(EngineEvent::DiscoverySubmitted {
            discovery: id,
            researcher,
            work_type,
            research_value: value,
            from_proof,
        });

        self.security.record_discovery(value, commitment);
        self.push_security_event();

        self.run_validation_round(id)?;
        Ok(id)
    }

    fn run_validation_round(&mut self, discovery_id: DiscoveryId) -> Result<(), EngineError> {
        let actives = self.validators.active_addresses();
        let reward = self.config.validator_reward;

        let mut processed: u32 = 0;
        let mut processing_stake = MintAmount::ZERO;

        for validator in &actives {
            if self.ledger.pool_balance(PoolKind::Staking) >= reward {
                self.ledger
                    .pool_to_account(PoolKind::Staking, *validator, reward)?;
                self.events.push(EngineEvent::ValidatorRewarded {
                    validator: *validator,
                    discovery: discovery_id,
                    amount: reward,
                });
            } else {
                warn!(validator = %validator, "staking pool cannot fund validator payment");
            }

            self.validators.record_validation(validator)?;
            processed += 1;
            if let Some(entry) = self.validators.get(validator) {
                processing_stake = processing_stake.saturating_add(entry.staked_amount);
            }
        }

        let quorum = self.config.quorum.met(
            processed,
            self.validators.active_count(),
            processing_stake,
            self.validators.active_stake(),
        );

        let discovery = self
            .discoveries
            .get_mut(&discovery_id)
            .ok_or(EngineError::DiscoveryNotFound {
                discovery: discovery_id,
            })?;
        discovery.validation_count = processed;

        if quorum {
            discovery.validated = true;
            self.events.push(EngineEvent::DiscoveryValidated {
                discovery: discovery_id,
                validations: processed,
            });
        }
        Ok(())
    }

    fn push_security_event(&mut self) {
        self.events.push(EngineEvent::SecurityScalingUpdated {
            bit_strength: self.security.bit_strength(),
            cumulative_complexity: self.security.cumulative_complexity(),
            network_health: self.security.network_health(),
            scaling_rate: self.security.scaling_rate(),
        });
    }

    /// Move caller balance into the staking pool
    ///
    /// # Errors
    /// Fails when paused, on a zero amount, or on insufficient balance
    pub fn stake(&mut self, caller: Address, amount: MintAmount) -> Result<(), EngineError> {
        self.ensure_active()?;
        if amount.is_zero() {
            return Err(EngineError::InvalidParameter { name: "amount" });
        }

        self.ledger.stake(caller, amount)?;
        self.events.push(EngineEvent::PoolBalanceUpdated {
            pool: PoolKind::Staking,
            balance: self.ledger.pool_balance(PoolKind::Staking),
        });
        self.height += 1;
        Ok(())
    }

    /// Release staked tokens back to the caller balance
    ///
    /// # Errors
    /// Fails when paused, on a zero amount, on insufficient stake, or when
    /// validator payouts have drained the staking pool below the amount
    pub fn unstake(&mut self, caller: Address, amount: MintAmount) -> Result<(), EngineError> {
        self.ensure_active()?;
        if amount.is_zero() {
            return Err(EngineError::InvalidParameter { name: "amount" });
        }

        self.ledger.unstake(&caller, amount)?;
        self.events.push(EngineEvent::PoolBalanceUpdated {
            pool: PoolKind::Staking,
            balance: self.ledger.pool_balance(PoolKind::Staking),
        });
        self.height += 1;
        Ok(())
    }

    /// Suspend all user-facing state transitions
    ///
    /// # Errors
    /// Fails for callers other than the owner
    pub fn pause(&mut self, caller: Address) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        self.security.pause();
        info!("engine paused");
        self.height += 1;
        Ok(())
    }

    /// Resume state transitions
    ///
    /// # Errors
    /// Fails for callers other than the owner
    pub fn unpause(&mut self, caller: Address) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        self.security.unpause();
        info!("engine unpaused");
        self.height += 1;
        Ok(())
    }

    /// Store a network health reading; the scaling rate follows its band
    ///
    /// # Errors
    /// Fails for non-owners and for readings above 100
    pub fn update_network_health(&mut self, caller: Address, health: u8) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        if health > 100 {
            return Err(EngineError::InvalidParameter {
                name: "network_health",
            });
        }

        self.security.set_network_health(health);
        self.push_security_event();
        self.height += 1;
        Ok(())
    }

    /// Override the security scaling rate
    ///
    /// # Errors
    /// Fails for non-owners and for rates above 100
    pub fn update_scaling_rate(&mut self, caller: Address, rate: u32) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        if rate > 100 {
            return Err(EngineError::InvalidParameter {
                name: "scaling_rate",
            });
        }

        self.security.set_scaling_rate(rate);
        self.push_security_event();
        self.height += 1;
        Ok(())
    }

    /// Toggle the proof-target bypass
    ///
    /// # Errors
    /// Fails for callers other than the owner
    pub fn set_test_mode(&mut self, caller: Address, enabled: bool) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        self.security.set_test_mode(enabled);
        self.height += 1;
        Ok(())
    }

    /// Retune a work type
    ///
    /// # Errors
    /// Fails for non-owners, unknown ids, and degenerate economics
    pub fn update_work_type(
        &mut self,
        caller: Address,
        work_type: u8,
        base_reward: MintAmount,
        difficulty_multiplier: u64,
        active: bool,
    ) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        if base_reward.is_zero() {
            return Err(EngineError::InvalidParameter { name: "base_reward" });
        }
        if difficulty_multiplier == 0 {
            return Err(EngineError::InvalidParameter {
                name: "difficulty_multiplier",
            });
        }

        let entry = self
            .work_types
            .get_mut(usize::from(work_type))
            .ok_or(EngineError::InvalidWorkType { work_type })?;
        entry.base_reward = base_reward;
        entry.difficulty_multiplier = difficulty_multiplier;
        entry.active = active;
        self.height += 1;
        Ok(())
    }

    /// Raise or lower the session difficulty ceiling
    ///
    /// # Errors
    /// Fails for non-owners and for a zero ceiling
    pub fn set_max_difficulty(&mut self, caller: Address, max: u64) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        if max == 0 {
            return Err(EngineError::InvalidParameter {
                name: "max_difficulty",
            });
        }

        self.config.max_difficulty = max;
        self.height += 1;
        Ok(())
    }

    /// Change the flat per-validation payment
    ///
    /// # Errors
    /// Fails for non-owners and for a zero amount
    pub fn set_validator_reward(
        &mut self,
        caller: Address,
        amount: MintAmount,
    ) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        if amount.is_zero() {
            return Err(EngineError::InvalidParameter {
                name: "validator_reward",
            });
        }

        self.config.validator_reward = amount;
        self.height += 1;
        Ok(())
    }

    /// Register a validator
    ///
    /// # Errors
    /// Fails for non-owners and duplicate addresses
    pub fn add_validator(
        &mut self,
        caller: Address,
        address: Address,
        stake: MintAmount,
    ) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        self.validators.register(address, stake)?;
        info!(validator = %address, "validator registered");
        self.height += 1;
        Ok(())
    }

    /// Deactivate a validator; its record is retained
    ///
    /// # Errors
    /// Fails for non-owners and unknown addresses
    pub fn deactivate_validator(
        &mut self,
        caller: Address,
        address: Address,
    ) -> Result<(), EngineError> {
        self.ensure_owner(&caller)?;
        self.validators.deactivate(&address)?;
        info!(validator = %address, "validator deactivated");
        self.height += 1;
        Ok(())
    }

    /// Check a claimed (complexity, significance) scoring against a stored
    /// discovery: the claim must reproduce the recorded research value and
    /// the discovery's chain commitment must still match its fields
    ///
    /// # Errors
    /// Fails on unknown discovery ids
    pub fn verify_integrity(
        &self,
        discovery_id: DiscoveryId,
        complexity: u8,
        significance: u8,
    ) -> Result<IntegrityReport, EngineError> {
        let discovery = self
            .discoveries
            .get(&discovery_id)
            .ok_or(EngineError::DiscoveryNotFound {
                discovery: discovery_id,
            })?;

        let value_ok = research_value(complexity, significance) == discovery.research_value;
        let commitment_ok = discovery.recompute_commitment() == discovery.commitment;

        Ok(IntegrityReport {
            consistent: value_ok && commitment_ok,
            security_level: self.security.security_level(),
        })
    }

    /// Look up a session
    #[must_use]
    pub fn session(&self, id: SessionId) -> Option<&MiningSession> {
        self.sessions.get(&id)
    }

    /// Look up an accepted proof
    #[must_use]
    pub fn proof(&self, id: ProofId) -> Option<&ProofResult> {
        self.results.get(&id)
    }

    /// Look up a discovery
    #[must_use]
    pub fn discovery(&self, id: DiscoveryId) -> Option<&Discovery> {
        self.discoveries.get(&id)
    }

    /// Look up a work type
    #[must_use]
    pub fn work_type(&self, id: u8) -> Option<&WorkType> {
        self.work_types.get(usize::from(id))
    }

    /// The full work-type registry
    #[must_use]
    pub fn work_types(&self) -> &[WorkType] {
        &self.work_types
    }

    /// Look up a validator
    #[must_use]
    pub fn validator(&self, address: &Address) -> Option<&Validator> {
        self.validators.get(address)
    }

    /// All validators, sorted by address
    #[must_use]
    pub fn validators(&self) -> Vec<&Validator> {
        self.validators.all()
    }

    /// Current balance of a pool
    #[must_use]
    pub fn pool_balance(&self, kind: PoolKind) -> MintAmount {
        self.ledger.pool_balance(kind)
    }

    /// Current total supply
    #[must_use]
    pub fn total_supply(&self) -> MintAmount {
        self.ledger.total_supply()
    }

    /// External balance of an account
    #[must_use]
    pub fn balance_of(&self, address: &Address) -> MintAmount {
        self.ledger.balance_of(address)
    }

    /// Staked amount of an account
    #[must_use]
    pub fn staked_of(&self, address: &Address) -> MintAmount {
        self.ledger.staked_of(address)
    }

    /// Current security posture
    #[must_use]
    pub const fn security(&self) -> &SecurityState {
        &self.security
    }

    /// Number of successful state transitions since genesis
    #[must_use]
    pub const fn height(&self) -> u64 {
        self.height
    }

    /// The administrative owner
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.config.owner
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Supply statistics snapshot
    #[must_use]
    pub fn supply_stats(&self) -> SupplyStats {
        self.ledger.supply_stats()
    }

    /// Check both supply conservation identities
    #[must_use]
    pub fn conservation_holds(&self) -> bool {
        self.ledger.conservation_holds()
    }

    /// Hand over all pending events
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serialize the full engine state.
    ///
    /// Pending undrained events are not part of a snapshot.
    ///
    /// # Errors
    /// Fails if the state cannot be encoded
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Rebuild an engine from a snapshot
    ///
    /// # Errors
    /// Fails if the bytes do not decode to an engine
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
