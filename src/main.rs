//! ProofMint Node - deterministic ledger simulation
//!
//! Drives the ledger engine through seeded mining rounds and prints the
//! resulting supply picture.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use proofmint::{
    crypto::{meets_target, proof_digest},
    engine::{EngineConfig, EngineEvent, LedgerEngine},
    scores,
    types::{Address, WORK_TYPE_COUNT},
};

/// First miner address; round `r` mines from `MINER_BASE + r % miners`
const MINER_BASE: u64 = 1000;

/// Simulation configuration
#[derive(Clone, Debug)]
struct SimConfig {
    /// Number of mining rounds
    rounds: u64,
    /// Number of distinct miner addresses
    miners: u64,
    /// RNG seed (same seed, same ledger)
    seed: u64,
    /// Session difficulty for every round
    difficulty: u64,
    /// Emit the final summary as JSON instead of log lines
    json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rounds: 12,
            miners: 3,
            seed: 42,
            difficulty: 750,
            json: false,
        }
    }
}

/// The simulation driver
struct SimNode {
    config: SimConfig,
    engine: LedgerEngine,
    rng: ChaCha8Rng,
    proofs_accepted: u64,
    discoveries_validated: u64,
    validator_payments: u64,
    emission_fallbacks: u64,
}

/// Final supply picture, printable as JSON
#[derive(Debug, Serialize)]
struct Summary {
    rounds: u64,
    height: u64,
    proofs_accepted: u64,
    discoveries_validated: u64,
    validator_payments: u64,
    emission_fallbacks: u64,
    total_supply: String,
    cumulative_burn: String,
    cumulative_emission: String,
    total_staked: String,
    bit_strength: u64,
    chain_length: u64,
    conservation_holds: bool,
}

impl SimNode {
    fn new(config: SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            engine: LedgerEngine::new(EngineConfig::default()),
            config,
            proofs_accepted: 0,
            discoveries_validated: 0,
            validator_payments: 0,
            emission_fallbacks: 0,
        }
    }

    fn run(&mut self) -> anyhow::Result<Summary> {
        info!(
            rounds = self.config.rounds,
            miners = self.config.miners,
            seed = self.config.seed,
            "starting simulation"
        );

        for round in 0..self.config.rounds {
            self.mine_round(round)?;

            // sprinkle in the non-mining traffic a live ledger would see
            if round % 4 == 3 {
                self.direct_discovery()?;
            }
            if round % 5 == 4 {
                let health = self.rng.gen_range(40..=100u8);
                self.engine
                    .update_network_health(self.engine.owner(), health)?;
            }

            self.handle_events();
        }

        self.stake_richest_miner()?;
        self.handle_events();

        Ok(self.summarize())
    }

    /// One full mining round: open a session, search for a winning nonce,
    /// submit the proof.
    fn mine_round(&mut self, round: u64) -> anyhow::Result<()> {
        let miner = Address::from_low_u64(MINER_BASE + round % self.config.miners);
        let work_type = self.rng.gen_range(0..WORK_TYPE_COUNT);
        let complexity = self.rng.gen_range(1..=scores::MAX_COMPLEXITY);
        let significance = self.rng.gen_range(1..=scores::MAX_SIGNIFICANCE);

        let session = self
            .engine
            .start_session(miner, work_type, self.config.difficulty)?;
        let target = self
            .engine
            .session(session)
            .map_or(u128::MAX, |s| s.target_threshold);

        let mut nonce = 0u64;
        while !meets_target(proof_digest(session, &miner, nonce), target) {
            nonce += 1;
        }

        self.engine
            .submit_proof(miner, session, nonce, complexity, significance)?;
        Ok(())
    }

    fn direct_discovery(&mut self) -> anyhow::Result<()> {
        let researcher = Address::from_low_u64(MINER_BASE + self.config.miners);
        let work_type = self.rng.gen_range(0..WORK_TYPE_COUNT);
        let complexity = self.rng.gen_range(1..=scores::MAX_COMPLEXITY);
        let significance = self.rng.gen_range(1..=scores::MAX_SIGNIFICANCE);

        self.engine
            .submit_discovery(researcher, work_type, complexity, significance)?;
        Ok(())
    }

    fn stake_richest_miner(&mut self) -> anyhow::Result<()> {
        let richest = (0..self.config.miners)
            .map(|i| Address::from_low_u64(MINER_BASE + i))
            .max_by_key(|addr| self.engine.balance_of(addr));

        if let Some(miner) = richest {
            if let Some(half) = self.engine.balance_of(&miner).checked_div(2) {
                if !half.is_zero() {
                    self.engine.stake(miner, half)?;
                    info!(miner = %miner, amount = %half, "staked half of top balance");
                }
            }
        }
        Ok(())
    }

    fn handle_events(&mut self) {
        for event in self.engine.drain_events() {
            self.handle_event(&event);
        }
    }

    fn handle_event(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::SessionStarted {
                session,
                miner,
                work_type,
                difficulty,
                ..
            } => {
                info!(session, %miner, work_type, difficulty, "session opened");
            }
            EngineEvent::ProofSubmitted {
                proof,
                miner,
                net,
                source,
                ..
            } => {
                self.proofs_accepted += 1;
                info!(proof, %miner, net = %net, ?source, "proof accepted");
            }
            EngineEvent::DiscoverySubmitted {
                discovery,
                researcher,
                research_value,
                from_proof,
                ..
            } => {
                info!(discovery, %researcher, research_value, from_proof, "discovery recorded");
            }
            EngineEvent::DiscoveryValidated {
                discovery,
                validations,
            } => {
                self.discoveries_validated += 1;
                info!(discovery, validations, "discovery validated");
            }
            EngineEvent::ValidatorRewarded {
                validator, amount, ..
            } => {
                self.validator_payments += 1;
                info!(%validator, amount = %amount, "validator paid");
            }
            EngineEvent::TokensBurned { amount, .. } => {
                info!(amount = %amount, "tokens burned");
            }
            EngineEvent::PoolBalanceUpdated { pool, balance } => {
                info!(pool = pool.name(), balance = %balance, "pool balance");
            }
            EngineEvent::SecurityScalingUpdated {
                bit_strength,
                cumulative_complexity,
                ..
            } => {
                info!(bit_strength, cumulative_complexity, "security scaled");
            }
            EngineEvent::RewardPoolDepleted {
                requested,
                available,
            } => {
                self.emission_fallbacks += 1;
                warn!(requested = %requested, available = %available, "mining pool depleted");
            }
        }
    }

    fn summarize(&self) -> Summary {
        let stats = self.engine.supply_stats();
        let security = self.engine.security();

        Summary {
            rounds: self.config.rounds,
            height: self.engine.height(),
            proofs_accepted: self.proofs_accepted,
            discoveries_validated: self.discoveries_validated,
            validator_payments: self.validator_payments,
            emission_fallbacks: self.emission_fallbacks,
            total_supply: stats.total_supply.to_decimal_string(),
            cumulative_burn: stats.cumulative_burn.to_decimal_string(),
            cumulative_emission: stats.cumulative_emission.to_decimal_string(),
            total_staked: stats.total_staked.to_decimal_string(),
            bit_strength: security.bit_strength(),
            chain_length: security.chain_length(),
            conservation_holds: self.engine.conservation_holds(),
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rounds" | "-r" => {
                i += 1;
                if i < args.len() {
                    config.rounds = args[i].parse().unwrap_or(config.rounds);
                }
            }
            "--miners" | "-m" => {
                i += 1;
                if i < args.len() {
                    config.miners = args[i].parse().unwrap_or(config.miners).max(1);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    config.seed = args[i].parse().unwrap_or(config.seed);
                }
            }
            "--difficulty" | "-d" => {
                i += 1;
                if i < args.len() {
                    config.difficulty = args[i].parse().unwrap_or(config.difficulty).max(1);
                }
            }
            "--json" => config.json = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("ProofMint Node");
    println!();
    println!("USAGE:");
    println!("    proofmint-node [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -r, --rounds <N>        Mining rounds to simulate (default: 12)");
    println!("    -m, --miners <N>        Distinct miner addresses (default: 3)");
    println!("    -s, --seed <N>          RNG seed; same seed, same ledger (default: 42)");
    println!("    -d, --difficulty <N>    Session difficulty (default: 750)");
    println!("    --json                  Print the final summary as JSON");
    println!("    -h, --help              Print help");
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!();
    println!("   ██████╗ ██████╗  ██████╗  ██████╗ ███████╗███╗   ███╗██╗███╗   ██╗████████╗");
    println!("   ██╔══██╗██╔══██╗██╔═══██╗██╔═══██╗██╔════╝████╗ ████║██║████╗  ██║╚══██╔══╝");
    println!("   ██████╔╝██████╔╝██║   ██║██║   ██║█████╗  ██╔████╔██║██║██╔██╗ ██║   ██║");
    println!("   ██╔═══╝ ██╔══██╗██║   ██║██║   ██║██╔══╝  ██║╚██╔╝██║██║██║╚██╗██║   ██║");
    println!("   ██║     ██║  ██║╚██████╔╝╚██████╔╝██║     ██║ ╚═╝ ██║██║██║ ╚████║   ██║");
    println!("   ╚═╝     ╚═╝  ╚═╝ ╚═════╝  ╚═════╝ ╚═╝     ╚═╝     ╚═╝╚═╝╚═╝  ╚═══╝   ╚═╝");
    println!();
    println!("   Deterministic Token Ledger v{}", proofmint::VERSION);
    println!("   \"Every token accounted for.\"");
    println!();

    let config = parse_args();
    let json = config.json;

    let mut node = SimNode::new(config);
    let summary = node.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!(
            height = summary.height,
            proofs = summary.proofs_accepted,
            validated = summary.discoveries_validated,
            supply = %summary.total_supply,
            burned = %summary.cumulative_burn,
            staked = %summary.total_staked,
            bit_strength = summary.bit_strength,
            conservation = summary.conservation_holds,
            "simulation complete"
        );
    }

    Ok(())
}
