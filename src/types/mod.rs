//! Core data types for the `ProofMint` ledger engine.

mod address;
mod amount;
mod discovery;
mod proof;
mod session;
mod validator;
mod work;

pub use address::{Address, AddressError, ADDRESS_LEN};
pub use amount::{AmountError, MintAmount, DECIMALS, GENESIS_SUPPLY, MICRO_MINT, ONE_MINT};
pub use discovery::{research_value, Discovery, DiscoveryId};
pub use proof::{ProofId, ProofResult};
pub use session::{MiningSession, SessionId};
pub use validator::{Validator, INITIAL_REPUTATION};
pub use work::{genesis_work_types, Tier, WorkType, WORK_TYPE_COUNT};

use chrono::Utc;

/// Unix timestamp in milliseconds
pub type Timestamp = i64;

/// Get current timestamp in milliseconds
#[must_use]
pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis()
}
