//! Mining sessions.

use serde::{Deserialize, Serialize};

use super::{now_millis, Address, Timestamp};

/// Sequential session identifier (first session is 1)
pub type SessionId = u64;

/// A mining session: one miner attacking one work type at a fixed
/// difficulty. Sessions move Open -> Completed exactly once; Completed is
/// terminal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MiningSession {
    /// Session id
    pub id: SessionId,
    /// The miner who opened the session
    pub miner: Address,
    /// Target work type (0..=24)
    pub work_type: u8,
    /// Chosen difficulty (1..=max)
    pub difficulty: u64,
    /// Hash target: a proof digest must be <= this value
    pub target_threshold: u128,
    /// When the session was opened (millis)
    pub started_at: Timestamp,
    /// When the session completed, if it has
    pub completed_at: Option<Timestamp>,
    /// Whether a valid proof has been accepted
    pub completed: bool,
}

impl MiningSession {
    /// Open a new session
    #[must_use]
    pub fn new(
        id: SessionId,
        miner: Address,
        work_type: u8,
        difficulty: u64,
        target_threshold: u128,
    ) -> Self {
        Self {
            id,
            miner,
            work_type,
            difficulty,
            target_threshold,
            started_at: now_millis(),
            completed_at: None,
            completed: false,
        }
    }

    /// Mark the session completed
    pub fn complete(&mut self) {
        self.completed = true;
        self.completed_at = Some(now_millis());
    }

    /// Whether the session is still open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session = MiningSession::new(1, Address::from_low_u64(7), 0, 1000, u128::MAX / 1000);

        assert!(session.is_open());
        assert!(session.completed_at.is_none());

        session.complete();
        assert!(!session.is_open());
        assert!(session.completed);
        assert!(session.completed_at.is_some());
    }
}
