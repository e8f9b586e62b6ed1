//! Network security scaling.
//!
//! Every discovery strengthens the ledger. Research value accumulates
//! into a complexity total that drives a monotonically non-decreasing
//! bit-strength figure, and projected strength at a future height grows
//! with network health and the scaling rate.

use serde::{Deserialize, Serialize};

use crate::crypto::Hash;

/// Security posture derived from the discovery chain
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SecurityState {
    base_bit_strength: u64,
    max_bit_strength: u64,
    network_health: u64,
    scaling_rate: u64,
    cumulative_complexity: u64,
    bit_strength: u64,
    chain_length: u64,
    chain_head: Hash,
    paused: bool,
    test_mode: bool,
}

impl SecurityState {
    /// Initial state before any discovery has been recorded
    #[must_use]
    pub fn new(base_bit_strength: u64, max_bit_strength: u64, health: u8, scaling_rate: u32) -> Self {
        Self {
            base_bit_strength,
            max_bit_strength,
            network_health: u64::from(health),
            scaling_rate: u64::from(scaling_rate),
            cumulative_complexity: 0,
            bit_strength: base_bit_strength,
            chain_length: 0,
            chain_head: Hash::ZERO,
            paused: false,
            test_mode: false,
        }
    }

    /// Fold one discovery into the security posture
    pub fn record_discovery(&mut self, research_value: u64, commitment: Hash) {
        self.cumulative_complexity = self.cumulative_complexity.saturating_add(research_value);
        self.chain_length += 1;
        self.chain_head = commitment;

        let raised = self
            .base_bit_strength
            .saturating_add(self.cumulative_complexity / 1_000);
        self.bit_strength = raised.min(self.max_bit_strength);
    }

    /// Projected bit strength at a given height.
    ///
    /// At height zero this is exactly the current bit strength; the
    /// projection grows linearly with height, health, and scaling rate,
    /// and never exceeds the configured maximum.
    #[must_use]
    pub fn security_at(&self, height: u64) -> u64 {
        let growth = u128::from(self.network_health)
            * u128::from(self.scaling_rate)
            * u128::from(height)
            / 1_000;
        let scaled = u128::from(self.bit_strength).saturating_mul(10_000 + growth) / 10_000;

        u64::try_from(scaled.min(u128::from(self.max_bit_strength)))
            .unwrap_or(self.max_bit_strength)
    }

    /// Chain security level: cumulative complexity scaled down by 1000
    #[must_use]
    pub const fn security_level(&self) -> u64 {
        self.cumulative_complexity / 1_000
    }

    /// Store a health reading and derive the scaling rate from its band.
    /// Returns the derived rate.
    pub fn set_network_health(&mut self, health: u8) -> u64 {
        self.network_health = u64::from(health);
        self.scaling_rate = rate_for_health(health);
        self.scaling_rate
    }

    /// Override the scaling rate directly
    pub fn set_scaling_rate(&mut self, rate: u32) {
        self.scaling_rate = u64::from(rate);
    }

    /// Suspend state transitions
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume state transitions
    pub fn unpause(&mut self) {
        self.paused = false;
    }

    /// Whether transitions are suspended
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle the proof-target bypass
    pub fn set_test_mode(&mut self, enabled: bool) {
        self.test_mode = enabled;
    }

    /// Whether proof targets are bypassed
    #[must_use]
    pub const fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    /// Current bit strength
    #[must_use]
    pub const fn bit_strength(&self) -> u64 {
        self.bit_strength
    }

    /// Sum of research value over all recorded discoveries
    #[must_use]
    pub const fn cumulative_complexity(&self) -> u64 {
        self.cumulative_complexity
    }

    /// Number of discoveries in the commitment chain
    #[must_use]
    pub const fn chain_length(&self) -> u64 {
        self.chain_length
    }

    /// Commitment of the most recent discovery
    #[must_use]
    pub const fn chain_head(&self) -> Hash {
        self.chain_head
    }

    /// Last stored network health reading
    #[must_use]
    pub const fn network_health(&self) -> u64 {
        self.network_health
    }

    /// Scaling rate currently in effect
    #[must_use]
    pub const fn scaling_rate(&self) -> u64 {
        self.scaling_rate
    }
}

/// Scaling rate band for a raw health reading
const fn rate_for_health(health: u8) -> u64 {
    match health {
        90..=u8::MAX => 100,
        70..=89 => 90,
        60..=69 => 70,
        _ => 50,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> SecurityState {
        SecurityState::new(256, 18_432, 100, 100)
    }

    fn commitment(tag: u8) -> Hash {
        Hash::from_bytes([tag; 32])
    }

    #[test]
    fn test_initial_state() {
        let state = fresh();

        assert_eq!(state.bit_strength(), 256);
        assert_eq!(state.chain_length(), 0);
        assert_eq!(state.chain_head(), Hash::ZERO);
        assert_eq!(state.security_at(0), 256);
    }

    #[test]
    fn test_discovery_raises_bit_strength() {
        let mut state = fresh();

        state.record_discovery(95_000, commitment(1));

        assert_eq!(state.cumulative_complexity(), 95_000);
        assert_eq!(state.bit_strength(), 256 + 95);
        assert_eq!(state.security_level(), 95);
        assert_eq!(state.chain_length(), 1);
        assert_eq!(state.chain_head(), commitment(1));
    }

    #[test]
    fn test_bit_strength_monotone() {
        let mut state = fresh();
        let mut previous = state.bit_strength();

        for i in 0..50u64 {
            state.record_discovery(i * 700, commitment(i as u8));
            assert!(state.bit_strength() >= previous);
            previous = state.bit_strength();
        }
    }

    #[test]
    fn test_bit_strength_caps_at_max() {
        let mut state = fresh();

        state.record_discovery(u64::MAX / 2, commitment(1));

        assert_eq!(state.bit_strength(), 18_432);
    }

    #[test]
    fn test_projection_grows_with_height() {
        let state = fresh();

        // health 100, rate 100: each height adds 10 bps of growth
        assert_eq!(state.security_at(1), 256 * 10_010 / 10_000);
        assert!(state.security_at(100) > state.security_at(10));
        assert_eq!(state.security_at(100_000), 18_432);
    }

    #[test]
    fn test_health_bands_set_rate() {
        let mut state = fresh();

        assert_eq!(state.set_network_health(95), 100);
        assert_eq!(state.set_network_health(75), 90);
        assert_eq!(state.set_network_health(62), 70);
        assert_eq!(state.set_network_health(10), 50);
        assert_eq!(state.network_health(), 10);
    }

    #[test]
    fn test_lower_health_slows_projection() {
        let mut state = fresh();
        let healthy = state.security_at(500);

        state.set_network_health(40);
        assert!(state.security_at(500) < healthy);
    }

    #[test]
    fn test_pause_flags() {
        let mut state = fresh();
        assert!(!state.is_paused());

        state.pause();
        assert!(state.is_paused());

        state.unpause();
        assert!(!state.is_paused());
    }
}
