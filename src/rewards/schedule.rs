//! Reward tier tables.
//!
//! Multipliers are percent-scaled (100 = 1x), burn rates are basis points,
//! and the gross formula divides by 10000 to normalize the two percent
//! factors. Everything here is configuration; the defaults carry the
//! canonical band bounds and ratios.

use serde::{Deserialize, Serialize};

/// The four significance classes a submission can fall into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignificanceClass {
    /// Significance 10: millennium-class results
    Millennium,
    /// Significance 8..=9: major results
    Major,
    /// Significance 1: collaborative contributions
    Collaborative,
    /// Significance 2..=7: standard results
    Standard,
}

impl SignificanceClass {
    /// Classify a significance level (1..=10)
    #[must_use]
    pub const fn of(significance: u8) -> Self {
        match significance {
            10 => Self::Millennium,
            8 | 9 => Self::Major,
            1 => Self::Collaborative,
            _ => Self::Standard,
        }
    }
}

/// Tier tables applied to every accepted proof
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Complexity bands as (inclusive upper bound, percent multiplier),
    /// ascending. The last band must cover 100.
    pub complexity_bands: Vec<(u8, u32)>,
    /// Percent multiplier for millennium-class work
    pub millennium_multiplier: u32,
    /// Percent multiplier for major results
    pub major_multiplier: u32,
    /// Percent multiplier for collaborative contributions
    pub collaborative_multiplier: u32,
    /// Percent multiplier for standard results
    pub standard_multiplier: u32,
    /// Burn rate for millennium-class work, basis points
    pub millennium_burn_bps: u32,
    /// Burn rate for major results, basis points
    pub major_burn_bps: u32,
    /// Burn rate for collaborative contributions, basis points
    pub collaborative_burn_bps: u32,
    /// Burn rate for standard results, basis points
    pub standard_burn_bps: u32,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            complexity_bands: vec![(30, 100), (60, 250), (80, 500), (100, 1000)],
            millennium_multiplier: 2500,
            major_multiplier: 1500,
            collaborative_multiplier: 300,
            standard_multiplier: 100,
            millennium_burn_bps: 2500,
            major_burn_bps: 1500,
            collaborative_burn_bps: 1200,
            standard_burn_bps: 1000,
        }
    }
}

impl RewardSchedule {
    /// Percent multiplier for a complexity score
    #[must_use]
    pub fn complexity_multiplier(&self, complexity: u8) -> u32 {
        for &(bound, multiplier) in &self.complexity_bands {
            if complexity <= bound {
                return multiplier;
            }
        }

        // bands are validated to cover 100; fall back to the top band
        self.complexity_bands.last().map_or(100, |&(_, m)| m)
    }

    /// Percent multiplier for a significance level
    #[must_use]
    pub const fn significance_multiplier(&self, significance: u8) -> u32 {
        match SignificanceClass::of(significance) {
            SignificanceClass::Millennium => self.millennium_multiplier,
            SignificanceClass::Major => self.major_multiplier,
            SignificanceClass::Collaborative => self.collaborative_multiplier,
            SignificanceClass::Standard => self.standard_multiplier,
        }
    }

    /// Burn rate for a significance level, basis points
    #[must_use]
    pub const fn burn_rate_bps(&self, significance: u8) -> u32 {
        match SignificanceClass::of(significance) {
            SignificanceClass::Millennium => self.millennium_burn_bps,
            SignificanceClass::Major => self.major_burn_bps,
            SignificanceClass::Collaborative => self.collaborative_burn_bps,
            SignificanceClass::Standard => self.standard_burn_bps,
        }
    }

    /// Structural validity: ascending bands covering 100, positive
    /// multipliers, burn rates strictly below 100%.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.complexity_bands.is_empty() {
            return false;
        }

        // Bounds ascend strictly from at least 1; a zero bound can never
        // match a scored proof and would be a dead band.
        let mut prev = 0u8;
        for &(bound, multiplier) in &self.complexity_bands {
            if bound <= prev || multiplier == 0 {
                return false;
            }
            prev = bound;
        }
        if prev < 100 {
            return false;
        }

        let multipliers = [
            self.millennium_multiplier,
            self.major_multiplier,
            self.collaborative_multiplier,
            self.standard_multiplier,
        ];
        let burns = [
            self.millennium_burn_bps,
            self.major_burn_bps,
            self.collaborative_burn_bps,
            self.standard_burn_bps,
        ];

        multipliers.iter().all(|&m| m > 0) && burns.iter().all(|&b| b < 10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RewardSchedule::default().is_valid());
    }

    #[test]
    fn test_complexity_bands() {
        let schedule = RewardSchedule::default();

        assert_eq!(schedule.complexity_multiplier(1), 100);
        assert_eq!(schedule.complexity_multiplier(30), 100);
        assert_eq!(schedule.complexity_multiplier(31), 250);
        assert_eq!(schedule.complexity_multiplier(60), 250);
        assert_eq!(schedule.complexity_multiplier(61), 500);
        assert_eq!(schedule.complexity_multiplier(80), 500);
        assert_eq!(schedule.complexity_multiplier(81), 1000);
        assert_eq!(schedule.complexity_multiplier(95), 1000);
        assert_eq!(schedule.complexity_multiplier(100), 1000);
    }

    #[test]
    fn test_significance_classes() {
        assert_eq!(SignificanceClass::of(10), SignificanceClass::Millennium);
        assert_eq!(SignificanceClass::of(9), SignificanceClass::Major);
        assert_eq!(SignificanceClass::of(8), SignificanceClass::Major);
        assert_eq!(SignificanceClass::of(7), SignificanceClass::Standard);
        assert_eq!(SignificanceClass::of(2), SignificanceClass::Standard);
        assert_eq!(SignificanceClass::of(1), SignificanceClass::Collaborative);
    }

    #[test]
    fn test_significance_tables() {
        let schedule = RewardSchedule::default();

        assert_eq!(schedule.significance_multiplier(10), 2500);
        assert_eq!(schedule.significance_multiplier(8), 1500);
        assert_eq!(schedule.significance_multiplier(1), 300);
        assert_eq!(schedule.significance_multiplier(5), 100);

        assert_eq!(schedule.burn_rate_bps(10), 2500);
        assert_eq!(schedule.burn_rate_bps(9), 1500);
        assert_eq!(schedule.burn_rate_bps(1), 1200);
        assert_eq!(schedule.burn_rate_bps(4), 1000);
    }

    #[test]
    fn test_invalid_schedules_rejected() {
        let mut s = RewardSchedule::default();
        s.complexity_bands = vec![(30, 100), (60, 250)];
        assert!(!s.is_valid(), "bands must cover 100");

        let mut s = RewardSchedule::default();
        s.complexity_bands = vec![(0, 50), (0, 60), (100, 1000)];
        assert!(!s.is_valid(), "zero bounds are dead bands");

        let mut s = RewardSchedule::default();
        s.complexity_bands = vec![(30, 100), (30, 250), (100, 1000)];
        assert!(!s.is_valid(), "bounds must ascend strictly");

        let mut s = RewardSchedule::default();
        s.standard_multiplier = 0;
        assert!(!s.is_valid(), "zero multiplier is degenerate");

        let mut s = RewardSchedule::default();
        s.millennium_burn_bps = 10_000;
        assert!(!s.is_valid(), "burn must stay below 100%");
    }
}
