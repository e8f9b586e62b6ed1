//! MINT token amounts with safe arithmetic.
//!
//! Uses 18 decimal places for precision. All arithmetic in reward and
//! ledger paths is checked or saturating to prevent overflow, and every
//! rate is applied in integer basis points.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Number of decimal places for MINT (10^18 units = 1 MINT)
pub const DECIMALS: u32 = 18;

/// One MINT in base units
pub const ONE_MINT: u128 = 10_u128.pow(DECIMALS);

/// One micro-MINT (10^-6 MINT) in base units
pub const MICRO_MINT: u128 = 10_u128.pow(DECIMALS - 6);

/// Default supply minted at genesis, one billion MINT. Emission can grow
/// the circulating supply beyond it; reward math uses it as an overflow
/// ceiling for a single payout.
pub const GENESIS_SUPPLY: u128 = 1_000_000_000 * ONE_MINT;

/// A token amount in the smallest unit.
///
/// Internally stores value as u128 to support large amounts without overflow.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct MintAmount(u128);

impl MintAmount {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Create from raw base units
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Create from whole MINT (will be multiplied by 10^18)
    #[must_use]
    pub const fn from_mint(mint: u64) -> Self {
        Self(mint as u128 * ONE_MINT)
    }

    /// Create from micro-MINT (10^-6 MINT), the granularity of per-unit
    /// base rewards in the work-type catalog
    #[must_use]
    pub const fn from_micro(micro: u64) -> Self {
        Self(micro as u128 * MICRO_MINT)
    }

    /// Create from a decimal string (e.g., "1.5")
    ///
    /// # Errors
    /// Returns error if the string format is invalid
    pub fn from_decimal_str(s: &str) -> Result<Self, AmountError> {
        let parts: Vec<&str> = s.split('.').collect();

        if parts.len() > 2 {
            return Err(AmountError::InvalidFormat);
        }

        let whole: u128 = parts[0].parse().map_err(|_| AmountError::InvalidFormat)?;

        let fractional = if parts.len() == 2 {
            let frac_str = parts[1];
            if frac_str.len() > DECIMALS as usize {
                return Err(AmountError::TooManyDecimals);
            }

            // Pad with zeros to get the right precision
            let padded = format!("{:0<width$}", frac_str, width = DECIMALS as usize);
            padded[..DECIMALS as usize]
                .parse::<u128>()
                .map_err(|_| AmountError::InvalidFormat)?
        } else {
            0
        };

        let total = whole
            .checked_mul(ONE_MINT)
            .and_then(|w| w.checked_add(fractional))
            .ok_or(AmountError::Overflow)?;

        Ok(Self(total))
    }

    /// Get the raw base unit value
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Get the whole MINT part (truncated)
    #[must_use]
    pub const fn whole_mint(&self) -> u64 {
        (self.0 / ONE_MINT) as u64
    }

    /// Convert to a decimal string representation
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        let whole = self.0 / ONE_MINT;
        let frac = self.0 % ONE_MINT;

        if frac == 0 {
            format!("{whole}.0")
        } else {
            let frac_str = format!("{frac:018}");
            let trimmed = frac_str.trim_end_matches('0');
            format!("{whole}.{trimmed}")
        }
    }

    /// Checked addition
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Checked multiplication
    #[must_use]
    pub fn checked_mul(self, factor: u128) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    /// Checked division
    #[must_use]
    pub fn checked_div(self, divisor: u128) -> Option<Self> {
        if divisor == 0 {
            None
        } else {
            Some(Self(self.0 / divisor))
        }
    }

    /// Apply a basis-point rate (10000 bps = 100%). Truncates.
    #[must_use]
    pub fn basis_points(self, bps: u32) -> Self {
        Self(self.0 * u128::from(bps) / 10_000)
    }

    /// Saturating addition
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction (floors at 0)
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Check if amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for MintAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MintAmount({})", self.to_decimal_string())
    }
}

impl fmt::Display for MintAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MINT", self.to_decimal_string())
    }
}

impl Add for MintAmount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(other).expect("amount overflow")
    }
}

impl Sub for MintAmount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(other).expect("amount underflow")
    }
}

impl Mul<u128> for MintAmount {
    type Output = Self;

    fn mul(self, factor: u128) -> Self {
        self.checked_mul(factor).expect("amount overflow")
    }
}

impl Div<u128> for MintAmount {
    type Output = Self;

    fn div(self, divisor: u128) -> Self {
        self.checked_div(divisor).expect("division by zero")
    }
}

/// Amount parsing/arithmetic errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AmountError {
    /// Invalid number format
    #[error("invalid amount format")]
    InvalidFormat,
    /// Too many decimal places
    #[error("too many decimal places (max {DECIMALS})")]
    TooManyDecimals,
    /// Arithmetic overflow
    #[error("amount overflow")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mint() {
        let amount = MintAmount::from_mint(100);
        assert_eq!(amount.whole_mint(), 100);
        assert_eq!(amount.raw(), 100 * ONE_MINT);
    }

    #[test]
    fn test_from_micro() {
        let amount = MintAmount::from_micro(100);
        assert_eq!(amount.raw(), 100 * MICRO_MINT);
        assert_eq!(MintAmount::from_micro(1_000_000), MintAmount::from_mint(1));
    }

    #[test]
    fn test_from_decimal_str() {
        let amount = MintAmount::from_decimal_str("1.5").unwrap();
        assert_eq!(amount.raw(), ONE_MINT + ONE_MINT / 2);

        let amount = MintAmount::from_decimal_str("0.001").unwrap();
        assert_eq!(amount.raw(), ONE_MINT / 1000);
    }

    #[test]
    fn test_to_decimal_string() {
        let amount = MintAmount::from_mint(100);
        assert_eq!(amount.to_decimal_string(), "100.0");

        let amount = MintAmount::from_raw(ONE_MINT + ONE_MINT / 2);
        assert_eq!(amount.to_decimal_string(), "1.5");
    }

    #[test]
    fn test_basis_points() {
        let amount = MintAmount::from_mint(100);

        // 2500 bps = 25%
        assert_eq!(amount.basis_points(2500).whole_mint(), 25);
        // 10000 bps = identity
        assert_eq!(amount.basis_points(10_000), amount);
        // truncation
        assert_eq!(MintAmount::from_raw(3).basis_points(5000).raw(), 1);
    }

    #[test]
    fn test_arithmetic() {
        let a = MintAmount::from_mint(100);
        let b = MintAmount::from_mint(50);

        assert_eq!((a + b).whole_mint(), 150);
        assert_eq!((a - b).whole_mint(), 50);
        assert_eq!((a * 2).whole_mint(), 200);
        assert_eq!((a / 2).whole_mint(), 50);
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = MintAmount::from_mint(100);
        let b = MintAmount::from_mint(200);

        assert!(a.checked_sub(b).is_none());
        assert!(a.checked_add(b).is_some());
    }

    #[test]
    fn test_saturating_math() {
        // Sums past the genesis supply stay exact; emission depends on it.
        let genesis = MintAmount::from_raw(GENESIS_SUPPLY);
        let grown = genesis.saturating_add(MintAmount::from_mint(1));
        assert_eq!(grown.raw(), GENESIS_SUPPLY + ONE_MINT);

        let top = MintAmount::from_raw(u128::MAX);
        assert_eq!(top.saturating_add(MintAmount::from_mint(1)), top);

        let floor = MintAmount::ZERO.saturating_sub(MintAmount::from_mint(1));
        assert!(floor.is_zero());
    }
}
