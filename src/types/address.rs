//! Account addresses.
//!
//! An address is an opaque 20-byte identifier. The engine never verifies
//! signatures; callers are trusted to authenticate out of band.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of an address in bytes
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The zero address
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Create an address from raw bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Create an address with the value in the trailing eight bytes,
    /// big-endian. Useful for fixtures and genesis accounts.
    #[must_use]
    pub const fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[ADDRESS_LEN - 8 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Get the underlying bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Convert to a 0x-prefixed hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse from a hex string (with or without 0x prefix)
    ///
    /// # Errors
    /// Returns error if the hex is invalid or the wrong length
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|e| AddressError::InvalidHex(e.to_string()))?;

        if bytes.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength { got: bytes.len() });
        }

        let mut arr = [0u8; ADDRESS_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}..)", &self.to_hex()[..10])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Address parsing errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AddressError {
    /// Hex decoding failed
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    /// Wrong number of bytes
    #[error("invalid address length: expected {ADDRESS_LEN} bytes, got {got}")]
    InvalidLength {
        /// Number of bytes actually decoded
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let addr = Address::from_low_u64(0xdead_beef);
        let parsed = Address::from_hex(&addr.to_hex()).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_from_low_u64() {
        let addr = Address::from_low_u64(5);
        assert_eq!(addr.as_bytes()[ADDRESS_LEN - 1], 5);
        assert_eq!(addr.as_bytes()[0], 0);
        assert_ne!(addr, Address::from_low_u64(4));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Address::from_hex("0x1234").is_err());
        assert!(Address::from_hex("not hex at all").is_err());
        assert!("0x0000000000000000000000000000000000000001"
            .parse::<Address>()
            .is_ok());
    }
}
