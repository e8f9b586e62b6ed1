//! BLAKE3 digests for the discovery integrity chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte hash digest
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash([u8; 32]);

impl Hash {
    /// The zero hash (parent of the first discovery)
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a hash from raw bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string
    ///
    /// # Errors
    /// Returns error if hex string is invalid or wrong length
    pub fn from_hex(s: &str) -> Result<Self, super::CryptoError> {
        let bytes = hex::decode(s).map_err(|e| super::CryptoError::InvalidHash(e.to_string()))?;

        if bytes.len() != 32 {
            return Err(super::CryptoError::InvalidHash(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Hasher for incremental hashing
pub struct Hasher {
    inner: blake3::Hasher,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a new hasher
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Update the hasher with data
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and get the hash
    #[must_use]
    pub fn finalize(self) -> Hash {
        let result = self.inner.finalize();
        Hash::from_bytes(*result.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(data: &[u8]) -> Hash {
        let mut hasher = Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(digest(b"test data"), digest(b"test data"));
    }

    #[test]
    fn test_hash_different_data() {
        assert_ne!(digest(b"data1"), digest(b"data2"));
    }

    #[test]
    fn test_hex_roundtrip() {
        let original = digest(b"test");
        let hex_str = original.to_hex();
        let parsed = Hash::from_hex(&hex_str).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Hash::from_hex("abcd").is_err());
    }
}
