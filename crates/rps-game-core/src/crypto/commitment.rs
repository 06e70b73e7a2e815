//! Commitment and RevealValue for the commit-reveal scheme.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hidden value behind a maker's commitment
///
/// Interpreted as a 256-bit big-endian unsigned integer. Its residue
/// modulo 3 is the maker's play.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealValue([u8; 32]);

impl RevealValue {
    /// Create a new random value
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw big-endian bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The value modulo 3
    pub fn residue_mod3(&self) -> u8 {
        self.0
            .iter()
            .fold(0u32, |acc, byte| (acc * 256 + u32::from(*byte)) % 3) as u8
    }

    /// Compute the commitment (SHA256 of the value bytes)
    pub fn commitment(&self) -> Commitment {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        Commitment(hasher.finalize().into())
    }
}

impl From<u64> for RevealValue {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl fmt::Debug for RevealValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a prefix, this is a secret until revealed
        write!(f, "RevealValue({}..)", hex::encode(&self.0[..4]))
    }
}

/// Commitment = H(value)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// The all-zero commitment, never accepted by the engine
    pub const ZERO: Commitment = Commitment([0u8; 32]);

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Verify that the given value produces this commitment
    pub fn verify(&self, value: &RevealValue) -> bool {
        *self == value.commitment()
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
