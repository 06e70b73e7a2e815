//! Cryptographic primitives for the commit-reveal protocol.
//!
//! The maker publishes a Commitment, the SHA256 of a secret RevealValue,
//! when creating a game, and discloses the value at settlement.

mod commitment;

pub use commitment::{Commitment, RevealValue};
