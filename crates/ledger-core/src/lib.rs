//! Ledger Core Library
//!
//! Shared primitives for talking to an external fungible-token ledger:
//! - Account addresses
//! - TokenLedger trait and MockTokenLedger

pub mod account;
pub mod ledger;

pub use account::Address;
pub use ledger::{LedgerCall, LedgerError, MockTokenLedger, TokenLedger};
