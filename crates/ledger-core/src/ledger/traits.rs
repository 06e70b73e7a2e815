//! Token ledger trait definition.

use crate::account::Address;
use thiserror::Error;

/// Errors from token ledger operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Insufficient funds: {account} holds {available}, needs {requested}")]
    InsufficientFunds {
        account: Address,
        available: u64,
        requested: u64,
    },

    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

/// Trait for the external fungible-token ledger
///
/// This is the only surface the game engine uses to move real tokens.
/// Every call is all-or-nothing: it either moves exactly `amount` or
/// returns an error and moves nothing.
/// Implementations can be:
/// - MockTokenLedger for testing
/// - A client for a real token contract in production
pub trait TokenLedger: Send + Sync {
    /// Account this client acts as (the engine's custody account)
    fn owner(&self) -> Address;

    /// Pull `amount` from `from` into `to` using a prior allowance
    fn transfer_from(&self, from: &Address, to: &Address, amount: u64) -> Result<(), LedgerError>;

    /// Send `amount` from the owner account to `to`
    fn transfer(&self, to: &Address, amount: u64) -> Result<(), LedgerError>;
}
