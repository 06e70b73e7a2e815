//! Token ledger client abstraction.

mod mock;
mod traits;

pub use mock::{LedgerCall, MockTokenLedger};
pub use traits::{LedgerError, TokenLedger};
