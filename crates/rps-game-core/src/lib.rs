//! RPS Game Core Library
//!
//! This crate provides the game state machine, escrow accounting and
//! commit-reveal primitives for two-player wagered Rock-Paper-Scissors
//! settled against an external token ledger.

pub mod clock;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod error;
pub mod games;
pub mod protocol;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use crypto::{Commitment, RevealValue};
pub use engine::{EscrowLedger, GameRegistry, SharedRegistry};
pub use error::GameError;
pub use games::{judge, Outcome, Play};
pub use protocol::{Game, GameEvent, GameId, GameStatus, Taker};

pub use ledger_core::{Address, LedgerError, MockTokenLedger, TokenLedger};
