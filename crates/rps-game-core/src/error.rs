//! Engine errors.

use crate::protocol::GameId;
use ledger_core::LedgerError;
use thiserror::Error;

/// Every way an engine operation can be rejected
///
/// A rejected operation leaves engine state untouched, except that a
/// failed `withdraw` keeps the caller's balance at zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Unknown game: {0}")]
    UnknownGame(GameId),

    #[error("Invalid commitment: must not be zero")]
    InvalidCommitment,

    #[error("Maker cannot join their own game")]
    SameAsMaker,

    #[error("Game already finished")]
    AlreadyFinished,

    #[error("Caller is not the game maker")]
    NotMaker,

    #[error("Caller is not the game taker")]
    NotTaker,

    #[error("Game already settled")]
    AlreadySettled,

    #[error("Game not finished")]
    NotFinished,

    #[error("Claim window not open until {opens_at}")]
    NotExpired { opens_at: u64 },

    #[error("Revealed value does not match commitment")]
    CommitmentMismatch,

    #[error("Nothing to withdraw")]
    ZeroBalance,

    #[error("Token transfer failed: {0}")]
    TransferFailed(#[from] LedgerError),

    #[error("Invalid play: {0} (expected 0, 1 or 2)")]
    InvalidPlay(u8),

    #[error("Wager too large: {0}")]
    WagerOverflow(u64),
}
