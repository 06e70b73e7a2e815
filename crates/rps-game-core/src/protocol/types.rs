//! Protocol types.

use crate::crypto::Commitment;
use crate::games::Play;
use ledger_core::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Game identifier, allocated sequentially from 0
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Position in the registry's arena; `None` if it cannot address one
    pub(crate) fn index(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl FromStr for GameId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a game is in its lifecycle, derived from its flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created, waiting for a taker
    Open,
    /// Taker joined, waiting for the maker to reveal (or the claim window)
    AwaitingSettlement,
    /// Funds distributed; terminal
    Settled,
}

/// The joining side of a game: who took it and what they played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taker {
    pub account: Address,
    pub play: Play,
}

/// A single game record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub maker: Address,
    /// Unset until joined; stays unset when canceled
    pub taker: Option<Taker>,
    pub wager: u64,
    /// Seconds; the claim timeout counts from here
    pub created_at: u64,
    pub maker_commitment: Commitment,
    pub finished: bool,
    pub settled: bool,
}

impl Game {
    pub(crate) fn new(maker: Address, commitment: Commitment, wager: u64, created_at: u64) -> Self {
        Self {
            maker,
            taker: None,
            wager,
            created_at,
            maker_commitment: commitment,
            finished: false,
            settled: false,
        }
    }

    pub fn status(&self) -> GameStatus {
        match (self.finished, self.settled) {
            (_, true) => GameStatus::Settled,
            (true, false) => GameStatus::AwaitingSettlement,
            (false, false) => GameStatus::Open,
        }
    }

    pub fn taker_account(&self) -> Option<Address> {
        self.taker.map(|t| t.account)
    }

    pub fn taker_play(&self) -> Option<Play> {
        self.taker.map(|t| t.play)
    }

    /// True if the maker canceled before anyone joined
    pub fn is_canceled(&self) -> bool {
        self.settled && self.taker.is_none()
    }
}
