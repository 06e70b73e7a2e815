//! Events emitted by the engine for external subscribers and audit.

use crate::protocol::GameId;
use ledger_core::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum GameEvent {
    GameCreated {
        id: GameId,
        maker: Address,
        wager: u64,
    },
    GameFinished {
        id: GameId,
        taker: Address,
    },
    /// `winner` is `None` on a tie
    GameSettled {
        id: GameId,
        winner: Option<Address>,
    },
    GameClaimed {
        id: GameId,
    },
    GameCanceled {
        id: GameId,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameCreated { id, .. }
            | GameEvent::GameFinished { id, .. }
            | GameEvent::GameSettled { id, .. }
            | GameEvent::GameClaimed { id }
            | GameEvent::GameCanceled { id } => *id,
        }
    }

    /// One JSON object, for line-oriented audit logs
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
