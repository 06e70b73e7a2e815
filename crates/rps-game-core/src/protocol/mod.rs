//! Protocol types and events.

mod events;
mod types;

pub use events::GameEvent;
pub use types::{Game, GameId, GameStatus, Taker};
