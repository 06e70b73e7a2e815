//! Thread-safe handle to a registry.

use super::registry::GameRegistry;
use crate::crypto::{Commitment, RevealValue};
use crate::error::GameError;
use crate::games::{Outcome, Play};
use crate::protocol::{Game, GameEvent, GameId};
use ledger_core::Address;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared registry state
///
/// Every operation holds one lock for its whole run, which gives all
/// callers a single global order over games and balances.
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<GameRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: GameRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GameRegistry> {
        // Operations validate before mutating, so a poisoned registry is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(
        &self,
        caller: Address,
        commitment: Commitment,
        wager: u64,
    ) -> Result<GameId, GameError> {
        self.lock().create(caller, commitment, wager)
    }

    pub fn join(&self, caller: Address, id: GameId, play: Play) -> Result<(), GameError> {
        self.lock().join(caller, id, play)
    }

    pub fn cancel(&self, caller: Address, id: GameId) -> Result<(), GameError> {
        self.lock().cancel(caller, id)
    }

    pub fn settle(
        &self,
        caller: Address,
        id: GameId,
        revealed: RevealValue,
    ) -> Result<Outcome, GameError> {
        self.lock().settle(caller, id, revealed)
    }

    pub fn claim(&self, caller: Address, id: GameId) -> Result<(), GameError> {
        self.lock().claim(caller, id)
    }

    pub fn withdraw(&self, caller: Address) -> Result<u64, GameError> {
        self.lock().withdraw(caller)
    }

    pub fn game(&self, id: GameId) -> Option<Game> {
        self.lock().game(id).cloned()
    }

    pub fn balance_of(&self, account: &Address) -> u64 {
        self.lock().balance_of(account)
    }

    pub fn next_game_id(&self) -> GameId {
        self.lock().next_game_id()
    }

    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.lock().drain_events()
    }

    /// Run several reads or operations under one lock
    pub fn with<R>(&self, f: impl FnOnce(&mut GameRegistry) -> R) -> R {
        f(&mut self.lock())
    }
}
