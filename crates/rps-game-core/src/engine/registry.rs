//! Game registry: the per-game state machine and commit-reveal checks.

use super::escrow::EscrowLedger;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::crypto::{Commitment, RevealValue};
use crate::error::GameError;
use crate::games::{judge, Outcome, Play};
use crate::protocol::{Game, GameEvent, GameId, Taker};
use ledger_core::{Address, TokenLedger};
use std::sync::Arc;
use tracing::info;

/// Owns every game and the escrow balances they settle into
///
/// Each operation validates first and mutates only once nothing can fail,
/// so a rejected call leaves the registry as it was.
pub struct GameRegistry {
    games: Vec<Game>,
    escrow: EscrowLedger,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    /// Unbounded; owners drain it with `drain_events`
    events: Vec<GameEvent>,
}

impl GameRegistry {
    pub fn new(token: Arc<dyn TokenLedger>, clock: Arc<dyn Clock>, config: EngineConfig) -> Self {
        Self {
            games: Vec::new(),
            escrow: EscrowLedger::new(token),
            clock,
            config,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Read surface

    pub fn game(&self, id: GameId) -> Option<&Game> {
        id.index().and_then(|i| self.games.get(i))
    }

    /// All games in id order
    pub fn games(&self) -> impl Iterator<Item = (GameId, &Game)> {
        self.games
            .iter()
            .enumerate()
            .map(|(i, game)| (GameId::new(i as u64), game))
    }

    /// Id the next created game will get
    pub fn next_game_id(&self) -> GameId {
        GameId::new(self.games.len() as u64)
    }

    pub fn balance_of(&self, account: &Address) -> u64 {
        self.escrow.balance_of(account)
    }

    pub fn escrow(&self) -> &EscrowLedger {
        &self.escrow
    }

    /// Events emitted since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand the pending events to a subscriber
    ///
    /// The log is not capped and keeps every event until it is drained, so
    /// a long-running host must call this periodically.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // Operations

    /// Open a new game, escrowing the maker's wager
    pub fn create(
        &mut self,
        caller: Address,
        commitment: Commitment,
        wager: u64,
    ) -> Result<GameId, GameError> {
        if commitment.is_zero() {
            return Err(GameError::InvalidCommitment);
        }
        if wager.checked_mul(2).is_none() {
            return Err(GameError::WagerOverflow(wager));
        }

        self.escrow.debit_for_wager(&caller, wager)?;

        let id = self.next_game_id();
        let created_at = self.clock.now();
        self.games
            .push(Game::new(caller, commitment, wager, created_at));

        info!(game = %id, maker = %caller, wager, created_at, "game created");
        self.emit(GameEvent::GameCreated {
            id,
            maker: caller,
            wager,
        });
        Ok(id)
    }

    /// Take the other side of an open game, matching its wager
    pub fn join(&mut self, caller: Address, id: GameId, play: Play) -> Result<(), GameError> {
        let game = self.lookup(id)?;
        if game.maker == caller {
            return Err(GameError::SameAsMaker);
        }
        if game.finished {
            return Err(GameError::AlreadyFinished);
        }
        let wager = game.wager;

        self.escrow.debit_for_wager(&caller, wager)?;

        let game = self.lookup_mut(id)?;
        game.taker = Some(Taker {
            account: caller,
            play,
        });
        game.finished = true;

        info!(game = %id, taker = %caller, "game joined");
        self.emit(GameEvent::GameFinished { id, taker: caller });
        Ok(())
    }

    /// Withdraw an unjoined game and refund the maker
    pub fn cancel(&mut self, caller: Address, id: GameId) -> Result<(), GameError> {
        let game = self.lookup(id)?;
        if game.maker != caller {
            return Err(GameError::NotMaker);
        }
        if game.finished {
            return Err(GameError::AlreadyFinished);
        }
        let wager = game.wager;

        let game = self.lookup_mut(id)?;
        game.finished = true;
        game.settled = true;
        self.escrow.credit(&caller, wager);

        info!(game = %id, refund = wager, "game canceled");
        self.emit(GameEvent::GameCanceled { id });
        Ok(())
    }

    /// Reveal the maker's value and pay out the result
    pub fn settle(
        &mut self,
        caller: Address,
        id: GameId,
        revealed: RevealValue,
    ) -> Result<Outcome, GameError> {
        let game = self.lookup(id)?;
        if game.maker != caller {
            return Err(GameError::NotMaker);
        }
        if !game.finished {
            return Err(GameError::NotFinished);
        }
        if game.settled {
            return Err(GameError::AlreadySettled);
        }
        if !game.maker_commitment.verify(&revealed) {
            return Err(GameError::CommitmentMismatch);
        }
        // A finished game without a taker was canceled, hence settled
        let Some(Taker {
            account: taker,
            play: taker_play,
        }) = game.taker
        else {
            return Err(GameError::NotFinished);
        };
        let maker = game.maker;
        let wager = game.wager;

        let maker_play = Play::from_reveal(&revealed);
        let outcome = judge(maker_play, taker_play);
        let winner = match outcome {
            Outcome::Tie => {
                self.escrow.credit(&maker, wager);
                self.escrow.credit(&taker, wager);
                None
            }
            Outcome::MakerWins => {
                self.escrow.credit(&maker, wager * 2);
                Some(maker)
            }
            Outcome::TakerWins => {
                self.escrow.credit(&taker, wager * 2);
                Some(taker)
            }
        };
        self.lookup_mut(id)?.settled = true;

        info!(game = %id, %maker_play, %taker_play, ?outcome, "game settled");
        self.emit(GameEvent::GameSettled { id, winner });
        Ok(outcome)
    }

    /// Collect the whole pot once the maker has failed to reveal in time
    pub fn claim(&mut self, caller: Address, id: GameId) -> Result<(), GameError> {
        let now = self.clock.now();
        let timeout = self.config.claim_timeout_secs;
        let game = self.lookup(id)?;
        if game.taker_account() != Some(caller) {
            return Err(GameError::NotTaker);
        }
        if game.settled {
            return Err(GameError::AlreadySettled);
        }
        let opens_at = game.created_at.saturating_add(timeout);
        if now < opens_at {
            return Err(GameError::NotExpired { opens_at });
        }
        let pot = game.wager * 2;

        self.lookup_mut(id)?.settled = true;
        self.escrow.credit(&caller, pot);

        info!(game = %id, taker = %caller, pot, "game claimed after timeout");
        self.emit(GameEvent::GameClaimed { id });
        Ok(())
    }

    /// Pay the caller's internal balance out to the token ledger
    pub fn withdraw(&mut self, caller: Address) -> Result<u64, GameError> {
        let amount = self.escrow.withdraw(&caller)?;
        info!(account = %caller, amount, "balance withdrawn");
        Ok(amount)
    }

    fn lookup(&self, id: GameId) -> Result<&Game, GameError> {
        self.game(id).ok_or(GameError::UnknownGame(id))
    }

    fn lookup_mut(&mut self, id: GameId) -> Result<&mut Game, GameError> {
        id.index()
            .and_then(|i| self.games.get_mut(i))
            .ok_or(GameError::UnknownGame(id))
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
