//! RPS Game Demo
//!
//! Plays a few scripted games between two accounts against an in-memory
//! token ledger and prints the engine's audit log as JSON lines.
//!
//! Environment:
//! - `RUST_LOG` - log filter (default `info`)
//! - `RPS_CLAIM_TIMEOUT_SECS` - claim timeout (default 3600)
//! - `RPS_DEMO_WAGER` - wager per game (default 100)
//! - `RPS_DEMO_STARTING_TOKENS` - tokens minted to each player (default 10000)

use rps_game_core::{
    Address, Clock, EngineConfig, GameError, GameRegistry, ManualClock, MockTokenLedger, Play,
    RevealValue, SystemClock,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Configuration
// ============================================================================

struct DemoConfig {
    engine: EngineConfig,
    wager: u64,
    starting_tokens: u64,
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Ignoring {}={:?}: {} (using {})", key, raw, e, default);
            default
        }),
        Err(_) => default,
    }
}

impl DemoConfig {
    fn from_env() -> Self {
        Self {
            engine: EngineConfig::from_env(),
            wager: env_u64("RPS_DEMO_WAGER", 100),
            starting_tokens: env_u64("RPS_DEMO_STARTING_TOKENS", 10_000),
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

struct Demo {
    registry: GameRegistry,
    token: MockTokenLedger,
    clock: ManualClock,
    alice: Address,
    bob: Address,
    wager: u64,
}

impl Demo {
    fn new(config: &DemoConfig) -> Self {
        let custody = Address::random();
        let token = MockTokenLedger::new(custody);
        let alice = Address::random();
        let bob = Address::random();
        token.mint(alice, config.starting_tokens);
        token.mint(bob, config.starting_tokens);

        // Simulated time starts at the wall clock so timestamps look real
        let clock = ManualClock::new(SystemClock.now());
        let registry = GameRegistry::new(
            Arc::new(token.clone()),
            Arc::new(clock.clone()),
            config.engine,
        );

        info!("Custody: {}", custody);
        info!("Alice:   {}", alice);
        info!("Bob:     {}", bob);

        Self {
            registry,
            token,
            clock,
            alice,
            bob,
            wager: config.wager,
        }
    }

    /// Alice commits to Paper, Bob plays Rock, Alice reveals and wins
    fn honest_game(&mut self) -> Result<(), GameError> {
        info!("--- Honest game ---");
        let secret = RevealValue::from(7);
        let id = self
            .registry
            .create(self.alice, secret.commitment(), self.wager)?;
        self.registry.join(self.bob, id, Play::Rock)?;
        let outcome = self.registry.settle(self.alice, id, secret)?;
        info!("Game {} outcome: {:?}", id, outcome);
        Ok(())
    }

    /// Alice never reveals; Bob claims once the timeout passes
    fn abandoned_game(&mut self) -> Result<(), GameError> {
        info!("--- Abandoned game ---");
        let id = self
            .registry
            .create(self.alice, RevealValue::random().commitment(), self.wager)?;
        self.registry.join(self.bob, id, Play::Scissors)?;

        match self.registry.claim(self.bob, id) {
            Err(GameError::NotExpired { opens_at }) => {
                info!("Claim not open yet (opens at {})", opens_at)
            }
            other => other?,
        }

        self.clock.advance(self.registry.config().claim_timeout_secs);
        self.registry.claim(self.bob, id)?;
        info!("Bob claimed game {}", id);
        Ok(())
    }

    /// Bob cancels an unjoined game, then reuses the refund
    fn cancel_and_reuse(&mut self) -> Result<(), GameError> {
        info!("--- Cancel and reuse ---");
        let id = self
            .registry
            .create(self.bob, RevealValue::random().commitment(), self.wager)?;
        self.registry.cancel(self.bob, id)?;

        self.token.clear_calls();
        let next = self
            .registry
            .create(self.bob, RevealValue::random().commitment(), self.wager)?;
        info!(
            "Game {} funded with {} external transfers",
            next,
            self.token.calls().len()
        );
        self.registry.cancel(self.bob, next)?;
        Ok(())
    }

    fn withdraw_all(&mut self) -> Result<(), GameError> {
        info!("--- Withdrawals ---");
        for (name, account) in [("Alice", self.alice), ("Bob", self.bob)] {
            match self.registry.withdraw(account) {
                Ok(amount) => info!("{} withdrew {}", name, amount),
                Err(GameError::ZeroBalance) => info!("{} has nothing to withdraw", name),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn print_audit_log(&mut self) {
        for event in self.registry.drain_events() {
            match event.to_json() {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to encode event: {}", e),
            }
        }
    }

    fn report_balances(&self) {
        info!(
            "Token balances: alice={} bob={}",
            self.token.tokens_of(&self.alice),
            self.token.tokens_of(&self.bob)
        );
    }
}

fn run(config: DemoConfig) -> Result<(), GameError> {
    let mut demo = Demo::new(&config);

    demo.honest_game()?;
    demo.abandoned_game()?;
    demo.cancel_and_reuse()?;
    demo.withdraw_all()?;

    demo.print_audit_log();
    demo.report_balances();
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::from_env();
    info!(
        "Claim timeout {}s, wager {}, starting tokens {}",
        config.engine.claim_timeout_secs, config.wager, config.starting_tokens
    );

    if let Err(e) = run(config) {
        error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}
