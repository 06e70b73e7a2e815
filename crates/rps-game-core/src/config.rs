//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Seconds after creation before a taker may claim an unrevealed game
pub const DEFAULT_CLAIM_TIMEOUT_SECS: u64 = 3600;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub claim_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            claim_timeout_secs: DEFAULT_CLAIM_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    /// Read overrides from the environment
    ///
    /// `RPS_CLAIM_TIMEOUT_SECS` sets the claim timeout. Unparseable values
    /// are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("RPS_CLAIM_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => config.claim_timeout_secs = secs,
                Err(e) => tracing::warn!(
                    "Ignoring RPS_CLAIM_TIMEOUT_SECS={:?}: {} (using {})",
                    raw,
                    e,
                    config.claim_timeout_secs
                ),
            }
        }

        config
    }
}
