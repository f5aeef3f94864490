//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::ssd::Strategy;

/// Configuration for the scoring engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Loop strategy. Default: flattened.
    pub strategy: Option<Strategy>,
    /// Worker threads for the parallel strategy. Default: 0 (rayon decides).
    pub threads: Option<usize>,
    /// Times to repeat the scoring pass for timing. Default: 1.
    pub repeat: Option<u32>,
}

impl EngineConfig {
    /// Returns the effective strategy, defaulting to flattened.
    pub fn effective_strategy(&self) -> Strategy {
        self.strategy.unwrap_or_default()
    }

    /// Returns the effective thread count, defaulting to 0.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    /// Returns the effective repeat count, defaulting to 1.
    pub fn effective_repeat(&self) -> u32 {
        self.repeat.unwrap_or(1)
    }
}
