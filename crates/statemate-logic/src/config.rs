//! Game rules configuration.
//!
//! `GameConfig::default()` is the standard five-round game. A JSON rules
//! file may override any subset of fields; missing fields keep their
//! defaults. Out-of-range stats are clamped on load, structural values
//! (round count, round length, roster size) are validated.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{rounds, roster};
use crate::stats::{StatDelta, StatVector};

/// Single-player or council (multiplayer) voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Solo,
    Council,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Fixed seed for reproducible games; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub rounds: u8,
    pub round_seconds: u8,
    pub initial_stats: StatVector,
    pub decay: StatDelta,
    /// Computer seats in council mode. Ignored in solo mode.
    pub simulated_participants: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Solo,
            seed: None,
            rounds: rounds::ROUND_COUNT,
            round_seconds: rounds::ROUND_SECONDS,
            initial_stats: StatVector::initial(),
            decay: StatDelta::DECAY,
            simulated_participants: roster::SIMULATED_PARTICIPANTS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rules JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a game needs at least one round")]
    NoRounds,
    #[error("round length must be at least one second")]
    ZeroRoundLength,
    #[error("too many simulated participants: {found} (max {max})")]
    TooManyParticipants { found: u8, max: u8 },
}

impl GameConfig {
    /// Council game with the default roster.
    pub fn council() -> Self {
        Self {
            mode: GameMode::Council,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.round_seconds == 0 {
            return Err(ConfigError::ZeroRoundLength);
        }
        if self.simulated_participants > roster::MAX_SIMULATED_PARTICIPANTS {
            return Err(ConfigError::TooManyParticipants {
                found: self.simulated_participants,
                max: roster::MAX_SIMULATED_PARTICIPANTS,
            });
        }
        Ok(())
    }

    pub fn is_council(&self) -> bool {
        self.mode == GameMode::Council
    }
}
