//! Game rule configuration.
//!
//! Rules load from a JSON file where every field is optional and falls back
//! to the traditional game, and can be overridden one at a time by name
//! through the protocol's `setoption` command.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::movegen::FinishRule;

/// Errors raised while loading or updating a rule configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },

    #[error("pieces per player must be between 1 and {max}, got {got}")]
    PieceCount { got: u32, max: u32 },

    #[error("stick flat probability must be between 0 and 1, got {0}")]
    FlatProbability(f64),
}

/// Upper bound on pieces per player, so a full stack fits a stack level.
pub const MAX_PIECES: u32 = 16;

/// Tunable rules of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Pieces each player must bring home to win.
    pub pieces_per_player: u32,
    /// How arrivals at the finishing hub score.
    pub finish_rule: FinishRule,
    /// Capturing an opposing stack earns another throw.
    pub capture_bonus: bool,
    /// Chance that a single stick lands flat side up.
    pub flat_probability: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            pieces_per_player: 4,
            finish_rule: FinishRule::Pass,
            capture_bonus: true,
            flat_probability: 0.5,
        }
    }
}

impl RulesConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pieces_per_player == 0 || self.pieces_per_player > MAX_PIECES {
            return Err(ConfigError::PieceCount {
                got: self.pieces_per_player,
                max: MAX_PIECES,
            });
        }
        if !(0.0..=1.0).contains(&self.flat_probability) {
            return Err(ConfigError::FlatProbability(self.flat_probability));
        }
        Ok(())
    }

    /// Applies a named option as sent by `setoption`.
    ///
    /// Recognised names: `Pieces`, `FinishRule`, `CaptureBonus`, `StickBias`.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name {
            "Pieces" => {
                let n: u32 = value.parse().map_err(|_| invalid())?;
                let mut next = self.clone();
                next.pieces_per_player = n;
                next.validate()?;
                *self = next;
            }
            "FinishRule" => {
                self.finish_rule = FinishRule::from_name(value).ok_or_else(invalid)?;
            }
            "CaptureBonus" => {
                self.capture_bonus = value.parse().map_err(|_| invalid())?;
            }
            "StickBias" => {
                let mut next = self.clone();
                next.flat_probability = value.parse().map_err(|_| invalid())?;
                next.validate()?;
                *self = next;
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}
