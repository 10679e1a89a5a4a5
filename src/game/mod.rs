//! # Game Module
//!
//! The simulation engine: encounters, the cave graph, the hero, the
//! session state and the turn loop that drives them.
//!
//! This module contains the fundamental building blocks of Cavern:
//! - Encounter token parsing
//! - World representation and the reset snapshot
//! - Hero state transitions
//! - Session state, status evaluation and restarts
//! - The turn loop controller

pub mod controller;
pub mod encounter;
pub mod hero;
pub mod state;
pub mod world;

pub use controller::*;
pub use encounter::*;
pub use hero::*;
pub use state::*;
pub use world::*;

use crate::config::{default_time_budget, DEFAULT_HISTORY_PATH, DEFAULT_START_LOCATION};
use crate::{CavernError, CavernResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a game session.
///
/// # Examples
///
/// ```
/// use cavern::GameConfig;
/// use rust_decimal::Decimal;
///
/// let config = GameConfig::default().with_budget(Decimal::from(100));
/// assert_eq!(config.start_location, "Location_0_tm0");
/// assert_eq!(config.time_budget, Decimal::from(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Location every run starts at
    pub start_location: String,
    /// Total time allowed per run, in seconds
    #[serde(with = "rust_decimal::serde::str")]
    pub time_budget: Decimal,
    /// Where the session history is written
    pub history_path: PathBuf,
}

impl GameConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            start_location: DEFAULT_START_LOCATION.to_string(),
            time_budget: default_time_budget(),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }

    /// Replaces the time budget.
    pub fn with_budget(mut self, time_budget: Decimal) -> Self {
        self.time_budget = time_budget;
        self
    }

    /// Replaces the start location.
    pub fn with_start_location(mut self, start_location: impl Into<String>) -> Self {
        self.start_location = start_location.into();
        self
    }

    /// Replaces the history output path.
    pub fn with_history_path(mut self, history_path: impl Into<PathBuf>) -> Self {
        self.history_path = history_path.into();
        self
    }

    /// Checks the configuration for values no run could use.
    pub fn validate(&self) -> CavernResult<()> {
        if self.time_budget.is_sign_negative() {
            return Err(CavernError::InvalidConfig(format!(
                "time budget must not be negative, got {}",
                self.time_budget
            )));
        }
        if self.start_location.is_empty() {
            return Err(CavernError::InvalidConfig(
                "start location must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(
            config.time_budget,
            Decimal::from_str("123456.0987654321").unwrap()
        );
        assert_eq!(config.history_path, PathBuf::from("dungeon.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_budget_rejected() {
        let config = GameConfig::default().with_budget(Decimal::from(-1));
        assert!(matches!(
            config.validate(),
            Err(CavernError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_start_rejected() {
        let config = GameConfig::default().with_start_location("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serializes_budget_exactly() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"123456.0987654321\""));
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
