//! # Cavern
//!
//! A single-player, turn-based cave escape. The hero walks a graph of
//! locations, fights monsters for experience and must open the hatch before
//! the flood arrives.
//!
//! ## Architecture Overview
//!
//! - **Map**: flattens the nested JSON map into a [`LocationGraph`]
//! - **Game**: encounter parsing, hero transitions, session state and the
//!   turn loop with restart on death
//! - **History**: the session-wide play log, written as CSV at the end
//! - **Input**: validated menu choices from stdin or a script
//! - **Rendering**: console presentation behind the [`Presenter`] trait
//!
//! ## Runs and Sessions
//!
//! A run ends when time runs out or the hero reaches a dead end; the cave
//! is then reset from its snapshot and a new run begins. The session only
//! ends when the player opens the hatch or quits.

pub mod game;
pub mod history;
pub mod input;
pub mod map;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use history::*;
pub use input::*;
pub use map::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Cavern game engine.
#[derive(thiserror::Error, Debug)]
pub enum CavernError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The map file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the history file failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The map document has the wrong shape
    #[error("Malformed map: {0}")]
    MapFormat(String),

    /// An encounter token does not match its kind's pattern
    #[error("Malformed encounter `{label}`: {reason}")]
    MalformedEncounter { label: String, reason: String },

    /// A menu choice was out of range or not a number
    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    /// Elapsed time no longer fits the decimal range
    #[error("Time overflow: {0}")]
    TimeOverflow(String),

    /// Configuration value is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Cavern codebase.
pub type CavernResult<T> = Result<T, CavernError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    use rust_decimal::Decimal;

    /// Location every run starts at
    pub const DEFAULT_START_LOCATION: &str = "Location_0_tm0";

    /// Experience needed to open the hatch
    pub const EXIT_SCORE_THRESHOLD: u64 = 280;

    /// Default output path of the session history
    pub const DEFAULT_HISTORY_PATH: &str = "dungeon.csv";

    /// Seconds until the flood: 123456.0987654321
    pub fn default_time_budget() -> Decimal {
        Decimal::new(1_234_560_987_654_321, 10)
    }
}
