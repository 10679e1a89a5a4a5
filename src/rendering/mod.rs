//! # Rendering Module
//!
//! Console presentation of the game.
//!
//! The turn loop talks to a [`Presenter`]; [`ConsolePresenter`] is the
//! terminal implementation. Wording is free-form, but the structure is
//! fixed: a status block before each choice, and a numbered action list
//! with `0` meaning quit.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::{CavernResult, GameEvent, GameStatus, SessionSummary};

/// Output side of the turn loop.
pub trait Presenter {
    /// A run begins; `run` counts from 1.
    fn run_started(&mut self, run: u32) -> CavernResult<()>;

    /// Status block: location, score and time.
    fn show_status(&mut self, status: &StatusView) -> CavernResult<()>;

    /// Lists what the hero sees at a newly entered location.
    fn describe_location(&mut self, encounters: &[String]) -> CavernResult<()>;

    /// Numbered action menu; `0` always quits.
    fn show_actions(&mut self, encounters: &[String]) -> CavernResult<()>;

    /// The last input was rejected.
    fn invalid_choice(&mut self, raw: &str) -> CavernResult<()>;

    /// Narrates a resolved encounter.
    fn show_event(&mut self, event: &GameEvent) -> CavernResult<()>;

    /// Narrates a status that ends the run or the session.
    fn show_outcome(&mut self, status: GameStatus) -> CavernResult<()>;

    /// The session is over.
    fn session_ended(&mut self, summary: &SessionSummary) -> CavernResult<()>;
}
