//! # Turn Loop
//!
//! Drives a session: prompt, resolve, evaluate, restart on death, and stop
//! for good on a win or a quit.

use crate::input::{parse_choice, ChoiceSource, PlayerCommand};
use crate::rendering::Presenter;
use crate::{CavernError, CavernResult, GameState, GameStatus, SessionStatistics};
use serde::Serialize;

/// How a finished session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Either [`GameStatus::Won`] or [`GameStatus::Quit`]
    pub outcome: GameStatus,
    /// Counters across all runs
    pub statistics: SessionStatistics,
    /// Number of history records written
    pub records: usize,
}

/// Coordinates the game state with player input and presentation.
pub struct GameController<S, P> {
    state: GameState,
    input: S,
    presenter: P,
}

impl<S: ChoiceSource, P: Presenter> GameController<S, P> {
    /// Creates a controller for a fresh session.
    pub fn new(state: GameState, input: S, presenter: P) -> Self {
        Self {
            state,
            input,
            presenter,
        }
    }

    /// Read access to the session state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Read access to the presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Consumes the controller, returning its parts.
    pub fn into_parts(self) -> (GameState, S, P) {
        (self.state, self.input, self.presenter)
    }

    /// Runs the session until the player wins or quits.
    ///
    /// Deaths restart the run from the default world. The history is
    /// flushed exactly once, when the session ends. A run that is already
    /// dead before its first choice would restart into the same state
    /// forever, so the session ends there as if the player had quit.
    pub fn run(&mut self) -> CavernResult<SessionSummary> {
        self.begin_run()?;

        loop {
            match self.state.status {
                GameStatus::Running => {
                    let status = self.state.evaluate_status();
                    if status.is_death() {
                        log::warn!(
                            "Run at {} is over before the first move ({:?}); ending session",
                            self.state.hero.location,
                            status
                        );
                        self.presenter.show_outcome(status)?;
                        self.state.quit();
                        self.presenter.show_outcome(GameStatus::Quit)?;
                    }
                }
                GameStatus::AwaitingChoice => self.play_turn()?,
                GameStatus::DeadTimeUp | GameStatus::DeadDeadlock => {
                    self.state.restart();
                    self.begin_run()?;
                }
                GameStatus::Won | GameStatus::Quit => return self.finish(),
            }
        }
    }

    fn begin_run(&mut self) -> CavernResult<()> {
        log::info!(
            "Run {} starting at {}",
            self.state.statistics.runs_started,
            self.state.hero.location
        );
        self.presenter.run_started(self.state.statistics.runs_started)?;
        self.presenter.show_status(&self.state.status_view())?;
        self.presenter
            .describe_location(self.state.current_encounters())?;
        Ok(())
    }

    fn play_turn(&mut self) -> CavernResult<()> {
        match self.prompt()? {
            PlayerCommand::Quit => {
                log::info!("Player quit");
                self.state.quit();
                self.presenter.show_outcome(GameStatus::Quit)?;
            }
            PlayerCommand::Resolve(choice) => {
                let previous_location = self.state.hero.location.clone();
                let event = self.state.resolve_choice(choice)?;

                self.presenter.show_event(&event)?;
                self.presenter.show_status(&self.state.status_view())?;
                if previous_location != self.state.hero.location {
                    self.presenter
                        .describe_location(self.state.current_encounters())?;
                }

                let status = self.state.evaluate_status();
                if status != GameStatus::AwaitingChoice {
                    self.presenter.show_outcome(status)?;
                }
            }
        }
        Ok(())
    }

    /// Asks until the player gives a valid choice; end of input quits.
    fn prompt(&mut self) -> CavernResult<PlayerCommand> {
        loop {
            let options = self.state.current_encounters();
            self.presenter.show_actions(options)?;

            let Some(line) = self.input.next_line()? else {
                log::warn!("Input closed, treating as quit");
                return Ok(PlayerCommand::Quit);
            };

            match parse_choice(&line, options.len()) {
                Ok(command) => return Ok(command),
                Err(CavernError::InvalidChoice(reason)) => {
                    log::debug!("Rejected choice: {}", reason);
                    self.presenter.invalid_choice(&line)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn finish(&mut self) -> CavernResult<SessionSummary> {
        self.state.flush_history()?;

        let summary = SessionSummary {
            outcome: self.state.status,
            statistics: self.state.statistics.clone(),
            records: self.state.history.len(),
        };
        log::info!(
            "Session over: {:?} after {} runs, {} turns",
            summary.outcome,
            summary.statistics.runs_started,
            summary.statistics.turns_played
        );
        self.presenter.session_ended(&summary)?;
        Ok(summary)
    }
}
