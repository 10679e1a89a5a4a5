//! # Game State Module
//!
//! Session-wide state: the live cave, the hero of the current run, the
//! pristine world used for restarts, and everything that outlives a run.
//!
//! [`GameState`] owns the live [`LocationGraph`] exclusively. A restart
//! replaces it wholesale with a fresh copy from the [`WorldSnapshot`] and
//! builds a new [`HeroState`]; the [`HistoryLog`] and the
//! [`SessionStatistics`] keep accumulating.

use crate::{
    CavernError, CavernResult, Encounter, GameConfig, GameEvent, HeroState, HistoryLog,
    LocationGraph, StatusView, WorldSnapshot,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where the turn loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// A run has just started and has not been evaluated yet
    Running,
    /// Waiting for the player's next choice
    AwaitingChoice,
    /// The flood arrived; the run restarts
    DeadTimeUp,
    /// Nothing left to do at the current location; the run restarts
    DeadDeadlock,
    /// The hatch is open; the session ends
    Won,
    /// The player gave up; the session ends
    Quit,
}

impl GameStatus {
    /// Whether this status ends the current run with a restart.
    pub fn is_death(self) -> bool {
        matches!(self, GameStatus::DeadTimeUp | GameStatus::DeadDeadlock)
    }

    /// Whether this status ends the whole session.
    pub fn is_session_end(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Quit)
    }
}

/// Counters spanning every run of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatistics {
    /// Runs started, including the first one
    pub runs_started: u32,
    /// Runs lost to the flood
    pub deaths_time_up: u32,
    /// Runs lost to a dead end
    pub deaths_deadlock: u32,
    /// Turns resolved across all runs
    pub turns_played: u64,
    /// Monsters and bosses defeated across all runs
    pub monsters_defeated: u64,
    /// Location changes across all runs
    pub locations_visited: u64,
    /// Hatch attempts, successful or not
    pub exit_attempts: u64,
}

impl SessionStatistics {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a resolved encounter.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        self.turns_played += 1;
        match event {
            GameEvent::MonsterDefeated { .. } => self.monsters_defeated += 1,
            GameEvent::LocationChanged { .. } => self.locations_visited += 1,
            GameEvent::Escaped { .. } | GameEvent::ExitLocked { .. } => self.exit_attempts += 1,
            GameEvent::Inert { .. } => {}
        }
    }

    /// Total runs that ended in death.
    pub fn deaths(&self) -> u32 {
        self.deaths_time_up + self.deaths_deadlock
    }
}

/// Central game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    snapshot: WorldSnapshot,
    /// Live cave for the current run
    pub graph: LocationGraph,
    /// Hero of the current run
    pub hero: HeroState,
    /// Every resolved turn of the session
    pub history: HistoryLog,
    /// Counters across all runs
    pub statistics: SessionStatistics,
    /// Current turn loop status
    pub status: GameStatus,
}

impl GameState {
    /// Starts a session on `graph`, which becomes the default world.
    ///
    /// # Examples
    ///
    /// ```
    /// use cavern::{load_map_str, GameConfig, GameState, GameStatus};
    ///
    /// let graph = load_map_str(r#"{"Location_0_tm0": ["Mob_exp10_tm0"]}"#).unwrap();
    /// let state = GameState::new(graph, GameConfig::default()).unwrap();
    /// assert_eq!(state.hero.location, "Location_0_tm0");
    /// assert_eq!(state.status, GameStatus::Running);
    /// ```
    pub fn new(graph: LocationGraph, config: GameConfig) -> CavernResult<Self> {
        config.validate()?;
        if !graph.contains_location(&config.start_location) {
            log::warn!(
                "Start location {} has no entry in the map",
                config.start_location
            );
        }

        let snapshot = WorldSnapshot::new(graph);
        let mut statistics = SessionStatistics::new();
        statistics.runs_started = 1;

        Ok(Self {
            graph: snapshot.fresh_graph(),
            hero: HeroState::new(config.start_location.clone()),
            snapshot,
            config,
            history: HistoryLog::new(),
            statistics,
            status: GameStatus::Running,
        })
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The pristine world every run starts from.
    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }

    /// Encounter tokens at the hero's location, in menu order.
    pub fn current_encounters(&self) -> &[String] {
        self.graph.encounters(&self.hero.location)
    }

    /// Time remaining before the flood, may be negative.
    pub fn time_left(&self) -> Decimal {
        self.hero.time_left(self.config.time_budget)
    }

    /// Snapshot of the values shown in the status block.
    pub fn status_view(&self) -> StatusView {
        StatusView {
            location: self.hero.location.clone(),
            score: self.hero.score,
            elapsed_time: self.hero.elapsed_time,
            time_left: self.time_left(),
            run: self.statistics.runs_started,
        }
    }

    /// Resolves the encounter at 1-based menu position `choice`.
    ///
    /// The encounter token is parsed here, so a malformed token surfaces
    /// as [`CavernError::MalformedEncounter`] the first time it is chosen.
    /// Every resolved turn is appended to the history.
    pub fn resolve_choice(&mut self, choice: usize) -> CavernResult<GameEvent> {
        let label = choice
            .checked_sub(1)
            .and_then(|index| self.current_encounters().get(index))
            .cloned()
            .ok_or_else(|| {
                CavernError::InvalidChoice(format!(
                    "{} is not an encounter at {}",
                    choice, self.hero.location
                ))
            })?;

        let encounter = Encounter::parse(&label)?;
        let event = self.hero.apply(&encounter, &mut self.graph)?;
        log::debug!(
            "Resolved {} ({}): score={} elapsed={}",
            encounter.label,
            encounter.kind,
            self.hero.score,
            self.hero.elapsed_time
        );

        self.history.record(&self.hero.location, self.hero.score);
        self.statistics.update_from_event(&event);
        Ok(event)
    }

    /// Evaluates the current run and stores the resulting status.
    ///
    /// Checks run in order: time up, then dead end, then open hatch. The
    /// first match wins; otherwise the game awaits the next choice.
    pub fn evaluate_status(&mut self) -> GameStatus {
        let status = if self.time_left() <= Decimal::ZERO {
            GameStatus::DeadTimeUp
        } else if self.graph.encounter_count(&self.hero.location) == 0 {
            GameStatus::DeadDeadlock
        } else if self.hero.exit_opened {
            GameStatus::Won
        } else {
            GameStatus::AwaitingChoice
        };

        if status != self.status {
            match status {
                GameStatus::DeadTimeUp => self.statistics.deaths_time_up += 1,
                GameStatus::DeadDeadlock => self.statistics.deaths_deadlock += 1,
                _ => {}
            }
            log::debug!("Status {:?} -> {:?}", self.status, status);
        }
        self.status = status;
        status
    }

    /// Begins a new run from the default world.
    ///
    /// History and statistics are kept.
    pub fn restart(&mut self) {
        log::info!(
            "Run {} ended with {:?}; restarting from {}",
            self.statistics.runs_started,
            self.status,
            self.config.start_location
        );
        self.graph = self.snapshot.fresh_graph();
        self.hero = HeroState::new(self.config.start_location.clone());
        self.statistics.runs_started += 1;
        self.status = GameStatus::Running;
    }

    /// Marks the session as abandoned by the player.
    pub fn quit(&mut self) {
        self.status = GameStatus::Quit;
    }

    /// Writes the session history to the configured path.
    pub fn flush_history(&self) -> CavernResult<()> {
        self.history.flush(&self.config.history_path)
    }
}
