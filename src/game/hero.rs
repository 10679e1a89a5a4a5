//! # Hero State
//!
//! Per-run hero state and the transition applied for each resolved encounter.

use crate::config::EXIT_SCORE_THRESHOLD;
use crate::{CavernError, CavernResult, Encounter, EncounterKind, LocationGraph};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Events produced by resolving an encounter, consumed by presentation and
/// session statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A monster or boss was defeated and removed from its location
    MonsterDefeated {
        label: String,
        reward: u64,
        cost: Decimal,
    },
    /// The hero walked to another location
    LocationChanged {
        from: String,
        to: String,
        cost: Decimal,
    },
    /// The hatch opened
    Escaped { label: String, cost: Decimal },
    /// The hatch stayed shut because the score is too low
    ExitLocked {
        label: String,
        cost: Decimal,
        score: u64,
        required: u64,
    },
    /// Nothing to interact with
    Inert { label: String },
}

/// Mutable state of the hero for a single run.
///
/// A fresh instance is built for every run; the state is never rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroState {
    /// Current location key
    pub location: String,
    /// Time spent so far in this run
    pub elapsed_time: Decimal,
    /// Experience collected so far in this run
    pub score: u64,
    /// Set once the hatch has been opened
    pub exit_opened: bool,
}

impl HeroState {
    /// Creates a hero standing at `start_location` with nothing spent or earned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cavern::HeroState;
    ///
    /// let hero = HeroState::new("Location_0_tm0");
    /// assert_eq!(hero.score, 0);
    /// assert!(hero.elapsed_time.is_zero());
    /// assert!(!hero.exit_opened);
    /// ```
    pub fn new(start_location: impl Into<String>) -> Self {
        Self {
            location: start_location.into(),
            elapsed_time: Decimal::ZERO,
            score: 0,
            exit_opened: false,
        }
    }

    /// Applies one encounter to the hero and the live graph.
    ///
    /// Monsters and bosses add their reward and cost, then the first
    /// matching token is removed from the current location. Location links
    /// add their cost and move the hero; the link stays. The hatch adds its
    /// cost and opens only if the score has reached the threshold; it is
    /// never consumed. Decorations change nothing.
    ///
    /// Fails with [`CavernError::TimeOverflow`] before touching anything
    /// if the new elapsed time would leave the decimal range.
    pub fn apply(
        &mut self,
        encounter: &Encounter,
        graph: &mut LocationGraph,
    ) -> CavernResult<GameEvent> {
        let elapsed_time = self
            .elapsed_time
            .checked_add(encounter.cost)
            .ok_or_else(|| {
                CavernError::TimeOverflow(format!(
                    "{} after {}s already spent",
                    encounter.label, self.elapsed_time
                ))
            })?;

        let event = match encounter.kind {
            EncounterKind::Monster | EncounterKind::Boss => {
                let reward = encounter.reward.unwrap_or(0);
                self.score = self.score.saturating_add(reward);
                self.elapsed_time = elapsed_time;
                if !graph.remove_first(&self.location, &encounter.label) {
                    log::warn!(
                        "{} defeated but not found at {}",
                        encounter.label,
                        self.location
                    );
                }
                GameEvent::MonsterDefeated {
                    label: encounter.label.clone(),
                    reward,
                    cost: encounter.cost,
                }
            }
            EncounterKind::LocationLink => {
                self.elapsed_time = elapsed_time;
                let to = encounter
                    .target_location
                    .clone()
                    .unwrap_or_else(|| encounter.label.clone());
                let from = std::mem::replace(&mut self.location, to.clone());
                GameEvent::LocationChanged {
                    from,
                    to,
                    cost: encounter.cost,
                }
            }
            EncounterKind::Exit => {
                self.elapsed_time = elapsed_time;
                if self.score >= EXIT_SCORE_THRESHOLD {
                    self.exit_opened = true;
                    GameEvent::Escaped {
                        label: encounter.label.clone(),
                        cost: encounter.cost,
                    }
                } else {
                    GameEvent::ExitLocked {
                        label: encounter.label.clone(),
                        cost: encounter.cost,
                        score: self.score,
                        required: EXIT_SCORE_THRESHOLD,
                    }
                }
            }
            EncounterKind::Decoration => GameEvent::Inert {
                label: encounter.label.clone(),
            },
        };
        Ok(event)
    }

    /// Time remaining before the flood, may be negative.
    pub fn time_left(&self, budget: Decimal) -> Decimal {
        budget - self.elapsed_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const START: &str = "Location_0_tm0";

    fn graph_with(tokens: &[&str]) -> LocationGraph {
        let mut graph = LocationGraph::new();
        graph.register(START);
        for token in tokens {
            graph.push(START, *token);
        }
        graph
    }

    fn apply(hero: &mut HeroState, graph: &mut LocationGraph, label: &str) -> GameEvent {
        let encounter = Encounter::parse(label).unwrap();
        hero.apply(&encounter, graph).unwrap()
    }

    #[test]
    fn test_defeat_monster() {
        let mut graph = graph_with(&["Mob_exp10_tm20", "Hatch_tm1.0"]);
        let mut hero = HeroState::new(START);

        let event = apply(&mut hero, &mut graph, "Mob_exp10_tm20");

        assert_eq!(hero.score, 10);
        assert_eq!(hero.elapsed_time, Decimal::from(20));
        assert_eq!(graph.encounters(START), ["Hatch_tm1.0"]);
        assert!(matches!(event, GameEvent::MonsterDefeated { reward: 10, .. }));
    }

    #[test]
    fn test_defeat_duplicate_removes_one() {
        let mut graph = graph_with(&["Boss_exp40_tm50", "Boss_exp40_tm50"]);
        let mut hero = HeroState::new(START);

        apply(&mut hero, &mut graph, "Boss_exp40_tm50");

        assert_eq!(graph.encounter_count(START), 1);
        assert_eq!(hero.score, 40);
    }

    #[test]
    fn test_change_location_keeps_link() {
        let mut graph = graph_with(&["Location_1_tm1040"]);
        let mut hero = HeroState::new(START);

        let event = apply(&mut hero, &mut graph, "Location_1_tm1040");

        assert_eq!(hero.location, "Location_1_tm1040");
        assert_eq!(hero.elapsed_time, Decimal::from(1040));
        assert_eq!(graph.encounter_count(START), 1);
        assert_eq!(
            event,
            GameEvent::LocationChanged {
                from: START.to_string(),
                to: "Location_1_tm1040".to_string(),
                cost: Decimal::from(1040),
            }
        );
    }

    #[test]
    fn test_hatch_stays_locked_below_threshold() {
        let mut graph = graph_with(&["Hatch_tm5.5"]);
        let mut hero = HeroState::new(START);
        hero.score = EXIT_SCORE_THRESHOLD - 1;

        let event = apply(&mut hero, &mut graph, "Hatch_tm5.5");

        assert!(!hero.exit_opened);
        assert_eq!(hero.elapsed_time, Decimal::from_str("5.5").unwrap());
        assert_eq!(graph.encounter_count(START), 1);
        assert!(matches!(event, GameEvent::ExitLocked { required: 280, .. }));
    }

    #[test]
    fn test_hatch_opens_at_threshold() {
        let mut graph = graph_with(&["Hatch_tm5.0"]);
        let mut hero = HeroState::new(START);
        hero.score = EXIT_SCORE_THRESHOLD;

        let event = apply(&mut hero, &mut graph, "Hatch_tm5.0");

        assert!(hero.exit_opened);
        assert_eq!(graph.encounter_count(START), 1);
        assert!(matches!(event, GameEvent::Escaped { .. }));
    }

    #[test]
    fn test_decoration_is_noop() {
        let mut graph = graph_with(&["Old_Bones"]);
        let mut hero = HeroState::new(START);
        let before = hero.clone();

        let event = apply(&mut hero, &mut graph, "Old_Bones");

        assert_eq!(hero, before);
        assert_eq!(graph.encounter_count(START), 1);
        assert_eq!(
            event,
            GameEvent::Inert {
                label: "Old_Bones".to_string()
            }
        );
    }

    #[test]
    fn test_overflowing_cost_leaves_state_untouched() {
        let token = "Boss_exp300_tm50000000000000000000000000000";
        let mut graph = graph_with(&[token, token]);
        let mut hero = HeroState::new(START);
        apply(&mut hero, &mut graph, token);
        let before = hero.clone();

        let encounter = Encounter::parse(token).unwrap();
        let result = hero.apply(&encounter, &mut graph);

        assert!(matches!(result, Err(CavernError::TimeOverflow(_))));
        assert_eq!(hero, before);
        assert_eq!(graph.encounter_count(START), 1);
    }

    #[test]
    fn test_time_left_can_go_negative() {
        let mut hero = HeroState::new(START);
        hero.elapsed_time = Decimal::from(10);
        assert_eq!(hero.time_left(Decimal::from(8)), Decimal::from(-2));
    }
}
