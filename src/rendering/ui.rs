//! # User Interface Elements
//!
//! Plain data shown by presenters: the status block and the per-kind
//! wording used in menus and location descriptions.

use crate::{format_clock, format_duration, EncounterKind};
use rust_decimal::Decimal;

/// Values shown in the status block before each choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    /// Current location
    pub location: String,
    /// Experience so far in this run
    pub score: u64,
    /// Time spent so far in this run
    pub elapsed_time: Decimal,
    /// Time left before the flood
    pub time_left: Decimal,
    /// Run number within the session
    pub run: u32,
}

impl StatusView {
    /// Remaining time as `HH:MM:SS`, zero once exhausted. Hours do not wrap.
    pub fn time_left_clock(&self) -> String {
        format_duration(self.time_left)
    }

    /// Elapsed time as `HH:MM:SS`.
    pub fn elapsed_clock(&self) -> String {
        format_clock(self.elapsed_time)
    }
}

/// Verb shown before an encounter in the action menu.
///
/// Decorations get no verb.
pub fn action_prefix(kind: EncounterKind) -> Option<&'static str> {
    match kind {
        EncounterKind::Monster => Some("Attack monster"),
        EncounterKind::Boss => Some("Attack boss"),
        EncounterKind::LocationLink => Some("Go to location"),
        EncounterKind::Exit => Some("Open the hatch and leave the cave"),
        EncounterKind::Decoration => None,
    }
}

/// Noun shown before an encounter when describing a location.
pub fn description_prefix(kind: EncounterKind) -> Option<&'static str> {
    match kind {
        EncounterKind::Monster => Some("Monster:"),
        EncounterKind::Boss => Some("Boss:"),
        EncounterKind::LocationLink => Some("Passage to:"),
        EncounterKind::Exit => Some("Way out:"),
        EncounterKind::Decoration => None,
    }
}

/// Joins an optional prefix and a label with a single space.
pub fn with_prefix(prefix: Option<&str>, label: &str) -> String {
    match prefix {
        Some(prefix) => format!("{} {}", prefix, label),
        None => label.to_string(),
    }
}
