//! # World Representation
//!
//! The flattened cave map and the pristine snapshot used to reset it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Adjacency mapping from a location to its ordered encounter tokens.
///
/// Tokens are kept raw and parsed on resolution, so a malformed token only
/// fails when the hero actually interacts with it. Looking up a location
/// that has no entry yields an empty slice, which the game treats as a
/// dead end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationGraph {
    locations: HashMap<String, Vec<String>>,
}

impl LocationGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `location` has an entry, even if it stays empty.
    pub fn register(&mut self, location: &str) {
        self.locations.entry(location.to_string()).or_default();
    }

    /// Appends an encounter token to `location`, creating the entry if needed.
    pub fn push(&mut self, location: &str, token: impl Into<String>) {
        self.locations
            .entry(location.to_string())
            .or_default()
            .push(token.into());
    }

    /// Encounter tokens at `location`, in menu order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cavern::LocationGraph;
    ///
    /// let mut graph = LocationGraph::new();
    /// graph.push("Location_0_tm0", "Mob_exp10_tm0");
    /// assert_eq!(graph.encounters("Location_0_tm0"), ["Mob_exp10_tm0"]);
    /// assert!(graph.encounters("Location_404_tm0").is_empty());
    /// ```
    pub fn encounters(&self, location: &str) -> &[String] {
        self.locations
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of encounters left at `location`.
    pub fn encounter_count(&self, location: &str) -> usize {
        self.encounters(location).len()
    }

    /// Removes the first occurrence of `token` at `location`.
    ///
    /// Returns whether anything was removed.
    pub fn remove_first(&mut self, location: &str, token: &str) -> bool {
        let Some(tokens) = self.locations.get_mut(location) else {
            return false;
        };
        match tokens.iter().position(|t| t == token) {
            Some(index) => {
                tokens.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `location` has an entry of its own.
    pub fn contains_location(&self, location: &str) -> bool {
        self.locations.contains_key(location)
    }

    /// All location keys, in no particular order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Number of locations with an entry.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Total number of encounter tokens across all locations.
    pub fn total_encounters(&self) -> usize {
        self.locations.values().map(Vec::len).sum()
    }
}

/// Immutable copy of the freshly loaded graph.
///
/// Every run starts from [`WorldSnapshot::fresh_graph`], so whatever a
/// previous run consumed comes back on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSnapshot {
    default_graph: LocationGraph,
}

impl WorldSnapshot {
    /// Captures `graph` as the default world.
    pub fn new(graph: LocationGraph) -> Self {
        Self {
            default_graph: graph,
        }
    }

    /// Read-only view of the default world.
    pub fn graph(&self) -> &LocationGraph {
        &self.default_graph
    }

    /// Deep copy of the default world for a new run.
    pub fn fresh_graph(&self) -> LocationGraph {
        self.default_graph.clone()
    }
}
