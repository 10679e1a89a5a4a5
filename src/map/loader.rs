//! # Map Loading
//!
//! Flattens the nested JSON cave description into a [`LocationGraph`].
//!
//! A map document is an object of lists. Each list element is either an
//! encounter token or a nested object describing locations reachable from
//! the enclosing key:
//!
//! ```json
//! {"Location_0_tm0": [
//!     "Mob_exp10_tm0",
//!     {"Location_1_tm1040": ["Mob_exp10_tm10", "Hatch_tm159.098765432"]}
//! ]}
//! ```
//!
//! Every key of a nested object is appended to its parent's list as a
//! location link and then registered with its own encounters.

use crate::{CavernError, CavernResult, LocationGraph};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Reads and flattens the map stored at `path`.
pub fn load_map_file(path: impl AsRef<Path>) -> CavernResult<LocationGraph> {
    let path = path.as_ref();
    log::debug!("Reading map from {}", path.display());
    let raw = fs::read_to_string(path)?;
    load_map_str(&raw)
}

/// Parses and flattens a map document held in memory.
///
/// # Examples
///
/// ```
/// use cavern::load_map_str;
///
/// let graph = load_map_str(r#"{"Location_0_tm0": ["Mob_exp10_tm0", {"Location_1_tm5": []}]}"#).unwrap();
/// assert_eq!(graph.encounters("Location_0_tm0"), ["Mob_exp10_tm0", "Location_1_tm5"]);
/// assert!(graph.contains_location("Location_1_tm5"));
/// ```
pub fn load_map_str(raw: &str) -> CavernResult<LocationGraph> {
    let document: Value = serde_json::from_str(raw)?;
    flatten_map(&document)
}

/// Flattens an already parsed map document.
///
/// The root must be an object; every value must be a list; every list
/// element must be a string or an object. Anything else is a
/// [`CavernError::MapFormat`].
pub fn flatten_map(document: &Value) -> CavernResult<LocationGraph> {
    let root = document
        .as_object()
        .ok_or_else(|| CavernError::MapFormat("map root must be an object".to_string()))?;

    let mut graph = LocationGraph::new();
    flatten_node(root, &mut graph)?;

    log::info!(
        "Loaded map with {} locations and {} encounters",
        graph.location_count(),
        graph.total_encounters()
    );
    Ok(graph)
}

fn flatten_node(node: &Map<String, Value>, graph: &mut LocationGraph) -> CavernResult<()> {
    for (key, value) in node {
        let elements = value.as_array().ok_or_else(|| {
            CavernError::MapFormat(format!(
                "value of `{}` must be a list, found {}",
                key,
                json_type_name(value)
            ))
        })?;

        graph.register(key);
        for element in elements {
            match element {
                Value::String(token) => graph.push(key, token.as_str()),
                Value::Object(nested) => {
                    for nested_key in nested.keys() {
                        graph.push(key, nested_key.as_str());
                    }
                    // Recursion depth is bounded by the document's nesting.
                    flatten_node(nested, graph)?;
                }
                other => {
                    return Err(CavernError::MapFormat(format!(
                        "elements of `{}` must be strings or objects, found {}",
                        key,
                        json_type_name(other)
                    )));
                }
            }
        }
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
