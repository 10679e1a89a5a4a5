//! Integration test to ensure a session can start from a map file on disk.

use cavern::{
    load_map_file, CavernError, CavernResult, GameConfig, GameState, GameStatus, HeroState,
};
use std::io::Write;
use tempfile::NamedTempFile;

const CAVE_MAP: &str = r#"{
    "Location_0_tm0": [
        "Mob_exp10_tm0",
        {"Location_1_tm1040": [
            "Mob_exp10_tm10",
            {"Location_B2_tm2000": ["Boss_exp280_tm50", "Hatch_tm159.098765432"]}
        ]},
        {"Location_2_tm33300": ["Mob_exp40_tm50", "Mob_exp40_tm50"]}
    ]
}"#;

fn write_map(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp map");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp map");
    file
}

#[test]
fn test_basic_startup() -> CavernResult<()> {
    let map = write_map(CAVE_MAP);
    let graph = load_map_file(map.path())?;

    assert_eq!(graph.location_count(), 4);
    assert_eq!(
        graph.encounters("Location_0_tm0"),
        ["Mob_exp10_tm0", "Location_1_tm1040", "Location_2_tm33300"]
    );

    let mut state = GameState::new(graph, GameConfig::default())?;

    assert_eq!(state.hero, HeroState::new("Location_0_tm0"));
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.evaluate_status(), GameStatus::AwaitingChoice);
    assert_eq!(state.current_encounters().len(), 3);

    Ok(())
}

#[test]
fn test_walk_to_the_hatch() -> CavernResult<()> {
    let map = write_map(CAVE_MAP);
    let mut state = GameState::new(load_map_file(map.path())?, GameConfig::default())?;

    state.resolve_choice(2)?; // Location_1_tm1040
    state.resolve_choice(2)?; // Location_B2_tm2000
    assert_eq!(state.hero.location, "Location_B2_tm2000");

    state.resolve_choice(1)?; // Boss_exp280_tm50
    assert_eq!(state.hero.score, 280);
    assert_eq!(state.current_encounters(), ["Hatch_tm159.098765432"]);

    state.resolve_choice(1)?;
    assert!(state.hero.exit_opened);
    assert_eq!(state.evaluate_status(), GameStatus::Won);
    assert_eq!(state.hero.elapsed_time.to_string(), "3249.098765432");
    assert_eq!(state.history.len(), 4);

    Ok(())
}

#[test]
fn test_missing_map_file() {
    let result = load_map_file("/definitely/not/a/cave.json");
    assert!(matches!(result, Err(CavernError::Io(_))));
}

#[test]
fn test_malformed_map_file() {
    let map = write_map(r#"{"Location_0_tm0": ["Mob_exp10_tm0", 7]}"#);
    let result = load_map_file(map.path());
    assert!(matches!(result, Err(CavernError::MapFormat(_))));
}
