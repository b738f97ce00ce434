//! JSON configuration loading tests

use delve::{DelveError, DelveResult, GameConfig, GameSession, GenerationConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_partial_config_fills_defaults() -> DelveResult<()> {
    let file = write_config(
        r#"{
            "generation": { "seed": 77, "width": 48, "height": 36, "max_rooms": 7 },
            "progression": { "base_enemies": 4 }
        }"#,
    );
    let config = GameConfig::from_json_file(file.path())?;

    assert_eq!(config.generation.seed, 77);
    assert_eq!(config.generation.width, 48);
    assert_eq!(config.generation.height, 36);
    assert_eq!(config.generation.max_rooms, 7);
    assert_eq!(config.generation.min_rooms, GenerationConfig::default().min_rooms);
    assert_eq!(config.progression.base_enemies, 4);
    assert_eq!(config.progression.min_treasures_for_victory, 2);
    Ok(())
}

#[test]
fn test_saved_config_round_trips_through_a_file() -> DelveResult<()> {
    let original = GameConfig {
        generation: GenerationConfig::for_large_maps(5),
        ..GameConfig::default()
    };
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("delve.json");
    std::fs::write(&path, original.to_json()?)?;

    let loaded = GameConfig::from_json_file(&path)?;
    assert_eq!(loaded, original);

    let mut session = GameSession::new(loaded)?;
    session.start_new_game()?;
    assert!(session.dungeon().room_count() >= 1);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = GameConfig::from_json_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(DelveError::Io(_))));
}

#[test]
fn test_malformed_json_is_serde_error() {
    let file = write_config("{ \"generation\": [1, 2");
    let result = GameConfig::from_json_file(file.path());
    assert!(matches!(result, Err(DelveError::Serde(_))));
}

#[test]
fn test_unplayable_config_is_rejected() {
    let file = write_config(r#"{ "generation": { "width": 4, "height": 4 } }"#);
    let result = GameConfig::from_json_file(file.path());
    assert!(matches!(result, Err(DelveError::InvalidConfig(_))));

    let file = write_config(r#"{ "generation": { "max_room_size": 4294967295 } }"#);
    let result = GameConfig::from_json_file(file.path());
    assert!(matches!(result, Err(DelveError::InvalidConfig(_))));

    let file = write_config(r#"{ "generation": { "room_buffer": 2147483648 } }"#);
    let result = GameConfig::from_json_file(file.path());
    assert!(matches!(result, Err(DelveError::InvalidConfig(_))));

    let file = write_config(r#"{ "progression": { "base_enemies": 50, "max_enemies": 10 } }"#);
    let result = GameConfig::from_json_file(file.path());
    assert!(matches!(result, Err(DelveError::InvalidConfig(_))));
}
