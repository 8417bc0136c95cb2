use std::fs;
use std::path::Path;

use serde_json::json;
use slicegen::config::{ConfigError, FileFormat, StateFile};
use slicegen::{generate, StateEntry};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write state file");
    path
}

#[test]
fn test_loads_toml_state_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(
        &dir,
        "state.toml",
        r#"exclude = ["legacy"]

[state]
cat = "meow"
legacy = 1
user_profile = { name = "", age = 0 }
"#,
    );

    let file = StateFile::load(&path).unwrap();
    let map = file.to_state_map();

    assert_eq!(map.get("cat"), Some(&StateEntry::Default(json!("meow"))));
    assert_eq!(map.get("legacy"), Some(&StateEntry::Excluded));

    let resources = generate(&map).unwrap();
    let names: Vec<_> = resources.reducers().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["cat", "user_profile"]);
}

#[test]
fn test_loads_json_state_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(
        &dir,
        "state.json",
        r#"{"state": {"cat": "meow", "todos": {"1": {"done": false}}}}"#,
    );

    let file = StateFile::load(&path).unwrap();
    assert!(file.exclude.is_empty());
    assert_eq!(file.state.get("todos"), Some(&json!({"1": {"done": false}})));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = StateFile::load(&dir.path().join("absent.toml"));

    match result.unwrap_err() {
        ConfigError::ReadError { path, .. } => assert!(path.ends_with("absent.toml")),
        other => panic!("Expected ReadError, got {other:?}"),
    }
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = StateFile::parse("[state\ncat =", FileFormat::Toml, Path::new("bad.toml"));
    assert!(matches!(result, Err(ConfigError::TomlError { .. })));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let result = StateFile::parse("{\"state\": ", FileFormat::Json, Path::new("bad.json"));
    assert!(matches!(result, Err(ConfigError::JsonError { .. })));
}

#[test]
fn test_empty_state_fails_validation() {
    let result = StateFile::parse("exclude = []\n", FileFormat::Toml, Path::new("empty.toml"));

    match result.unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("At least one slice"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_unknown_exclude_fails_validation() {
    let content = "exclude = [\"ghost\"]\n\n[state]\ncat = \"meow\"\n";
    let result = StateFile::parse(content, FileFormat::Toml, Path::new("s.toml"));

    match result.unwrap_err() {
        ConfigError::ValidationError { message } => assert!(message.contains("ghost")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}
