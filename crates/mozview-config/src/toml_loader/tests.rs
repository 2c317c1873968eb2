//! Tests for TOML config loading and creation.

use super::*;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_mozview_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[view]
private_mode = true
width = 800.0
height = 600.0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!(config.view.private_mode);
    assert_eq!(config.view.width, 800.0);
    assert_eq!(config.view.height, 600.0);
    // Defaults preserved
    assert!(config.view.accelerated);
    assert!(config.view.focus_on_complete);
    assert_eq!(config.logging.level, crate::LogLevel::Info);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[view]
width = 100000.0
private_mode = true
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.view.width, 0.0);
    assert!(!config.view.private_mode);
}

#[test]
fn create_default_config_writes_parseable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert!(config.view.accelerated);
}

#[test]
fn default_config_path_ends_with_mozview() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("mozview/config.toml"));
    }
}
