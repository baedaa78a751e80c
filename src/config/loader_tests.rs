//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_floatpanel_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("floatpanel") && path_str.ends_with("config.toml"),
        "Path should contain 'floatpanel' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("floatpanel_test_config.toml");

    let toml_content = r#"
min_width = 200
max_width = 800.5
default_width = 360
mobile_breakpoint = 640
storage_key = "chat-panel"
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.min_width, Some(200.0));
    assert_eq!(config.max_width, Some(800.5));
    assert_eq!(config.default_width, Some(360.0));
    assert_eq!(config.mobile_breakpoint, Some(640.0));
    assert_eq!(config.storage_key, Some("chat-panel".to_string()));
    assert_eq!(config.max_height, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("floatpanel_test_invalid.toml");
    fs::write(&config_path, "min_width = [unclosed").expect("Failed to write test config");

    let result = load_config_file(&config_path);

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a ParseError, got: {:?}",
        result
    );
    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = env::temp_dir().join("floatpanel_test_unknown_key.toml");
    fs::write(&config_path, "theme = \"dark\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_reports_read_error_for_directory() {
    let dir = env::temp_dir().join("floatpanel_test_config_is_dir");
    fs::create_dir_all(&dir).expect("Failed to create dir");

    let result = load_config_file(&dir);

    assert!(
        matches!(result, Err(ConfigError::ReadError { .. })),
        "Reading a directory should be a ReadError, got: {:?}",
        result
    );
    fs::remove_dir_all(dir).ok();
}

// ===== Precedence Tests =====

#[test]
#[serial(env)]
fn explicit_path_wins_over_env_var() {
    let explicit = env::temp_dir().join("floatpanel_test_explicit.toml");
    let from_env = env::temp_dir().join("floatpanel_test_from_env.toml");
    fs::write(&explicit, "storage_key = \"explicit\"\n").expect("write");
    fs::write(&from_env, "storage_key = \"env\"\n").expect("write");
    env::set_var("FLOATPANEL_CONFIG", &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .expect("valid")
        .expect("present");

    env::remove_var("FLOATPANEL_CONFIG");
    assert_eq!(config.storage_key, Some("explicit".to_string()));
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(env)]
fn env_var_path_used_without_explicit_path() {
    let from_env = env::temp_dir().join("floatpanel_test_env_only.toml");
    fs::write(&from_env, "edge_margin = 8\n").expect("write");
    env::set_var("FLOATPANEL_CONFIG", &from_env);

    let config = load_config_with_precedence(None)
        .expect("valid")
        .expect("present");

    env::remove_var("FLOATPANEL_CONFIG");
    assert_eq!(config.edge_margin, Some(8.0));
    fs::remove_file(from_env).ok();
}

// ===== merge_config Tests =====

#[test]
fn merge_none_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_applies_present_fields_only() {
    let file = ConfigFile {
        max_width: Some(720.0),
        default_height: Some(420.0),
        mobile_breakpoint: Some(600.0),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.bounds.max_width, 720.0);
    assert_eq!(resolved.bounds.min_width, 280.0);
    assert_eq!(resolved.defaults.size, Size::new(320.0, 420.0));
    assert_eq!(resolved.options.mobile_breakpoint, 600.0);
    assert_eq!(resolved.storage_key, DEFAULT_STORAGE_KEY);
}

#[test]
fn merge_swaps_inverted_bounds() {
    let file = ConfigFile {
        min_height: Some(700.0),
        max_height: Some(300.0),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.bounds.min_height, 300.0);
    assert_eq!(resolved.bounds.max_height, 700.0);
}

#[test]
fn merge_replaces_non_finite_numbers_with_defaults() {
    let config: ConfigFile = toml::from_str(
        "edge_margin = nan\ndefault_width = nan\ndefault_opacity = inf\nmobile_breakpoint = nan\nmin_height = -inf",
    )
    .expect("TOML accepts nan and inf");

    let resolved = merge_config(Some(config));

    assert_eq!(resolved.defaults, PanelDefaults::default());
    assert_eq!(resolved.options, PanelOptions::default());
    assert_eq!(resolved.bounds, LayoutBounds::default());
}

#[test]
fn non_finite_config_still_loads_a_finite_layout() {
    use crate::model::Viewport;
    use crate::store::{LayoutSettingsStore, MemoryStorage};

    let config: ConfigFile = toml::from_str("edge_margin = nan\ndefault_width = nan")
        .expect("TOML accepts nan");
    let resolved = merge_config(Some(config));
    let store = LayoutSettingsStore::with_options(
        MemoryStorage::new(),
        resolved.storage_key,
        resolved.bounds,
        resolved.defaults,
    );
    let viewport = Viewport::new(1200.0, 800.0);

    let loaded = store.load(viewport);

    assert!(loaded.position.x.is_finite() && loaded.position.y.is_finite());
    assert!(loaded.is_within(viewport, &resolved.bounds));
    assert_eq!(loaded.position, crate::model::Point::new(856.0, 392.0));
}

// ===== Override Tests =====

#[test]
#[serial(env)]
fn env_override_sets_storage_dir() {
    env::set_var("FLOATPANEL_STORAGE_DIR", "/tmp/floatpanel-env-store");

    let resolved = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("FLOATPANEL_STORAGE_DIR");
    assert_eq!(resolved.storage_dir, PathBuf::from("/tmp/floatpanel-env-store"));
}

#[test]
fn cli_override_wins_over_everything() {
    let mut base = ResolvedConfig::default();
    base.storage_dir = PathBuf::from("/from/env");

    let resolved = apply_cli_overrides(base, Some(PathBuf::from("/from/cli")));

    assert_eq!(resolved.storage_dir, PathBuf::from("/from/cli"));
}

#[test]
fn cli_override_absent_keeps_value() {
    let mut base = ResolvedConfig::default();
    base.storage_dir = PathBuf::from("/from/file");

    let resolved = apply_cli_overrides(base, None);

    assert_eq!(resolved.storage_dir, PathBuf::from("/from/file"));
}

#[test]
fn default_log_path_ends_with_floatpanel_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("floatpanel.log"),
        "Default log path should end with 'floatpanel.log', got: {:?}",
        path
    );
}
