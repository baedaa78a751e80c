//! Configuration file loading with precedence handling.

use crate::model::{LayoutBounds, PanelDefaults, Size};
use crate::panel::PanelOptions;
use crate::store::{default_storage_dir, DEFAULT_STORAGE_KEY};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/floatpanel/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Narrowest panel width in pixels.
    #[serde(default)]
    pub min_width: Option<f64>,

    /// Widest panel width in pixels.
    #[serde(default)]
    pub max_width: Option<f64>,

    /// Shortest panel height in pixels.
    #[serde(default)]
    pub min_height: Option<f64>,

    /// Tallest panel height in pixels.
    #[serde(default)]
    pub max_height: Option<f64>,

    /// Lowest allowed opacity.
    #[serde(default)]
    pub min_opacity: Option<f64>,

    /// Highest allowed opacity.
    #[serde(default)]
    pub max_opacity: Option<f64>,

    /// Panel width when nothing is persisted.
    #[serde(default)]
    pub default_width: Option<f64>,

    /// Panel height when nothing is persisted.
    #[serde(default)]
    pub default_height: Option<f64>,

    /// Opacity when nothing is persisted.
    #[serde(default)]
    pub default_opacity: Option<f64>,

    /// Inset of the default position from the bottom-right corner.
    #[serde(default)]
    pub edge_margin: Option<f64>,

    /// Viewport width below which the panel goes fullscreen.
    #[serde(default)]
    pub mobile_breakpoint: Option<f64>,

    /// Storage key of the layout record.
    #[serde(default)]
    pub storage_key: Option<String>,

    /// Directory holding persisted records.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Size and opacity bounds.
    pub bounds: LayoutBounds,
    /// Layout used when nothing is persisted.
    pub defaults: PanelDefaults,
    /// Panel behaviour options.
    pub options: PanelOptions,
    /// Storage key of the layout record.
    pub storage_key: String,
    /// Directory holding persisted records.
    pub storage_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            bounds: LayoutBounds::default(),
            defaults: PanelDefaults::default(),
            options: PanelOptions::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: default_storage_dir(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/floatpanel/floatpanel.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("floatpanel").join("floatpanel.log")
    } else {
        PathBuf::from("floatpanel.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/floatpanel/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("floatpanel").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `FLOATPANEL_CONFIG` environment variable
/// 3. Default path `~/.config/floatpanel/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("FLOATPANEL_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// default. Inverted min/max pairs are swapped rather than rejected, and
/// non-finite numbers (TOML `nan`, `inf`) fall back to the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let bounds = LayoutBounds {
        min_width: config.min_width.unwrap_or(defaults.bounds.min_width),
        max_width: config.max_width.unwrap_or(defaults.bounds.max_width),
        min_height: config.min_height.unwrap_or(defaults.bounds.min_height),
        max_height: config.max_height.unwrap_or(defaults.bounds.max_height),
        min_opacity: config.min_opacity.unwrap_or(defaults.bounds.min_opacity),
        max_opacity: config.max_opacity.unwrap_or(defaults.bounds.max_opacity),
    }
    .normalized();

    let panel_defaults = PanelDefaults {
        size: Size::new(
            config.default_width.unwrap_or(defaults.defaults.size.width),
            config.default_height.unwrap_or(defaults.defaults.size.height),
        ),
        opacity: config.default_opacity.unwrap_or(defaults.defaults.opacity),
        edge_margin: config.edge_margin.unwrap_or(defaults.defaults.edge_margin),
    }
    .normalized();

    ResolvedConfig {
        bounds,
        defaults: panel_defaults,
        options: PanelOptions {
            mobile_breakpoint: config
                .mobile_breakpoint
                .unwrap_or(defaults.options.mobile_breakpoint),
        }
        .normalized(),
        storage_key: config.storage_key.unwrap_or(defaults.storage_key),
        storage_dir: config.storage_dir.unwrap_or(defaults.storage_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `FLOATPANEL_STORAGE_DIR`: Override storage directory
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(dir) = std::env::var("FLOATPANEL_STORAGE_DIR") {
        config.storage_dir = PathBuf::from(dir);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    storage_dir_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(dir) = storage_dir_override {
        config.storage_dir = dir;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
