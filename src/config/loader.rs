//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "JLV_CONFIG";
/// Environment variable overriding `tab_size`.
pub const TAB_SIZE_ENV: &str = "JLV_TAB_SIZE";
/// Environment variable overriding `scroll_margin`.
pub const SCROLL_MARGIN_ENV: &str = "JLV_SCROLL_MARGIN";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Config file exists but could not be read.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
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
/// All fields are optional; anything left out falls back to the defaults.
/// Corresponds to `~/.config/jlv/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Columns per tab stop.
    #[serde(default)]
    pub tab_size: Option<usize>,

    /// Rows kept between the cursor and the window edge.
    #[serde(default)]
    pub scroll_margin: Option<usize>,

    /// Colorize lines by log level.
    #[serde(default)]
    pub color: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Columns per tab stop, at least 1.
    pub tab_size: usize,
    /// Rows kept between the cursor and the window edge.
    pub scroll_margin: usize,
    /// Colorize lines by log level.
    pub color: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            scroll_margin: 3,
            color: true,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/jlv/jlv.log` on Linux, or the platform state
/// directory elsewhere. Falls back to the current directory when there is
/// no state directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("jlv").join("jlv.log")
    } else {
        PathBuf::from("jlv.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

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
/// Returns `~/.config/jlv/config.toml` on Linux, the platform config
/// directory elsewhere, or `None` when there is none.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jlv").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `JLV_CONFIG` environment variable
/// 3. Default path `~/.config/jlv/config.toml`
///
/// Missing config files are not errors.
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        tab_size: config.tab_size.unwrap_or(defaults.tab_size).max(1),
        scroll_margin: config.scroll_margin.unwrap_or(defaults.scroll_margin),
        color: config.color.unwrap_or(defaults.color),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `JLV_TAB_SIZE` and `JLV_SCROLL_MARGIN`. Values that are not
/// non-negative integers are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(tab_size) = env_usize(TAB_SIZE_ENV) {
        config.tab_size = tab_size.max(1);
    }

    if let Some(margin) = env_usize(SCROLL_MARGIN_ENV) {
        config.scroll_margin = margin;
    }

    config
}

fn env_usize(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring non-numeric environment override");
            None
        }
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually set
/// are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    tab_size_override: Option<usize>,
    scroll_margin_override: Option<usize>,
    color_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(tab_size) = tab_size_override {
        config.tab_size = tab_size.max(1);
    }

    if let Some(margin) = scroll_margin_override {
        config.scroll_margin = margin;
    }

    if let Some(color) = color_override {
        config.color = color;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
