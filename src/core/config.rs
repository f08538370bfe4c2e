//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.shellshow/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShellshowConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub code_theme: Option<String>,
    pub line_numbers: Option<bool>,
    pub title_page: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "shellshow.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_CODE_THEME: &str = "base16-ocean.dark";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub log_file: PathBuf,
    pub log_level: String,
    pub code_theme: String,
    pub line_numbers: bool,
    pub title_page: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&ShellshowConfig::default(), &CliOverrides::default())
    }
}

/// Settings that can be forced from the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub code_theme: Option<String>,
    pub no_title_page: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.shellshow`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shellshow"))
}

/// Returns the path to `~/.shellshow/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Load config from `~/.shellshow/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShellshowConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ShellshowConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ShellshowConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] for an explicit path.
pub fn load_config_from(path: &Path) -> Result<ShellshowConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ShellshowConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ShellshowConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Shellshow Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_file = "shellshow.log"        # Relative paths resolve against the working directory
# log_level = "info"                # "error", "warn", "info", "debug", "trace" (or SHELLSHOW_LOG)

# [display]
# code_theme = "base16-ocean.dark"  # Any syntect default theme (or SHELLSHOW_THEME, --theme)
# line_numbers = true               # Line numbers in code blocks
# title_page = true                 # Show the front matter title page (--no-title-page)
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ShellshowConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &ShellshowConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Log level: env → config → default
    let log_level = env("SHELLSHOW_LOG")
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    // Theme: CLI → env → config → default
    let code_theme = cli
        .code_theme
        .clone()
        .or_else(|| env("SHELLSHOW_THEME"))
        .or_else(|| config.display.code_theme.clone())
        .unwrap_or_else(|| DEFAULT_CODE_THEME.to_string());

    // Title page: CLI can only switch it off
    let title_page = !cli.no_title_page && config.display.title_page.unwrap_or(true);

    ResolvedConfig {
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        ),
        log_level,
        code_theme,
        line_numbers: config.display.line_numbers.unwrap_or(true),
        title_page,
    }
}
