//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.notesnap/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sink::{Backend, DEFAULT_PROGRAM};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotesnapConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub command: CommandConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub backend: Option<Backend>,
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CommandConfig {
    pub program: Option<String>,
    pub vault: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub width: Option<u16>,
    pub title_placeholder: Option<String>,
    pub body_placeholder: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_TITLE_PLACEHOLDER: &str = "Title";
pub const DEFAULT_BODY_PLACEHOLDER: &str = "Extra context/links";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub backend: Backend,
    /// Raw destination; empty when nothing was configured.
    pub note: String,
    pub program: String,
    pub vault: Option<String>,
    pub width: u16,
    pub title_placeholder: String,
    pub body_placeholder: String,
}

/// Values taken from the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend: Option<Backend>,
    pub note: Option<String>,
    pub program: Option<String>,
    pub vault: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No destination note in CLI, env or config file (or only whitespace).
    MissingDestination,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingDestination => write!(
                f,
                "no destination note: pass --note-path, set NOTESNAP_NOTE, or set general.note in the config file"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.notesnap`.
pub fn notesnap_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".notesnap"))
}

/// Returns the path to `~/.notesnap/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    notesnap_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.notesnap/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NotesnapConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NotesnapConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NotesnapConfig::default());
        }
    };

    load_config_from(&path)
}

/// Load config from an explicit path (same first-run behavior as `load_config`).
pub fn load_config_from(path: &Path) -> Result<NotesnapConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(NotesnapConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NotesnapConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# notesnap configuration
# All settings are optional. Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# backend = "file"                 # "file" or "command"   (env: NOTESNAP_BACKEND)
# note = "~/notes/inbox.md"        # path, or note name for the command backend (env: NOTESNAP_NOTE)

# [command]
# program = "obsidian-cli"         # env: NOTESNAP_PROGRAM
# vault = "Personal"               # env: NOTESNAP_VAULT

# [ui]
# width = 80
# title_placeholder = "Title"
# body_placeholder = "Extra context/links"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NotesnapConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as `resolve`, reading environment variables through `env`.
pub fn resolve_with_env(
    config: &NotesnapConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Backend: CLI → env → config → default
    let backend = cli
        .backend
        .or_else(|| env("NOTESNAP_BACKEND").and_then(|v| parse_backend(&v)))
        .or(config.general.backend)
        .unwrap_or_default();

    // Destination: CLI → env → config
    let note = cli
        .note
        .clone()
        .or_else(|| env("NOTESNAP_NOTE"))
        .or_else(|| config.general.note.clone())
        .unwrap_or_default();

    let program = cli
        .program
        .clone()
        .or_else(|| env("NOTESNAP_PROGRAM"))
        .or_else(|| config.command.program.clone())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    let vault = cli
        .vault
        .clone()
        .or_else(|| env("NOTESNAP_VAULT"))
        .or_else(|| config.command.vault.clone())
        .filter(|v| !v.trim().is_empty());

    ResolvedConfig {
        backend,
        note,
        program,
        vault,
        width: config.ui.width.unwrap_or(DEFAULT_WIDTH).max(10),
        title_placeholder: config
            .ui
            .title_placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE_PLACEHOLDER.to_string()),
        body_placeholder: config
            .ui
            .body_placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_BODY_PLACEHOLDER.to_string()),
    }
}

fn parse_backend(value: &str) -> Option<Backend> {
    match value.trim().to_ascii_lowercase().as_str() {
        "file" => Some(Backend::File),
        "command" => Some(Backend::Command),
        other => {
            warn!("Ignoring unknown NOTESNAP_BACKEND value: {}", other);
            None
        }
    }
}

impl ResolvedConfig {
    /// Reject configurations the form cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.note.trim().is_empty() {
            return Err(ConfigError::MissingDestination);
        }
        Ok(())
    }
}
