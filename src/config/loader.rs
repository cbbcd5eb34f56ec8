//! Configuration loading and discovery for `pxfill.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PxfillConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "pxfill.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxfill.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output scale factor
    pub scale: Option<u32>,
    /// Override strict mode
    pub strict: Option<bool>,
    /// Override stroke thickness
    pub thickness: Option<u32>,
}

/// Find pxfill.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pxfill.toml
/// 2. Check XDG_CONFIG_HOME/pxfill/pxfill.toml (or ~/.config/pxfill/pxfill.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pxfill.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pxfill").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find pxfill.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pxfill.toml file.
///
/// If a path is provided, loads from that file (a missing file is an error).
/// Otherwise, uses [`find_config`]; when nothing is found the defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<PxfillConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(PxfillConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<PxfillConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PxfillConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PxfillConfig, overrides: &CliOverrides) {
    if let Some(scale) = overrides.scale {
        config.output.scale = scale;
    }

    if let Some(strict) = overrides.strict {
        config.output.strict = strict;
    }

    if let Some(thickness) = overrides.thickness {
        config.stroke.thickness = thickness;
    }
}
