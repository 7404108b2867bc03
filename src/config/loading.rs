//! Configuration loading and saving.
//!
//! Handles path resolution (default XDG location or a `--config` override),
//! default file creation and the validated load.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::Config;
use super::validation::{clamp_entry_brightness, validate_config};
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
///
/// Can only be called once. Returns an error if already set.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Path of `brightcurve.toml`, honoring the `--config` override.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = CONFIG_DIR.get().and_then(|d| d.clone()) {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// Creates a default configuration file if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        super::builder::create_default_config(&config_path, None)
            .context("Failed to create default config during load")?;
        log_block_start!("Created default configuration");
        log_indented!("{}", private_path(&config_path));
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load configuration from a specific path.
///
/// Unlike [`load`], this never creates a file.
pub fn load_from_path(path: &PathBuf) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found at {}", private_path(path));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    clamp_entry_brightness(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Write `config` back to `path`, replacing the file.
///
/// Comments in the original file are not preserved.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    validate_config(config)?;

    let body = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    let content = format!("# Rewritten by brightcurve after each schedule edit\n\n{body}");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    // Write a sibling file and rename it over the target
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write {}", private_path(&tmp_path)))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace {}", private_path(path)))?;

    Ok(())
}

/// Display a path with the home directory shortened to `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}
