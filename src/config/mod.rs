mod schema;
mod validation;

pub use schema::{ColorMode, Config};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Get the config directory path (~/.config/evalue/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("evalue"))
}

/// Get the default config file path (~/.config/evalue/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Resolve the ledger location, expanding a leading `~/`.
pub fn ledger_path(config: &Config) -> Result<PathBuf> {
    match config.ledger_path.as_deref() {
        Some(path) => match path.strip_prefix("~/") {
            Some(rest) => Ok(dirs::home_dir()
                .context("Could not determine home directory")?
                .join(rest)),
            None => Ok(PathBuf::from(path)),
        },
        None => crate::ledger::get_ledger_path(),
    }
}
