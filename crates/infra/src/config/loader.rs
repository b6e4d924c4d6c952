//! Configuration loader
//!
//! ## Precedence
//! 1. Built-in defaults (`wadash_domain::Config::default()`)
//! 2. A TOML or JSON file, either given explicitly or found by
//!    [`probe_config_paths`]; missing keys keep their defaults
//! 3. Environment variables
//!
//! ## Environment Variables
//! - `WADASH_API_URL`: Backend base URL
//! - `WADASH_API_KEY`: Admin API key
//! - `WADASH_TIMEOUT_MS`: Per-attempt request timeout
//! - `WADASH_RETRIES`: Additional attempts after the first
//! - `WADASH_BACKOFF_MS`: Backoff unit between attempts
//! - `WADASH_POLL_INTERVAL_MS`: Connectivity poll interval
//! - `WADASH_QR_POLL_INTERVAL_MS`: QR-scan poll interval
//!
//! Unset or empty variables are ignored.
//!
//! ## File Locations
//! `wadash.toml`, `wadash.json`, `config.toml` and `config.json`, first in
//! the current working directory and then in its parent.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use wadash_domain::{Config, DashError, Result};

pub const ENV_API_URL: &str = "WADASH_API_URL";
pub const ENV_API_KEY: &str = "WADASH_API_KEY";
pub const ENV_TIMEOUT_MS: &str = "WADASH_TIMEOUT_MS";
pub const ENV_RETRIES: &str = "WADASH_RETRIES";
pub const ENV_BACKOFF_MS: &str = "WADASH_BACKOFF_MS";
pub const ENV_POLL_INTERVAL_MS: &str = "WADASH_POLL_INTERVAL_MS";
pub const ENV_QR_POLL_INTERVAL_MS: &str = "WADASH_QR_POLL_INTERVAL_MS";

const CONFIG_FILE_NAMES: [&str; 4] = ["wadash.toml", "wadash.json", "config.toml", "config.json"];

/// Load configuration with defaults, file and environment merged.
///
/// `explicit_path` must exist when given. Without it the standard locations
/// are probed and running without any file is fine.
///
/// # Errors
/// Returns `DashError::Config` if the file cannot be read or parsed, or an
/// environment variable holds an invalid number.
pub fn load(explicit_path: Option<PathBuf>) -> Result<Config> {
    let mut config = match explicit_path {
        Some(path) => load_from_file(&path)?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(&path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env(&mut config)?;
    tracing::debug!(api = ?config.api, polling = ?config.polling, "Configuration resolved");
    Ok(config)
}

/// Load configuration from a file
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `DashError::Config` if the file is missing, unreadable or invalid.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(DashError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| DashError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DashError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DashError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(DashError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Overlay environment variables onto `config`.
///
/// # Errors
/// Returns `DashError::Config` naming the variable when a number is invalid.
pub fn apply_env(config: &mut Config) -> Result<()> {
    if let Some(url) = env_value(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(key) = env_value(ENV_API_KEY) {
        config.api.api_key = key;
    }
    if let Some(timeout) = env_number(ENV_TIMEOUT_MS)? {
        config.api.timeout_ms = timeout;
    }
    if let Some(retries) = env_number(ENV_RETRIES)? {
        config.api.retries = retries;
    }
    if let Some(backoff) = env_number(ENV_BACKOFF_MS)? {
        config.api.backoff_unit_ms = backoff;
    }
    if let Some(interval) = env_number(ENV_POLL_INTERVAL_MS)? {
        config.polling.connectivity_interval_ms = interval;
    }
    if let Some(interval) = env_number(ENV_QR_POLL_INTERVAL_MS)? {
        config.polling.qr_scan_interval_ms = interval;
    }
    Ok(())
}

/// First existing config file in the current directory or its parent.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_from(&cwd)
}

fn probe_from(dir: &Path) -> Option<PathBuf> {
    std::iter::once(dir)
        .chain(dir.parent())
        .flat_map(|base| CONFIG_FILE_NAMES.iter().map(move |name| base.join(name)))
        .find(|path| path.is_file())
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_number<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_value(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| DashError::Config(format!("Invalid value for {key} ({raw:?}): {e}")))
        })
        .transpose()
}
