//! Configuration structures
//!
//! Values are read once at startup and injected into the client and pollers;
//! nothing mutates them afterwards.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONNECTIVITY_POLL_INTERVAL_MS, DEFAULT_API_KEY, DEFAULT_API_URL, DEFAULT_BACKOFF_UNIT_MS,
    DEFAULT_RETRIES, DEFAULT_TIMEOUT_MS, QR_SCAN_POLL_INTERVAL_MS,
};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub polling: PollingConfig,
}

/// Backend connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8001`
    pub base_url: String,
    /// Pre-shared key sent with every authenticated request
    pub api_key: String,
    /// Per-attempt timeout
    pub timeout_ms: u64,
    /// Additional attempts after the first one
    pub retries: u32,
    /// Backoff before attempt `n + 1` is `backoff_unit_ms * n`
    pub backoff_unit_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_unit_ms)
    }

    /// Base URL with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retries: DEFAULT_RETRIES,
            backoff_unit_ms: DEFAULT_BACKOFF_UNIT_MS,
        }
    }
}

// The key must never end up in logs, so Debug is written by hand.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("retries", &self.retries)
            .field("backoff_unit_ms", &self.backoff_unit_ms)
            .finish()
    }
}

/// Poll intervals for the status surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Connection gate and status banner
    pub connectivity_interval_ms: u64,
    /// QR-scan waiting screen
    pub qr_scan_interval_ms: u64,
}

impl PollingConfig {
    pub fn connectivity_interval(&self) -> Duration {
        Duration::from_millis(self.connectivity_interval_ms)
    }

    pub fn qr_scan_interval(&self) -> Duration {
        Duration::from_millis(self.qr_scan_interval_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            connectivity_interval_ms: CONNECTIVITY_POLL_INTERVAL_MS,
            qr_scan_interval_ms: QR_SCAN_POLL_INTERVAL_MS,
        }
    }
}
