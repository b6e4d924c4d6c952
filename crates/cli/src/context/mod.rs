//! Application context - dependency injection container

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use wadash_core::{AccessPort, SessionPort};
use wadash_domain::Config;
use wadash_infra::{config, ApiClient};

/// Resolved configuration plus the shared API client.
pub struct AppContext {
    pub config: Config,
    pub api: Arc<ApiClient>,
    /// Print raw JSON instead of tables
    pub json: bool,
}

impl AppContext {
    /// Loads configuration and builds the client.
    pub fn new(config_path: Option<PathBuf>, json: bool) -> anyhow::Result<Self> {
        let config = config::load(config_path).context("Failed to load configuration")?;
        let api = ApiClient::new(config.api.clone()).context("Failed to build API client")?;

        tracing::debug!(base_url = %config.api.normalized_base_url(), "Context ready");

        Ok(Self { config, api: Arc::new(api), json })
    }

    pub fn session_port(&self) -> Arc<dyn SessionPort> {
        self.api.clone()
    }

    pub fn access_port(&self) -> Arc<dyn AccessPort> {
        self.api.clone()
    }
}
