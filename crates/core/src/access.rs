//! Spreadsheet access provisioning flow
//!
//! The access card is only shown while an account is connected. The status is
//! loaded once; a failed load leaves the card hidden rather than showing an
//! error. Requesting access replaces the status with the granted sheet.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use wadash_domain::{AccessGrant, DashError, Result};

use crate::ports::AccessPort;

/// Trims the address and rejects an empty one before any request is sent.
pub fn validate_email(raw: &str) -> Result<String> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(DashError::InvalidInput("Email is required".to_string()));
    }
    Ok(email.to_string())
}

/// Result of a successful access request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequestOutcome {
    /// Backend confirmation, shown to the operator verbatim.
    pub message: String,
    pub grant: AccessGrant,
}

pub struct AccessFlow {
    port: Arc<dyn AccessPort>,
    grant: Option<AccessGrant>,
}

impl AccessFlow {
    pub fn new(port: Arc<dyn AccessPort>) -> Self {
        Self { port, grant: None }
    }

    /// Known grant; `None` until loaded or when the load failed.
    pub fn grant(&self) -> Option<&AccessGrant> {
        self.grant.as_ref()
    }

    /// Loads the access status when connected. Disconnected operators never
    /// hit the endpoint.
    #[instrument(skip(self))]
    pub async fn load(&mut self, connected: bool) -> Option<&AccessGrant> {
        if !connected {
            return None;
        }
        match self.port.access_status().await {
            Ok(grant) => self.grant = Some(grant),
            Err(err) => warn!(error = %err, "Failed to load access status"),
        }
        self.grant.as_ref()
    }

    /// Requests spreadsheet access for `email`.
    #[instrument(skip(self, email))]
    pub async fn request(&mut self, email: &str) -> Result<AccessRequestOutcome> {
        let email = validate_email(email)?;
        let result = self.port.request_sheet_access(&email).await?;
        info!("Spreadsheet access granted");

        let message = result.message.clone();
        let grant = AccessGrant::from(result);
        self.grant = Some(grant.clone());
        Ok(AccessRequestOutcome { message, grant })
    }
}
