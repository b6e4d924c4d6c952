//! Spreadsheet access provisioning

use serde::{Deserialize, Serialize};

use crate::errors::DashError;

/// Wire shape of `GET /api/access/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessStatus {
    pub has_access: bool,
    #[serde(default)]
    pub spreadsheet_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Spreadsheet access for the operator's data
///
/// The nullable wire fields are only meaningful together, so they are folded
/// into a single variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccessGrant {
    Granted { spreadsheet_url: String, email: String, created_at: String },
    NotGranted,
}

impl AccessGrant {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}

impl TryFrom<AccessStatus> for AccessGrant {
    type Error = DashError;

    fn try_from(status: AccessStatus) -> Result<Self, Self::Error> {
        match (status.has_access, status.spreadsheet_url, status.email, status.created_at) {
            (true, Some(spreadsheet_url), Some(email), Some(created_at)) => {
                Ok(Self::Granted { spreadsheet_url, email, created_at })
            }
            (false, None, None, None) => Ok(Self::NotGranted),
            (has_access, ..) => Err(DashError::Parse(format!(
                "access status is partially populated (has_access = {has_access})"
            ))),
        }
    }
}

impl From<AccessRequestResult> for AccessGrant {
    fn from(result: AccessRequestResult) -> Self {
        Self::Granted {
            spreadsheet_url: result.spreadsheet_url,
            email: result.email,
            created_at: result.created_at,
        }
    }
}

/// Response of `POST /api/access/request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequestResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub spreadsheet_url: String,
    pub email: String,
    #[serde(default)]
    pub created_at: String,
}
