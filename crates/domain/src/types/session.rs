//! Session and connection state

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::impl_open_tag;
use crate::utils::normalize::phone_from_jid;

/// Session status tag; the backend owns the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Connected and scraping
    Working,
    /// Waiting for the operator to scan a QR code
    ScanQrCode,
    /// No session exists
    NotFound,
    Starting,
    Stopped,
    Failed,
    #[default]
    Unknown,
    Other(String),
}

impl_open_tag!(SessionStatus {
    Working => "WORKING",
    ScanQrCode => "SCAN_QR_CODE",
    NotFound => "NOT_FOUND",
    Starting => "STARTING",
    Stopped => "STOPPED",
    Failed => "FAILED",
    Unknown => "UNKNOWN",
});

impl SessionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Working)
    }

    pub fn is_awaiting_scan(&self) -> bool {
        matches!(self, Self::ScanQrCode)
    }
}

/// Identity of the account attached to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// WhatsApp id, `<phone>@<suffix>`
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "pushName", skip_serializing_if = "Option::is_none")]
    pub push_name: Option<String>,
}

impl SessionIdentity {
    pub fn phone(&self) -> Option<&str> {
        phone_from_jid(&self.id)
    }
}

/// Response of `GET /api/session`
///
/// Fields the client does not interpret are kept in `extra` so a renderer can
/// still show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionState {
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub me: Option<SessionIdentity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionState {
    /// State used when the session endpoint could not be reached.
    pub fn not_found() -> Self {
        Self { status: SessionStatus::NotFound, ..Self::default() }
    }

    pub fn phone(&self) -> Option<&str> {
        self.me.as_ref().and_then(SessionIdentity::phone)
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }
}

/// Response of `GET /api/session/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub display: Option<String>,
}
