//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for wadash
///
/// `Network`, `Timeout` and `Api` come out of the HTTP primitive and are all
/// retryable. `Parse` means the server answered but the body did not have the
/// expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DashError {
    /// The request never reached the server or no response came back.
    #[error("Network error: {0}")]
    Network(String),

    /// A single attempt exceeded its deadline.
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashError {
    /// Whether the HTTP primitive spends retry budget on this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout { .. } | Self::Api { .. })
    }

    /// HTTP status for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for a toast or status line.
    ///
    /// Server-provided messages are shown verbatim. Transport failures get a
    /// generic description that never includes request details.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Network(_) => "Backend unreachable".to_string(),
            Self::Timeout { .. } => "Backend did not respond in time".to_string(),
            Self::Parse(_) => "Unexpected response from backend".to_string(),
            other => other.to_string(),
        }
    }

    /// Stable label suitable for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Timeout { .. } => "timeout",
            Self::Api { .. } => "api",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Io(_) => "io",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for wadash operations
pub type Result<T> = std::result::Result<T, DashError>;
