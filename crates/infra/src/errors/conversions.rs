//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use tempfile::PersistError;
use wadash_domain::DashError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DashError);

impl From<InfraError> for DashError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DashError> for InfraError {
    fn from(value: DashError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDashError {
    fn into_dash(self) -> DashError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DashError */
/* -------------------------------------------------------------------------- */

impl IntoDashError for HttpError {
    fn into_dash(self) -> DashError {
        if self.is_timeout() {
            return DashError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return DashError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return DashError::Config(format!("invalid request: {}", self.without_url()));
        }

        if self.is_decode() {
            return DashError::Parse(self.without_url().to_string());
        }

        DashError::Network(self.without_url().to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_dash())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → DashError */
/* -------------------------------------------------------------------------- */

impl IntoDashError for JsonError {
    fn into_dash(self) -> DashError {
        DashError::Parse(format!("unexpected response body: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_dash())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / tempfile::PersistError → DashError */
/* -------------------------------------------------------------------------- */

impl IntoDashError for IoError {
    fn into_dash(self) -> DashError {
        DashError::Io(format!("{:?}: {}", self.kind(), self))
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_dash())
    }
}

// Dropping the returned `NamedTempFile` deletes the staged file.
impl IntoDashError for PersistError {
    fn into_dash(self) -> DashError {
        let PersistError { error, file } = self;
        drop(file);
        DashError::Io(format!("failed to persist export: {error}"))
    }
}

impl From<PersistError> for InfraError {
    fn from(value: PersistError) -> Self {
        InfraError(value.into_dash())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
