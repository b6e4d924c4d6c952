//! Acknowledgements returned by action endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic `{success, message}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn default_success() -> bool {
    true
}

/// Response of `POST /api/export/group-members/sheet`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyToSheetResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tab_name: String,
    #[serde(default)]
    pub row_count: u64,
}

/// Session control endpoints answer with a backend-defined object.
pub type SessionControlResponse = Map<String, Value>;
