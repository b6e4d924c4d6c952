//! Group allowlist and discovery

use serde::{Deserialize, Serialize};

use crate::impl_open_tag;
use crate::utils::normalize::{lenient_count, null_as_empty};

/// Backend scraping policy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every group is scraped
    #[default]
    AllowAll,
    /// Only allowlisted groups are scraped
    Allowlist,
    /// Allowlist is empty, nothing is scraped
    AllowNone,
    Other(String),
}

impl_open_tag!(FilterMode {
    AllowAll => "allow_all",
    Allowlist => "allowlist",
    AllowNone => "allow_none",
});

impl FilterMode {
    /// Human-readable description for a status line.
    pub fn describe(&self, allowlisted: usize) -> String {
        match self {
            Self::AllowNone => "No groups selected, nothing is being scraped".to_string(),
            Self::AllowAll => "All groups are being scraped".to_string(),
            _ => format!("{allowlisted} group(s) in the allowlist are being scraped"),
        }
    }
}

/// Allowlist entry (`group_id` is the key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub group_id: String,
    #[serde(default, with = "null_as_empty")]
    pub group_name: String,
    #[serde(default, with = "null_as_empty")]
    pub added_at: String,
    #[serde(default, with = "null_as_empty")]
    pub added_by: String,
    #[serde(default, with = "null_as_empty")]
    pub notes: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Response of `GET /filter/groups`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroupList {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub filter_mode: FilterMode,
    #[serde(default)]
    pub groups: Vec<FilterGroup>,
}

impl FilterGroupList {
    pub fn contains(&self, group_id: &str) -> bool {
        self.groups.iter().any(|group| group.group_id == group_id)
    }
}

/// A group visible to the connected account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredGroup {
    pub group_id: String,
    #[serde(default, with = "null_as_empty")]
    pub group_name: String,
    #[serde(default, with = "lenient_count")]
    pub participant_count: u64,
}

impl DiscoveredGroup {
    /// Case-insensitive match on name or id; an empty needle matches all.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.group_name.to_lowercase().contains(&needle)
            || self.group_id.to_lowercase().contains(&needle)
    }
}

/// Response of `GET /filter/discover`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverGroupsResponse {
    pub success: bool,
    #[serde(default, with = "null_as_empty")]
    pub message: String,
    #[serde(default)]
    pub groups: Vec<DiscoveredGroup>,
}
