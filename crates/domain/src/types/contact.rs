//! Contacts seen in scraped messages

use serde::{Deserialize, Serialize};

use crate::utils::normalize::{lenient_count, null_as_empty};

/// A sender aggregated across all scraped messages, keyed by phone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    #[serde(default, with = "null_as_empty")]
    pub name: String,
    #[serde(default, with = "null_as_empty")]
    pub first_seen: String,
    #[serde(default, with = "null_as_empty")]
    pub last_seen: String,
    #[serde(default, with = "lenient_count")]
    pub message_count: u64,
    /// Denormalized, comma-separated group names
    #[serde(default, with = "null_as_empty")]
    pub groups: String,
}

impl Contact {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.phone
        } else {
            &self.name
        }
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.split(',').map(str::trim).filter(|name| !name.is_empty())
    }
}
