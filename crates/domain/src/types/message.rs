//! Scraped group messages

use serde::{Deserialize, Serialize};

use crate::utils::normalize::{null_as_empty, truthy_flag};

/// A message captured from an allowlisted group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default, with = "null_as_empty")]
    pub timestamp: String,
    #[serde(default, with = "null_as_empty")]
    pub group_id: String,
    #[serde(default, with = "null_as_empty")]
    pub group_name: String,
    #[serde(default, with = "null_as_empty")]
    pub sender_phone: String,
    #[serde(default, with = "null_as_empty")]
    pub sender_name: String,
    #[serde(default, with = "null_as_empty")]
    pub message_text: String,
    #[serde(default, with = "null_as_empty")]
    pub media_urls: String,
    #[serde(default, with = "null_as_empty")]
    pub media_type: String,
    /// Normalized from `"True"`/`"TRUE"`/bool on the wire
    #[serde(default, with = "truthy_flag")]
    pub has_media: bool,
    #[serde(default, with = "null_as_empty")]
    pub created_at: String,
}

impl Message {
    /// Text shown in a list cell.
    pub fn preview(&self) -> &str {
        if !self.message_text.is_empty() {
            &self.message_text
        } else if self.has_media {
            "[Media]"
        } else {
            "-"
        }
    }

    /// Group name, or the id for groups the backend has not named.
    pub fn group_label(&self) -> &str {
        if self.group_name.is_empty() {
            &self.group_id
        } else {
            &self.group_name
        }
    }

    /// First media URL, when the message carries one.
    pub fn media_url(&self) -> Option<&str> {
        if !self.has_media {
            return None;
        }
        self.media_urls.split([',', ' ']).map(str::trim).find(|url| !url.is_empty())
    }
}
