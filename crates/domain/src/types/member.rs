//! Group membership rows synced from allowlisted groups

use serde::{Deserialize, Serialize};

use super::paging::PagedResult;
use crate::impl_open_tag;
use crate::utils::normalize::{lenient_count, null_as_empty};

/// Participant role; the backend may introduce new values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MemberRole {
    #[default]
    Member,
    Admin,
    SuperAdmin,
    Other(String),
}

impl_open_tag!(MemberRole {
    Member => "member",
    Admin => "admin",
    SuperAdmin => "superadmin",
});

impl MemberRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

/// One participant of one group (`phone` + `group_id` is the key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub phone: String,
    #[serde(default, with = "null_as_empty")]
    pub name: String,
    pub group_id: String,
    #[serde(default, with = "null_as_empty")]
    pub group_name: String,
    #[serde(default)]
    pub role: MemberRole,
    /// Linked id used by newer WhatsApp clients
    #[serde(default, with = "null_as_empty")]
    pub lid: String,
    #[serde(default, with = "null_as_empty")]
    pub synced_at: String,
}

/// Per-group member totals returned next to the member page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group_id: String,
    #[serde(default, with = "null_as_empty")]
    pub group_name: String,
    #[serde(default, with = "lenient_count")]
    pub member_count: u64,
}

/// Member page plus the summary of every synced group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMembersPage {
    #[serde(flatten)]
    pub page: PagedResult<GroupMember>,
    #[serde(default)]
    pub groups_summary: Vec<GroupSummary>,
}
