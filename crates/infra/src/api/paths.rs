//! Endpoint paths relative to the configured base URL

pub const SESSION: &str = "/api/session";
pub const SESSION_START: &str = "/api/session/start";
pub const SESSION_RESTART: &str = "/api/session/restart";
pub const SESSION_STOP: &str = "/api/session/stop";
pub const SESSION_QR: &str = "/api/session/qr";
pub const SESSION_ME: &str = "/api/session/me";

pub const MESSAGES: &str = "/api/messages";
pub const CONTACTS: &str = "/api/contacts";
pub const GROUP_MEMBERS: &str = "/api/group-members";
pub const STATS: &str = "/api/stats";
pub const HEALTH: &str = "/health";

pub const FILTER_GROUPS: &str = "/filter/groups";
pub const FILTER_DISCOVER: &str = "/filter/discover";

pub const EXPORT_MEMBERS_CSV: &str = "/api/export/group-members/csv";
pub const EXPORT_MEMBERS_SHEET: &str = "/api/export/group-members/sheet";

pub const ACCESS_STATUS: &str = "/api/access/status";
pub const ACCESS_REQUEST: &str = "/api/access/request";

/// Allowlist entry path; the id is percent-encoded.
pub fn filter_group(group_id: &str) -> String {
    format!("{FILTER_GROUPS}/{}", urlencoding::encode(group_id))
}
