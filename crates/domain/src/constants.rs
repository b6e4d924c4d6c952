//! Client constants
//!
//! Centralized location for defaults shared by the HTTP client, the pollers
//! and the configuration loader.

// Backend connection defaults
pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_API_KEY: &str = "change-me-admin-key";
/// Lowercase so it can be used as a static header name
pub const API_KEY_HEADER: &str = "x-api-key";

// Request behavior
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRIES: u32 = 1;
pub const DEFAULT_BACKOFF_UNIT_MS: u64 = 1_000;
pub const CONNECT_TIMEOUT_MS: u64 = 10_000;

// The stats endpoint aggregates from a slow store on cold start
pub const STATS_TIMEOUT_MS: u64 = 45_000;
pub const STATS_RETRIES: u32 = 2;

// Polling
pub const CONNECTIVITY_POLL_INTERVAL_MS: u64 = 15_000;
pub const QR_SCAN_POLL_INTERVAL_MS: u64 = 5_000;

// Page sizes used by the list views
pub const MESSAGES_PAGE_SIZE: u32 = 50;
pub const CONTACTS_PAGE_SIZE: u32 = 50;
pub const MEMBERS_PAGE_SIZE: u32 = 100;

// Exports
pub const DEFAULT_CSV_FILENAME: &str = "contacts.csv";

// Notes attached to groups added from the discovery list
pub const DISCOVERY_NOTES: &str = "Added from discovery";
