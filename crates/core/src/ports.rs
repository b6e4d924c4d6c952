//! Backend ports for the admin dashboard.
//!
//! Each trait groups the operations one screen needs. The HTTP client in
//! `wadash-infra` implements all of them; tests substitute in-memory fakes.
//!
//! # Example
//!
//! ```no_run
//! use wadash_core::DataPort;
//! use wadash_domain::ListQuery;
//!
//! async fn first_page_total(api: &impl DataPort) -> u64 {
//!     api.messages(&ListQuery::messages()).await.map(|page| page.total).unwrap_or(0)
//! }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use wadash_domain::{
    AccessGrant, AccessRequestResult, ActionResult, Contact, CopyToSheetResult, CurrentUser,
    DiscoverGroupsResponse, FilterGroupList, GroupMembersPage, HealthReport,
    ListQuery, Message, PagedResult, Result, SessionControlResponse, SessionState, Stats,
};

/// Session lifecycle and connectivity.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Current session state (`GET /api/session`).
    async fn session(&self) -> Result<SessionState>;

    async fn start_session(&self) -> Result<SessionControlResponse>;

    async fn restart_session(&self) -> Result<SessionControlResponse>;

    async fn stop_session(&self) -> Result<SessionControlResponse>;

    async fn delete_session(&self) -> Result<SessionControlResponse>;

    /// Pairing QR code as raw image bytes.
    async fn qr_code(&self) -> Result<Vec<u8>>;

    /// Connected account summary (`GET /api/session/me`).
    async fn current_user(&self) -> Result<CurrentUser>;
}

/// Read-only scraped data and backend diagnostics.
#[async_trait]
pub trait DataPort: Send + Sync {
    async fn messages(&self, query: &ListQuery) -> Result<PagedResult<Message>>;

    /// `group_id` on the query is ignored by this endpoint.
    async fn contacts(&self, query: &ListQuery) -> Result<PagedResult<Contact>>;

    async fn group_members(&self, query: &ListQuery) -> Result<GroupMembersPage>;

    async fn stats(&self) -> Result<Stats>;

    /// Unauthenticated liveness probe.
    async fn health(&self) -> Result<HealthReport>;
}

/// Group allowlist management.
#[async_trait]
pub trait AllowlistPort: Send + Sync {
    async fn filter_groups(&self) -> Result<FilterGroupList>;

    async fn add_filter_group(
        &self,
        group_id: &str,
        group_name: &str,
        notes: &str,
    ) -> Result<ActionResult>;

    /// Hard-deletes the entry; `group_id` may contain reserved URL characters.
    async fn remove_filter_group(&self, group_id: &str) -> Result<ActionResult>;

    /// Groups the connected account belongs to.
    async fn discover_groups(&self) -> Result<DiscoverGroupsResponse>;
}

/// Member exports.
#[async_trait]
pub trait ExportPort: Send + Sync {
    /// Downloads the member CSV into `dest_dir` and returns the written path.
    ///
    /// The file name comes from the server's `Content-Disposition` header.
    /// Nothing is left in `dest_dir` when the export fails.
    async fn export_group_members_csv(
        &self,
        group_id: Option<&str>,
        dest_dir: &Path,
    ) -> Result<PathBuf>;

    async fn copy_group_members_to_sheet(
        &self,
        group_id: Option<&str>,
        tab_name: Option<&str>,
    ) -> Result<CopyToSheetResult>;
}

/// Spreadsheet access provisioning.
#[async_trait]
pub trait AccessPort: Send + Sync {
    /// Fails with `DashError::Parse` when the backend reports a grant with
    /// missing fields.
    async fn access_status(&self) -> Result<AccessGrant>;

    async fn request_sheet_access(&self, email: &str) -> Result<AccessRequestResult>;
}
