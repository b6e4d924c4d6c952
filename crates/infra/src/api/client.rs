use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, instrument};
use wadash_core::{validate_email, AccessPort, AllowlistPort, DataPort, ExportPort, SessionPort};
use wadash_domain::constants::{CONNECT_TIMEOUT_MS, STATS_RETRIES, STATS_TIMEOUT_MS};
use wadash_domain::{
    AccessGrant, AccessRequestResult, AccessStatus, ActionResult, ApiConfig, Contact,
    CopyToSheetResult, CurrentUser, DashError, DiscoverGroupsResponse, FilterGroupList,
    GroupMembersPage, HealthReport, ListQuery, Message, PagedResult, Result,
    SessionControlResponse, SessionState, Stats,
};

use super::paths;
use crate::errors::InfraError;
use crate::export::{filename_from_disposition, persist_csv};
use crate::http::{HttpClient, RequestOptions};

#[derive(Serialize)]
struct AddFilterGroupBody<'a> {
    group_id: &'a str,
    group_name: &'a str,
    notes: &'a str,
}

#[derive(Serialize)]
struct CopyToSheetBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tab_name: Option<&'a str>,
}

#[derive(Serialize)]
struct AccessRequestBody<'a> {
    email: &'a str,
}

/// Admin API client implementing every backend port.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Builds a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns `DashError::Config` when the API key is not a valid header
    /// value or the HTTP client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = HttpClient::builder(config)
            .user_agent(concat!("wadash/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_millis(CONNECT_TIMEOUT_MS))
            .build()?;
        Ok(Self { http })
    }


    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.http.request_json(path, RequestOptions::get()).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body).map_err(InfraError::from)?;
        self.http.request_json(path, RequestOptions::post().json(body)).await
    }

    /// Control endpoints may answer with an empty body.
    async fn session_control(
        &self,
        options: RequestOptions,
        path: &str,
    ) -> Result<SessionControlResponse> {
        let response: Option<SessionControlResponse> =
            self.http.request_json(path, options).await?;
        Ok(response.unwrap_or_default())
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
        include_group: bool,
    ) -> Result<T> {
        let options = RequestOptions::get().queries(query.params(include_group));
        self.http.request_json(path, options).await
    }
}

#[async_trait]
impl SessionPort for ApiClient {
    #[instrument(skip(self))]
    async fn session(&self) -> Result<SessionState> {
        self.get(paths::SESSION).await
    }

    #[instrument(skip(self))]
    async fn start_session(&self) -> Result<SessionControlResponse> {
        self.session_control(RequestOptions::post(), paths::SESSION_START).await
    }

    #[instrument(skip(self))]
    async fn restart_session(&self) -> Result<SessionControlResponse> {
        self.session_control(RequestOptions::post(), paths::SESSION_RESTART).await
    }

    #[instrument(skip(self))]
    async fn stop_session(&self) -> Result<SessionControlResponse> {
        self.session_control(RequestOptions::post(), paths::SESSION_STOP).await
    }

    #[instrument(skip(self))]
    async fn delete_session(&self) -> Result<SessionControlResponse> {
        self.session_control(RequestOptions::delete(), paths::SESSION).await
    }

    #[instrument(skip(self))]
    async fn qr_code(&self) -> Result<Vec<u8>> {
        self.http.request_bytes(paths::SESSION_QR, RequestOptions::get()).await
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<CurrentUser> {
        self.get(paths::SESSION_ME).await
    }
}

#[async_trait]
impl DataPort for ApiClient {
    #[instrument(skip(self))]
    async fn messages(&self, query: &ListQuery) -> Result<PagedResult<Message>> {
        self.list(paths::MESSAGES, query, true).await
    }

    #[instrument(skip(self))]
    async fn contacts(&self, query: &ListQuery) -> Result<PagedResult<Contact>> {
        self.list(paths::CONTACTS, query, false).await
    }

    #[instrument(skip(self))]
    async fn group_members(&self, query: &ListQuery) -> Result<GroupMembersPage> {
        self.list(paths::GROUP_MEMBERS, query, true).await
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<Stats> {
        let options = RequestOptions::get()
            .retries(STATS_RETRIES)
            .timeout(Duration::from_millis(STATS_TIMEOUT_MS));
        self.http.request_json(paths::STATS, options).await
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthReport> {
        self.http.request_json(paths::HEALTH, RequestOptions::get().unauthenticated()).await
    }
}

#[async_trait]
impl AllowlistPort for ApiClient {
    #[instrument(skip(self))]
    async fn filter_groups(&self) -> Result<FilterGroupList> {
        self.get(paths::FILTER_GROUPS).await
    }

    #[instrument(skip(self, notes))]
    async fn add_filter_group(
        &self,
        group_id: &str,
        group_name: &str,
        notes: &str,
    ) -> Result<ActionResult> {
        let body = AddFilterGroupBody { group_id, group_name, notes };
        let ack: ActionResult = self.post(paths::FILTER_GROUPS, &body).await?;
        info!(success = ack.success, "Allowlist add acknowledged");
        Ok(ack)
    }

    #[instrument(skip(self))]
    async fn remove_filter_group(&self, group_id: &str) -> Result<ActionResult> {
        let options = RequestOptions::delete().query("hard_delete", Some("true".to_string()));
        let ack: Option<ActionResult> =
            self.http.request_json(&paths::filter_group(group_id), options).await?;
        Ok(ack.unwrap_or(ActionResult { success: true, message: String::new() }))
    }

    #[instrument(skip(self))]
    async fn discover_groups(&self) -> Result<DiscoverGroupsResponse> {
        self.get(paths::FILTER_DISCOVER).await
    }
}

#[async_trait]
impl ExportPort for ApiClient {
    #[instrument(skip(self))]
    async fn export_group_members_csv(
        &self,
        group_id: Option<&str>,
        dest_dir: &Path,
    ) -> Result<PathBuf> {
        let options = RequestOptions::get().query("group_id", group_id.map(str::to_string));
        let response = self.http.request(paths::EXPORT_MEMBERS_CSV, options).await?;

        let filename =
            filename_from_disposition(response.header(CONTENT_DISPOSITION.as_str()));
        let dest_dir = dest_dir.to_path_buf();
        let body = response.body;

        tokio::task::spawn_blocking(move || persist_csv(&dest_dir, &filename, &body))
            .await
            .map_err(|e| DashError::Internal(format!("export task failed: {e}")))?
    }

    #[instrument(skip(self))]
    async fn copy_group_members_to_sheet(
        &self,
        group_id: Option<&str>,
        tab_name: Option<&str>,
    ) -> Result<CopyToSheetResult> {
        let body = CopyToSheetBody { group_id, tab_name };
        self.post(paths::EXPORT_MEMBERS_SHEET, &body).await
    }
}

#[async_trait]
impl AccessPort for ApiClient {
    #[instrument(skip(self))]
    async fn access_status(&self) -> Result<AccessGrant> {
        let status: AccessStatus = self.get(paths::ACCESS_STATUS).await?;
        AccessGrant::try_from(status)
    }

    #[instrument(skip(self, email))]
    async fn request_sheet_access(&self, email: &str) -> Result<AccessRequestResult> {
        let email = validate_email(email)?;
        self.post(paths::ACCESS_REQUEST, &AccessRequestBody { email: &email }).await
    }
}
