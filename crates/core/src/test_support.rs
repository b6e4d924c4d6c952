//! Scripted in-memory backend for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use wadash_domain::{
    AccessGrant, AccessRequestResult, ActionResult, CurrentUser, DashError,
    DiscoverGroupsResponse, FilterGroupList, Result, SessionControlResponse,
    SessionState,
};

use crate::ports::{AccessPort, AllowlistPort, SessionPort};

/// Replies in order; the last reply repeats once the script runs out.
struct Script<T> {
    replies: Mutex<VecDeque<Result<T>>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self { replies: Mutex::new(VecDeque::new()), calls: AtomicUsize::new(0) }
    }

    fn set(&self, replies: Vec<Result<T>>) {
        *self.replies.lock() = replies.into();
    }

    fn next(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock();
        if replies.len() > 1 {
            if let Some(reply) = replies.pop_front() {
                return reply;
            }
        }
        replies
            .front()
            .cloned()
            .unwrap_or_else(|| Err(DashError::Internal("unscripted call".into())))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeBackend {
    session: Script<SessionState>,
    current_user: Script<CurrentUser>,
    control: Script<SessionControlResponse>,
    qr: Script<Vec<u8>>,
    discover: Script<DiscoverGroupsResponse>,
    add_group: Script<ActionResult>,
    access_status: Script<AccessGrant>,
    access_request: Script<AccessRequestResult>,
    pub(crate) added: Mutex<Vec<(String, String, String)>>,
    pub(crate) requested_emails: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Arc<Self> {
        let backend = Self {
            session: Script::new(),
            current_user: Script::new(),
            control: Script::new(),
            qr: Script::new(),
            discover: Script::new(),
            add_group: Script::new(),
            access_status: Script::new(),
            access_request: Script::new(),
            added: Mutex::new(Vec::new()),
            requested_emails: Mutex::new(Vec::new()),
        };
        backend.control.set(vec![Ok(SessionControlResponse::new())]);
        Arc::new(backend)
    }

    pub(crate) fn script_session(&self, replies: Vec<Result<SessionState>>) {
        self.session.set(replies);
    }

    pub(crate) fn script_current_user(&self, replies: Vec<Result<CurrentUser>>) {
        self.current_user.set(replies);
    }

    pub(crate) fn script_control(&self, replies: Vec<Result<SessionControlResponse>>) {
        self.control.set(replies);
    }

    pub(crate) fn script_qr(&self, replies: Vec<Result<Vec<u8>>>) {
        self.qr.set(replies);
    }

    pub(crate) fn script_discover(&self, replies: Vec<Result<DiscoverGroupsResponse>>) {
        self.discover.set(replies);
    }

    pub(crate) fn script_add_group(&self, replies: Vec<Result<ActionResult>>) {
        self.add_group.set(replies);
    }

    pub(crate) fn script_access_status(&self, replies: Vec<Result<AccessGrant>>) {
        self.access_status.set(replies);
    }

    pub(crate) fn access_status_calls(&self) -> usize {
        self.access_status.calls()
    }

    pub(crate) fn script_access_request(&self, replies: Vec<Result<AccessRequestResult>>) {
        self.access_request.set(replies);
    }

    pub(crate) fn session_calls(&self) -> usize {
        self.session.calls()
    }

    pub(crate) fn control_calls(&self) -> usize {
        self.control.calls()
    }

    pub(crate) fn qr_calls(&self) -> usize {
        self.qr.calls()
    }
}

#[async_trait]
impl SessionPort for FakeBackend {
    async fn session(&self) -> Result<SessionState> {
        self.session.next()
    }

    async fn start_session(&self) -> Result<SessionControlResponse> {
        self.control.next()
    }

    async fn restart_session(&self) -> Result<SessionControlResponse> {
        self.control.next()
    }

    async fn stop_session(&self) -> Result<SessionControlResponse> {
        self.control.next()
    }

    async fn delete_session(&self) -> Result<SessionControlResponse> {
        self.control.next()
    }

    async fn qr_code(&self) -> Result<Vec<u8>> {
        self.qr.next()
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        self.current_user.next()
    }
}

#[async_trait]
impl AllowlistPort for FakeBackend {
    async fn filter_groups(&self) -> Result<FilterGroupList> {
        Err(DashError::Internal("unscripted call".into()))
    }

    async fn add_filter_group(
        &self,
        group_id: &str,
        group_name: &str,
        notes: &str,
    ) -> Result<ActionResult> {
        self.added.lock().push((group_id.to_string(), group_name.to_string(), notes.to_string()));
        self.add_group.next()
    }

    async fn remove_filter_group(&self, _group_id: &str) -> Result<ActionResult> {
        Err(DashError::Internal("unscripted call".into()))
    }

    async fn discover_groups(&self) -> Result<DiscoverGroupsResponse> {
        self.discover.next()
    }
}

#[async_trait]
impl AccessPort for FakeBackend {
    async fn access_status(&self) -> Result<AccessGrant> {
        self.access_status.next()
    }

    async fn request_sheet_access(&self, email: &str) -> Result<AccessRequestResult> {
        self.requested_emails.lock().push(email.to_string());
        self.access_request.next()
    }
}
