//! Waits for the operator to scan the pairing QR code
//!
//! The watcher polls `GET /api/session` only while the session reports
//! `SCAN_QR_CODE`. It ends itself on the first tick that reports anything
//! else: `WORKING` means the scan succeeded, any other status (or a failed
//! check, read as "no session") means the session left the waiting state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;
use tracing::info;
use wadash_domain::{SessionState, SessionStatus};

use super::checks::SessionCheck;
use crate::polling::{PollControl, PollOutcome, PollerHandle, StatusObserver, StatusPoller};
use crate::ports::SessionPort;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QrWaitState {
    Waiting,
    Connected { phone: Option<String> },
    /// The session moved to a status other than `WORKING`.
    Left { status: SessionStatus },
}

impl QrWaitState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

pub struct QrScanWatcher {
    state: watch::Sender<QrWaitState>,
}

impl QrScanWatcher {
    pub fn new() -> Arc<Self> {
        let (state, _) = watch::channel(QrWaitState::Waiting);
        Arc::new(Self { state })
    }

    pub fn current(&self) -> QrWaitState {
        self.state.borrow().clone()
    }

    /// Resolves with the first terminal state, including one reached before
    /// this call.
    pub async fn settled(&self) -> QrWaitState {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(QrWaitState::is_terminal).await {
            Ok(state) => state.clone(),
            Err(_) => self.current(),
        };
        settled
    }

    /// Starts watching if `session` is awaiting a scan; otherwise returns
    /// `None` and records the status as already left.
    pub fn watch(
        self: &Arc<Self>,
        session: &SessionState,
        port: Arc<dyn SessionPort>,
        interval: Duration,
    ) -> Option<PollerHandle> {
        if !session.status.is_awaiting_scan() {
            self.state.send_replace(Self::settle(session));
            return None;
        }
        self.state.send_replace(QrWaitState::Waiting);
        Some(
            StatusPoller::new("qr_scan", interval)
                .spawn(Arc::new(SessionCheck::new(port)), self.clone()),
        )
    }

    fn settle(session: &SessionState) -> QrWaitState {
        if session.is_connected() {
            QrWaitState::Connected { phone: session.phone().map(str::to_string) }
        } else {
            QrWaitState::Left { status: session.status.clone() }
        }
    }
}

#[async_trait]
impl StatusObserver<SessionState> for QrScanWatcher {
    async fn observe(&self, outcome: PollOutcome<SessionState>) -> PollControl {
        let session = match outcome {
            PollOutcome::Observed(session) => session,
            PollOutcome::Failed(_) => SessionState::not_found(),
        };

        if session.status.is_awaiting_scan() {
            return PollControl::Continue;
        }

        let next = Self::settle(&session);
        if matches!(next, QrWaitState::Connected { .. }) {
            info!("QR code scanned; session connected");
        }
        self.state.send_replace(next);
        PollControl::Stop
    }
}
