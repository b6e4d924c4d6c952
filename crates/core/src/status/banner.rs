//! Always-visible session status line

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;
use wadash_domain::{SessionState, SessionStatus};

use super::checks::SessionCheck;
use crate::polling::{PollControl, PollOutcome, PollerHandle, StatusObserver, StatusPoller};
use crate::ports::SessionPort;

/// What the banner shows. Every tick replaces the whole state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BannerState {
    Checking,
    Session { status: SessionStatus, phone: Option<String> },
    /// The last check failed.
    Unreachable,
}

impl BannerState {
    pub fn label(&self) -> String {
        match self {
            Self::Checking => "Checking...".to_string(),
            Self::Session { status: SessionStatus::Working, phone: Some(phone) } => {
                format!("Connected (+{phone})")
            }
            Self::Session { status: SessionStatus::Working, phone: None } => {
                "Connected".to_string()
            }
            Self::Session { status: SessionStatus::ScanQrCode, .. } => {
                "Waiting for QR scan".to_string()
            }
            Self::Session { .. } | Self::Unreachable => "Disconnected".to_string(),
        }
    }

    /// Raw status tag; failures read as `DISCONNECTED`.
    pub fn status_tag(&self) -> &str {
        match self {
            Self::Checking => "loading",
            Self::Session { status, .. } => status.as_str(),
            Self::Unreachable => "DISCONNECTED",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Session { status: SessionStatus::Working, .. })
    }
}

impl From<&SessionState> for BannerState {
    fn from(state: &SessionState) -> Self {
        Self::Session { status: state.status.clone(), phone: state.phone().map(str::to_string) }
    }
}

pub struct StatusBanner {
    state: watch::Sender<BannerState>,
}

impl StatusBanner {
    pub fn new() -> Arc<Self> {
        let (state, _) = watch::channel(BannerState::Checking);
        Arc::new(Self { state })
    }

    pub fn current(&self) -> BannerState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BannerState> {
        self.state.subscribe()
    }

    pub fn start(self: &Arc<Self>, port: Arc<dyn SessionPort>, interval: Duration) -> PollerHandle {
        StatusPoller::new("status_banner", interval)
            .spawn(Arc::new(SessionCheck::new(port)), self.clone())
    }
}

#[async_trait]
impl StatusObserver<SessionState> for StatusBanner {
    async fn observe(&self, outcome: PollOutcome<SessionState>) -> PollControl {
        let next = match outcome {
            PollOutcome::Observed(state) => BannerState::from(&state),
            PollOutcome::Failed(_) => BannerState::Unreachable,
        };
        self.state.send_replace(next);
        PollControl::Continue
    }
}
