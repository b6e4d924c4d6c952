//! Connection gate for data views
//!
//! Data views are only useful while an account is linked. The gate polls
//! `GET /api/session/me` and exposes a tri-state: still checking, connected,
//! or disconnected. A failed check counts as disconnected.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;
use wadash_domain::CurrentUser;

use super::checks::CurrentUserCheck;
use crate::polling::{PollControl, PollOutcome, PollerHandle, StatusObserver, StatusPoller};
use crate::ports::SessionPort;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Connectivity {
    /// No check has completed yet.
    Checking,
    Connected { phone: Option<String> },
    Disconnected,
}

impl Connectivity {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, Self::Checking)
    }
}

impl From<&CurrentUser> for Connectivity {
    fn from(user: &CurrentUser) -> Self {
        if user.connected {
            Self::Connected { phone: user.phone.clone() }
        } else {
            Self::Disconnected
        }
    }
}

pub struct ConnectionGate {
    state: watch::Sender<Connectivity>,
}

impl ConnectionGate {
    pub fn new() -> Arc<Self> {
        let (state, _) = watch::channel(Connectivity::Checking);
        Arc::new(Self { state })
    }

    pub fn current(&self) -> Connectivity {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.state.subscribe()
    }

    /// Starts polling the current user every `interval`.
    pub fn start(self: &Arc<Self>, port: Arc<dyn SessionPort>, interval: Duration) -> PollerHandle {
        StatusPoller::new("connection_gate", interval)
            .spawn(Arc::new(CurrentUserCheck::new(port)), self.clone())
    }

    fn publish(&self, next: Connectivity) {
        self.state.send_replace(next);
    }
}

#[async_trait]
impl StatusObserver<CurrentUser> for ConnectionGate {
    async fn observe(&self, outcome: PollOutcome<CurrentUser>) -> PollControl {
        let next = match outcome {
            PollOutcome::Observed(user) => Connectivity::from(&user),
            PollOutcome::Failed(_) => Connectivity::Disconnected,
        };
        self.publish(next);
        PollControl::Continue
    }
}
