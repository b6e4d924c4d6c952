//! `StatusCheck` adapters over the session port

use std::sync::Arc;

use async_trait::async_trait;
use wadash_domain::{CurrentUser, Result, SessionState};

use crate::polling::StatusCheck;
use crate::ports::SessionPort;

/// Polls `GET /api/session`.
pub struct SessionCheck {
    port: Arc<dyn SessionPort>,
}

impl SessionCheck {
    pub fn new(port: Arc<dyn SessionPort>) -> Self {
        Self { port }
    }
}

#[async_trait]
impl StatusCheck<SessionState> for SessionCheck {
    async fn check(&self) -> Result<SessionState> {
        self.port.session().await
    }
}

/// Polls `GET /api/session/me`.
pub struct CurrentUserCheck {
    port: Arc<dyn SessionPort>,
}

impl CurrentUserCheck {
    pub fn new(port: Arc<dyn SessionPort>) -> Self {
        Self { port }
    }
}

#[async_trait]
impl StatusCheck<CurrentUser> for CurrentUserCheck {
    async fn check(&self) -> Result<CurrentUser> {
        self.port.current_user().await
    }
}
