//! Session lifecycle service

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};
use wadash_domain::{Result, SessionState};

use crate::ports::SessionPort;

/// Delay between a restart and the follow-up session read, giving the
/// backend time to bring the session back up.
pub const RESTART_SETTLE: Duration = Duration::from_secs(3);

/// Session state after a lifecycle action, plus the QR image when the session
/// is waiting for a scan and the image could be fetched.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub qr: Option<Vec<u8>>,
}

pub struct SessionService {
    port: Arc<dyn SessionPort>,
}

impl SessionService {
    pub fn new(port: Arc<dyn SessionPort>) -> Self {
        Self { port }
    }

    /// Reads the session; an unreachable backend reads as "no session".
    #[instrument(skip(self))]
    pub async fn load(&self) -> SessionState {
        match self.port.session().await {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "Failed to load session");
                SessionState::not_found()
            }
        }
    }

    /// Starts a session and fetches the pairing QR code.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<SessionSnapshot> {
        self.port.start_session().await?;
        info!("Session started");
        Ok(self.snapshot_with_qr().await)
    }

    /// Restarts the session, waits for it to settle, then fetches the QR code.
    #[instrument(skip(self))]
    pub async fn restart(&self) -> Result<SessionSnapshot> {
        self.port.restart_session().await?;
        info!(settle_ms = RESTART_SETTLE.as_millis() as u64, "Session restarted");
        tokio::time::sleep(RESTART_SETTLE).await;
        Ok(self.snapshot_with_qr().await)
    }

    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<SessionState> {
        self.port.stop_session().await?;
        info!("Session stopped");
        Ok(self.load().await)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self) -> Result<SessionState> {
        self.port.delete_session().await?;
        info!("Session deleted");
        Ok(self.load().await)
    }

    /// Fetches the QR image. A failure usually means the session is not
    /// ready yet.
    pub async fn qr_code(&self) -> Result<Vec<u8>> {
        self.port.qr_code().await
    }

    async fn snapshot_with_qr(&self) -> SessionSnapshot {
        let state = self.load().await;
        let qr = match self.port.qr_code().await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!(error = %err, "Failed to load QR code; session may not be ready yet");
                None
            }
        };
        SessionSnapshot { state, qr }
    }
}
