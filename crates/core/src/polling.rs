//! Periodic status polling with explicit lifecycle
//!
//! A poller runs one check immediately, then once per interval, and hands
//! every result to an observer. Each check is evaluated on its own; nothing
//! is diffed against the previous tick, so a surface that missed an update
//! catches up on the next one.
//!
//! # Architecture
//!
//! - `StatusPoller::spawn`: starts the task and returns its handle
//! - `poll_worker()`: the loop itself (tested without a handle)
//! - `PollerHandle`: owns the cancellation token and join handle
//!
//! Handles are independent. Stopping or dropping one never touches another
//! poller, and a stopped poller performs no further checks.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use async_trait::async_trait;
//! use wadash_core::{PollControl, PollOutcome, StatusCheck, StatusObserver, StatusPoller};
//! use wadash_domain::Result;
//!
//! struct Ping;
//!
//! #[async_trait]
//! impl StatusCheck<bool> for Ping {
//!     async fn check(&self) -> Result<bool> {
//!         Ok(true)
//!     }
//! }
//!
//! struct Print;
//!
//! #[async_trait]
//! impl StatusObserver<bool> for Print {
//!     async fn observe(&self, outcome: PollOutcome<bool>) -> PollControl {
//!         println!("{outcome:?}");
//!         PollControl::Continue
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let handle = StatusPoller::new("ping", Duration::from_secs(15))
//!     .spawn(Arc::new(Ping), Arc::new(Print));
//! // ...
//! handle.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wadash_domain::{DashError, Result};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A single status probe.
#[async_trait]
pub trait StatusCheck<T>: Send + Sync {
    async fn check(&self) -> Result<T>;
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    Observed(T),
    Failed(DashError),
}

impl<T> PollOutcome<T> {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl<T> From<Result<T>> for PollOutcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Observed(value),
            Err(err) => Self::Failed(err),
        }
    }
}

/// What the loop does after an observer has seen a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollControl {
    Continue,
    /// Ends the poller as if its handle had been stopped.
    Stop,
}

/// Receives every tick, failures included.
#[async_trait]
pub trait StatusObserver<T>: Send + Sync {
    async fn observe(&self, outcome: PollOutcome<T>) -> PollControl;
}

/// Poller settings; `name` only appears in logs.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    name: &'static str,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self { name, interval: interval.max(MIN_INTERVAL) }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawns the polling task. Must be called inside a Tokio runtime.
    pub fn spawn<T>(
        &self,
        check: Arc<dyn StatusCheck<T>>,
        observer: Arc<dyn StatusObserver<T>>,
    ) -> PollerHandle
    where
        T: Send + 'static,
    {
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();
        let name = self.name;
        let interval = self.interval;

        info!(poller = name, interval_ms = interval.as_millis() as u64, "Starting status poller");

        let task = tokio::spawn(async move {
            poll_worker(name, check, observer, interval, worker_cancel).await;
        });

        PollerHandle { name, cancellation: cancel, task: Some(task) }
    }
}

/// Owner of a running poller.
///
/// Dropping the handle cancels the poller without waiting for it.
#[derive(Debug)]
pub struct PollerHandle {
    name: &'static str,
    cancellation: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the loop is still scheduled to run checks.
    pub fn is_running(&self) -> bool {
        !self.cancellation.is_cancelled()
            && self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancels the poller and waits for the task to exit.
    ///
    /// A check in flight is abandoned; its result never reaches the observer.
    pub async fn stop(mut self) -> Result<()> {
        self.cancellation.cancel();

        if let Some(task) = self.task.take() {
            tokio::time::timeout(SHUTDOWN_TIMEOUT, task)
                .await
                .map_err(|_| DashError::Internal(format!("Poller {} shutdown timeout", self.name)))?
                .map_err(|e| DashError::Internal(format!("Task join failed: {e}")))?;
        }

        info!(poller = self.name, "Status poller stopped");
        Ok(())
    }

    /// Waits until the poller ends on its own (an observer returned `Stop`).
    pub async fn finished(mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.await.map_err(|e| DashError::Internal(format!("Task join failed: {e}")))?;
        }
        Ok(())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

async fn poll_worker<T>(
    name: &'static str,
    check: Arc<dyn StatusCheck<T>>,
    observer: Arc<dyn StatusObserver<T>>,
    interval: Duration,
    cancel: CancellationToken,
) where
    T: Send + 'static,
{
    // First tick completes immediately.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = check.check() => PollOutcome::from(result),
        };

        match &outcome {
            PollOutcome::Observed(_) => debug!(poller = name, "Status check completed"),
            PollOutcome::Failed(err) => {
                warn!(poller = name, error = %err, kind = err.label(), "Status check failed")
            }
        }

        if observer.observe(outcome).await == PollControl::Stop {
            debug!(poller = name, "Observer ended polling");
            cancel.cancel();
            break;
        }
    }

    debug!(poller = name, "Status poller worker exiting");
}
