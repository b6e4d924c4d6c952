//! Sequential retry with linear backoff

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};
use wadash_domain::Result;

/// How many times a request is re-attempted and how long to wait between
/// attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub retries: u32,
    /// Sleep after failed attempt `n` is `backoff_unit * n`.
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff_unit: Duration) -> Self {
        Self { retries, backoff_unit }
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Delay after the failed attempt with 1-based number `attempt`.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(attempt)
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// the policy is exhausted. The last error is returned.
///
/// `operation` receives the 1-based attempt number. Attempts never overlap.
pub async fn retry_with_backoff<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                let delay = policy.backoff_after(attempt);
                debug!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Attempt failed, backing off"
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
            Err(err) => {
                warn!(attempt, max_attempts, error = %err, kind = err.label(), "Request failed");
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use tokio::time::Instant;
    use wadash_domain::DashError;

    use super::*;

    #[test]
    fn backoff_is_linear() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1000));
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.backoff_after(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn fail_fail_succeed_waits_one_then_two_seconds() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1000));
        let started = Instant::now();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = seen.clone();
        let result = retry_with_backoff(policy, move |attempt| {
            log.lock().unwrap().push(started.elapsed());
            async move {
                if attempt < 3 {
                    Err(DashError::Api { status: 503, message: "Service Unavailable".into() })
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        let elapsed = seen.lock().unwrap().clone();
        assert_eq!(elapsed.len(), 3);
        assert!(elapsed[0] < Duration::from_millis(10));
        assert!(within(elapsed[1] - elapsed[0], Duration::from_millis(1000)));
        assert!(within(elapsed[2] - elapsed[1], Duration::from_millis(2000)));
    }

    fn within(actual: Duration, expected: Duration) -> bool {
        actual >= expected && actual < expected + Duration::from_millis(10)
    }

    #[tokio::test(start_paused = true)]
    async fn returns_last_error_after_exhausting_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: Result<()> =
            retry_with_backoff(RetryPolicy::new(1, Duration::from_secs(1)), move |attempt| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { Err(DashError::Network(format!("attempt {attempt}"))) }
            })
            .await;

        assert_eq!(result, Err(DashError::Network("attempt 2".into())));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn parse_errors_are_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: Result<()> =
            retry_with_backoff(RetryPolicy::new(3, Duration::from_secs(1)), move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(DashError::Parse("missing field".into())) }
            })
            .await;

        assert!(matches!(result, Err(DashError::Parse(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
