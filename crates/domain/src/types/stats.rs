//! Aggregate counters shown on the dashboard overview

use serde::{Deserialize, Serialize};

use super::filter::FilterMode;

/* -------------------------------------------------------------------------- */
/* Scrape Statistics */
/* -------------------------------------------------------------------------- */

/// Response of `GET /api/stats`
///
/// This endpoint is slow on a cold backend; callers keep the previous value
/// on failure and offer a manual retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_messages: u64,
    #[serde(default)]
    pub total_contacts: u64,
    #[serde(default)]
    pub total_groups: u64,
    #[serde(default)]
    pub filter_mode: FilterMode,
    #[serde(default)]
    pub active_filter_groups: u64,

    /// Ingestion queue: waiting jobs
    #[serde(default)]
    pub queue_depth: u64,
    /// Ingestion queue: finished jobs
    #[serde(default)]
    pub queue_completed: u64,
    /// Ingestion queue: failed jobs
    #[serde(default)]
    pub queue_failed: u64,
}

impl Stats {
    /// Share of processed jobs that failed, if any were processed.
    pub fn queue_failure_ratio(&self) -> Option<f64> {
        let processed = self.queue_completed + self.queue_failed;
        if processed == 0 {
            return None;
        }
        Some(self.queue_failed as f64 / processed as f64)
    }
}
