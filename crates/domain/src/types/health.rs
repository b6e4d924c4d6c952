//! Backend liveness and circuit-breaker report

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::impl_open_tag;

/// Breaker state as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    HalfOpen,
    Open,
    Other(String),
}

impl_open_tag!(BreakerState {
    Closed => "closed",
    HalfOpen => "half_open",
    Open => "open",
});

/// Health classification derived from a breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerHealth {
    Healthy,
    Degraded,
    Failing,
}

impl BreakerState {
    /// `closed` is healthy, `half_open` degraded, anything else failing.
    pub fn health(&self) -> BreakerHealth {
        match self {
            Self::Closed => BreakerHealth::Healthy,
            Self::HalfOpen => BreakerHealth::Degraded,
            _ => BreakerHealth::Failing,
        }
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub circuit_breakers: BTreeMap<String, BreakerState>,
}

impl HealthReport {
    /// Worst classification across all breakers; healthy when none reported.
    pub fn overall(&self) -> BreakerHealth {
        self.circuit_breakers.values().map(BreakerState::health).fold(
            BreakerHealth::Healthy,
            |worst, next| match (worst, next) {
                (BreakerHealth::Failing, _) | (_, BreakerHealth::Failing) => BreakerHealth::Failing,
                (BreakerHealth::Degraded, _) | (_, BreakerHealth::Degraded) => {
                    BreakerHealth::Degraded
                }
                _ => BreakerHealth::Healthy,
            },
        )
    }
}
