use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::http::DispatchOutcome;

/// Outcome of one iteration as seen by the engine.
#[derive(Clone, Copy, Debug)]
pub struct Metrics {
    pub start: Instant,
    pub response_time: Duration,
    pub outcome: DispatchOutcome,
}

impl Metrics {
    #[must_use]
    pub fn new(start: Instant, outcome: DispatchOutcome) -> Self {
        Self {
            start,
            response_time: start.elapsed(),
            outcome,
        }
    }

    #[must_use]
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.response_time.as_millis()).unwrap_or(u64::MAX)
    }
}

/// End-of-run totals. Rates are fixed-point with two decimals (`x100`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub duration_ms: u64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub http_error_requests: u64,
    pub timeout_requests: u64,
    pub transport_error_requests: u64,
    pub min_latency_ms: u64,
    pub avg_latency_ms: u64,
    pub max_latency_ms: u64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
    pub success_rate_x100: u64,
    pub avg_rps_x100: u64,
}
