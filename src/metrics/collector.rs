use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::AppResult;
use crate::http::DispatchOutcome;

use super::{LatencyHistogram, Metrics, RunSummary};

/// Running totals fed by every `Metrics` record of a run.
#[derive(Debug)]
pub struct RunAggregate {
    total_requests: u64,
    successful_requests: u64,
    http_error_requests: u64,
    timeout_requests: u64,
    transport_error_requests: u64,
    latency_sum_ms: u128,
    min_latency_ms: u64,
    max_latency_ms: u64,
    histogram: LatencyHistogram,
}

impl RunAggregate {
    /// Creates an empty aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency histogram cannot be created.
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            total_requests: 0,
            successful_requests: 0,
            http_error_requests: 0,
            timeout_requests: 0,
            transport_error_requests: 0,
            latency_sum_ms: 0,
            min_latency_ms: u64::MAX,
            max_latency_ms: 0,
            histogram: LatencyHistogram::new()?,
        })
    }

    /// Folds one record into the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency cannot be recorded.
    pub fn record(&mut self, metric: &Metrics) -> AppResult<()> {
        self.total_requests = self.total_requests.saturating_add(1);
        match metric.outcome {
            DispatchOutcome::Status(code) if (200..300).contains(&code) => {
                self.successful_requests = self.successful_requests.saturating_add(1);
            }
            DispatchOutcome::Status(_) => {
                self.http_error_requests = self.http_error_requests.saturating_add(1);
            }
            DispatchOutcome::TimedOut => {
                self.timeout_requests = self.timeout_requests.saturating_add(1);
            }
            DispatchOutcome::TransportError => {
                self.transport_error_requests = self.transport_error_requests.saturating_add(1);
            }
        }

        let latency_ms = metric.latency_ms();
        self.latency_sum_ms = self.latency_sum_ms.saturating_add(u128::from(latency_ms));
        self.min_latency_ms = self.min_latency_ms.min(latency_ms);
        self.max_latency_ms = self.max_latency_ms.max(latency_ms);
        self.histogram.record(latency_ms)
    }

    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Closes the run and computes the summary over `duration`.
    #[must_use]
    pub fn finish(&self, duration: Duration) -> RunSummary {
        let total = self.total_requests;
        let (p50_latency_ms, p90_latency_ms, p99_latency_ms) = self.histogram.percentiles();

        let avg_latency_ms = self
            .latency_sum_ms
            .checked_div(u128::from(total))
            .map_or(0, |avg| u64::try_from(avg).unwrap_or(u64::MAX));

        let success_rate_x100 = u128::from(self.successful_requests)
            .saturating_mul(10_000)
            .checked_div(u128::from(total))
            .map_or(0, |rate| u64::try_from(rate).unwrap_or(u64::MAX));

        let duration_ms = duration.as_millis().max(1);
        let avg_rps_x100 = u128::from(total)
            .saturating_mul(100_000)
            .checked_div(duration_ms)
            .map_or(0, |rate| u64::try_from(rate).unwrap_or(u64::MAX));

        RunSummary {
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            total_requests: total,
            successful_requests: self.successful_requests,
            http_error_requests: self.http_error_requests,
            timeout_requests: self.timeout_requests,
            transport_error_requests: self.transport_error_requests,
            min_latency_ms: if total > 0 { self.min_latency_ms } else { 0 },
            avg_latency_ms,
            max_latency_ms: self.max_latency_ms,
            p50_latency_ms,
            p90_latency_ms,
            p99_latency_ms,
            success_rate_x100,
            avg_rps_x100,
        }
    }
}

/// Drains `metrics_rx` until every sender is gone and returns the totals.
#[must_use]
pub fn setup_metrics_collector(
    mut metrics_rx: mpsc::Receiver<Metrics>,
) -> JoinHandle<AppResult<RunAggregate>> {
    tokio::spawn(async move {
        let mut aggregate = RunAggregate::new()?;
        while let Some(metric) = metrics_rx.recv().await {
            if let Err(err) = aggregate.record(&metric) {
                tracing::warn!("Dropping latency sample: {}", err);
            }
        }
        Ok(aggregate)
    })
}
