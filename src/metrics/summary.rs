use std::path::Path;

use crate::error::{AppError, AppResult, MetricsError};

use super::RunSummary;

/// Two-decimal fixed-point divisor.
const PERCENT_DIVISOR: u64 = 100;

#[must_use]
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    vec![
        format!("Duration: {}ms", summary.duration_ms),
        format!("Total Requests: {}", summary.total_requests),
        format!(
            "Successful (2xx): {} ({}.{:02}%)",
            summary.successful_requests,
            summary.success_rate_x100 / PERCENT_DIVISOR,
            summary.success_rate_x100 % PERCENT_DIVISOR
        ),
        format!("Non-2xx Responses: {}", summary.http_error_requests),
        format!("Timeouts: {}", summary.timeout_requests),
        format!("Transport Errors: {}", summary.transport_error_requests),
        format!(
            "Avg RPS: {}.{:02}",
            summary.avg_rps_x100 / PERCENT_DIVISOR,
            summary.avg_rps_x100 % PERCENT_DIVISOR
        ),
        format!(
            "Min/Avg/Max Latency: {}ms / {}ms / {}ms",
            summary.min_latency_ms, summary.avg_latency_ms, summary.max_latency_ms
        ),
        format!(
            "P50/P90/P99 Latency: {}ms / {}ms / {}ms",
            summary.p50_latency_ms, summary.p90_latency_ms, summary.p99_latency_ms
        ),
    ]
}

/// Writes `summary` as pretty-printed JSON to `path`.
///
/// # Errors
///
/// Returns an error when the summary cannot be serialized or written.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> AppResult<()> {
    let encoded = serde_json::to_string_pretty(summary)
        .map_err(|err| AppError::metrics(MetricsError::SerializeSummary { source: err }))?;
    std::fs::write(path, encoded).map_err(|err| {
        AppError::metrics(MetricsError::WriteSummary {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
