//! Per-request outcome records and their aggregation into a run summary.
mod collector;
mod histogram;
mod summary;
mod types;

#[cfg(test)]
mod tests;

pub use collector::{RunAggregate, setup_metrics_collector};
pub use histogram::LatencyHistogram;
pub use summary::{summary_lines, write_summary_json};
pub use types::{Metrics, RunSummary};
