use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to create latency histogram: {source}")]
    CreateHistogram {
        #[source]
        source: hdrhistogram::CreationError,
    },
    #[error("Failed to record latency: {source}")]
    RecordLatency {
        #[source]
        source: hdrhistogram::RecordError,
    },
    #[error("Failed to serialize summary: {source}")]
    SerializeSummary {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write summary '{path}': {source}")]
    WriteSummary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
