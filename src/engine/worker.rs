use std::sync::Arc;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::trace;

use crate::http::RateLimiter;
use crate::metrics::Metrics;
use crate::scenario::RequestGenerator;
use crate::shutdown::ShutdownReceiver;

/// One simulated client looping over iterations until shutdown.
pub(super) struct VirtualUser {
    pub(super) id: usize,
    pub(super) generator: Arc<RequestGenerator>,
    pub(super) client: Client,
    pub(super) rate_limiter: Option<Arc<RateLimiter>>,
    pub(super) metrics_tx: mpsc::Sender<Metrics>,
}

impl VirtualUser {
    /// Returns the number of completed iterations. In-flight requests are
    /// abandoned on shutdown.
    pub(super) async fn run(self, mut shutdown_rx: ShutdownReceiver) -> u64 {
        let mut iterations: u64 = 0;
        loop {
            if let Some(rate_limiter) = self.rate_limiter.as_deref() {
                let admitted = tokio::select! {
                    _ = shutdown_rx.recv() => false,
                    admitted = rate_limiter.acquire() => admitted,
                };
                if !admitted {
                    break;
                }
            }

            let start = Instant::now();
            let outcome = tokio::select! {
                _ = shutdown_rx.recv() => break,
                outcome = self.generator.fire(&self.client) => outcome,
            };
            iterations = iterations.saturating_add(1);

            if self
                .metrics_tx
                .send(Metrics::new(start, outcome))
                .await
                .is_err()
            {
                break;
            }
        }

        trace!(vu = self.id, iterations, "Virtual user stopped.");
        iterations
    }
}
