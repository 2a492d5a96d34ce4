use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::args::LoadArgs;
use crate::error::AppResult;
use crate::http::{RateLimiter, build_client};
use crate::metrics::{Metrics, RunSummary, setup_metrics_collector};
use crate::scenario::{Options, RequestGenerator};
use crate::shutdown::ShutdownSender;

use super::worker::VirtualUser;

/// Buffered metrics between virtual users and the collector.
const METRICS_CHANNEL_CAPACITY: usize = 10_000;

/// Everything the engine needs for one run.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    pub options: Options,
    pub generator: Arc<RequestGenerator>,
    pub request_timeout: Duration,
}

impl LoadPlan {
    /// Builds a plan from parsed CLI/config values.
    ///
    /// # Errors
    ///
    /// Returns an error when the options or the target URL are invalid.
    pub fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let options = args.options();
        options.validate()?;
        let generator = RequestGenerator::from_args(args)?;
        Ok(Self {
            options,
            generator: Arc::new(generator),
            request_timeout: args.request_timeout,
        })
    }
}

/// Runs the plan to completion and returns the run summary.
///
/// Sends on `shutdown_tx` when the duration elapses; a shutdown sent by
/// anyone else ends the run early.
///
/// # Errors
///
/// Returns an error when the plan is invalid, the HTTP client cannot be
/// built, or a virtual-user task panics.
pub async fn run_load(plan: LoadPlan, shutdown_tx: &ShutdownSender) -> AppResult<RunSummary> {
    let LoadPlan {
        options,
        generator,
        request_timeout,
    } = plan;
    let run_duration = options.run_duration()?;
    let vus = options.virtual_users()?.get();
    let client = build_client(request_timeout)?;
    let rate_limiter = options
        .rate_cap()
        .map(|rate| Arc::new(RateLimiter::for_run(rate, run_duration)));

    info!(
        "Starting {} virtual users for {} against {} (rps cap: {})",
        vus,
        options.duration,
        generator.base_url(),
        rate_label(options.rps)
    );

    let (metrics_tx, metrics_rx) = mpsc::channel::<Metrics>(METRICS_CHANNEL_CAPACITY);
    let collector = setup_metrics_collector(metrics_rx);
    let mut shutdown_rx = shutdown_tx.subscribe();
    let run_start = Instant::now();

    let mut workers = Vec::with_capacity(vus);
    for id in 0..vus {
        let user = VirtualUser {
            id,
            generator: Arc::clone(&generator),
            client: client.clone(),
            rate_limiter: rate_limiter.clone(),
            metrics_tx: metrics_tx.clone(),
        };
        workers.push(tokio::spawn(user.run(shutdown_tx.subscribe())));
    }
    drop(metrics_tx);

    tokio::select! {
        () = tokio::time::sleep(run_duration) => {
            debug!("Run duration elapsed, stopping virtual users.");
            drop(shutdown_tx.send(()));
        }
        _ = shutdown_rx.recv() => {}
    }

    let mut iterations: u64 = 0;
    for worker in workers {
        iterations = iterations.saturating_add(worker.await?);
    }
    let elapsed = run_start.elapsed();
    drop(rate_limiter);

    let aggregate = collector.await??;
    info!(
        "Run finished after {}ms with {} iterations.",
        elapsed.as_millis(),
        iterations
    );
    Ok(aggregate.finish(elapsed))
}

fn rate_label(rps: u64) -> String {
    if rps == 0 {
        "none".to_owned()
    } else {
        format!("{}/s", rps)
    }
}
