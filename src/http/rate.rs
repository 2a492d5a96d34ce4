use std::num::NonZeroU64;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

const REFILL_PERIOD: Duration = Duration::from_secs(1);
const MILLIS_PER_SECOND: u128 = 1_000;

/// How many admission tokens exist per refill period, and in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenBucketPlan {
    pub capacity: usize,
    pub period: Duration,
    /// Upper bound on permits ever issued; `None` refills forever.
    pub budget: Option<u64>,
}

impl TokenBucketPlan {
    pub(crate) fn per_second(rate: NonZeroU64) -> Self {
        let capacity = usize::try_from(rate.get())
            .unwrap_or(usize::MAX)
            .min(Semaphore::MAX_PERMITS);
        Self {
            capacity,
            period: REFILL_PERIOD,
            budget: None,
        }
    }

    /// Like `per_second`, but never issues more than `rate * run_duration`
    /// permits (at least one).
    pub(crate) fn for_run(rate: NonZeroU64, run_duration: Duration) -> Self {
        let budget = u128::from(rate.get())
            .saturating_mul(run_duration.as_millis())
            .checked_div(MILLIS_PER_SECOND)
            .map_or(u64::MAX, |total| u64::try_from(total).unwrap_or(u64::MAX))
            .max(1);
        Self {
            budget: Some(budget),
            ..Self::per_second(rate)
        }
    }

    /// Permits to add so the bucket is full again, bounded by what is left
    /// of the budget after `issued` permits.
    pub(crate) fn top_up(&self, available: usize, issued: u64) -> usize {
        let missing = self.capacity.saturating_sub(available);
        match self.budget {
            Some(budget) => {
                let remaining = usize::try_from(budget.saturating_sub(issued)).unwrap_or(usize::MAX);
                missing.min(remaining)
            }
            None => missing,
        }
    }
}

/// Aggregate admission control shared by all virtual users.
///
/// The bucket is refilled to `rps` permits once per second; each request
/// consumes one permit for good. A limiter built with `for_run` stops
/// refilling once `rps * duration` permits have been issued, so the refill
/// that lands on the deadline admits nothing.
#[derive(Debug)]
pub struct RateLimiter {
    permits: Arc<Semaphore>,
    refill: JoinHandle<()>,
}

impl RateLimiter {
    /// Starts a limiter admitting `rate_per_sec` requests per second.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn fixed(rate_per_sec: NonZeroU64) -> Self {
        Self::start(TokenBucketPlan::per_second(rate_per_sec))
    }

    /// Starts a limiter for a run of `run_duration`: `rate_per_sec` per
    /// second and `rate_per_sec * run_duration` in total.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn for_run(rate_per_sec: NonZeroU64, run_duration: Duration) -> Self {
        Self::start(TokenBucketPlan::for_run(rate_per_sec, run_duration))
    }

    fn start(plan: TokenBucketPlan) -> Self {
        let permits = Arc::new(Semaphore::new(0));
        let refill = spawn_refill(Arc::clone(&permits), plan);
        Self { permits, refill }
    }

    /// Waits for one admission token. Returns `false` once the limiter is
    /// shut down.
    pub async fn acquire(&self) -> bool {
        match self.permits.acquire().await {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(_) => false,
        }
    }

    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.refill.abort();
        self.permits.close();
    }
}

fn spawn_refill(permits: Arc<Semaphore>, plan: TokenBucketPlan) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut refill_tick = interval(plan.period);
        refill_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut issued: u64 = 0;
        loop {
            refill_tick.tick().await;
            let missing = plan.top_up(permits.available_permits(), issued);
            if missing > 0 {
                permits.add_permits(missing);
                issued = issued.saturating_add(u64::try_from(missing).unwrap_or(u64::MAX));
            }
            if plan.budget.is_some_and(|budget| issued >= budget) {
                break;
            }
        }
    })
}
