//! HTTP client setup, request dispatch, and rate limiting.
mod client;
mod dispatch;
mod rate;


pub use client::build_client;
pub use dispatch::{DispatchOutcome, dispatch};
pub use rate::RateLimiter;

#[cfg(test)]
pub(crate) use rate::TokenBucketPlan;
