//! Core library for the `howlite-loadtest` CLI.
//!
//! The scenario itself lives in [`scenario`]: a stateless generator that
//! builds one JSON POST to a randomized path per iteration, plus the options
//! block handed to the engine. [`engine`] hosts the virtual users, rate cap,
//! and deadline; [`metrics`] turns per-request outcomes into a run summary.
//! The primary user-facing interface is the `howlite-loadtest` binary.
pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod metrics;
pub mod scenario;
pub mod shutdown;
pub mod shutdown_handlers;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
