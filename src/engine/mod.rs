//! Host engine for the scenario.
//!
//! Spawns one task per virtual user, admits iterations through the shared
//! rate limiter, and stops everything when the run duration elapses or a
//! shutdown is broadcast. Failure classification happens here, never in the
//! scenario.
mod runner;
mod worker;


pub use runner::{LoadPlan, run_load};
