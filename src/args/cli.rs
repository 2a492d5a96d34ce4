use clap::Parser;
use std::time::Duration;

use crate::scenario::Options;

use super::defaults::{
    DEFAULT_DURATION, DEFAULT_PATH_LENGTH, DEFAULT_RPS, DEFAULT_TARGET, DEFAULT_TIMEOUT,
    DEFAULT_VUS,
};
use super::parsers::{
    parse_duration_arg, parse_duration_text, parse_positive_usize, parse_vus,
};
use super::types::{PathAlphabet, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Load scenario for howlite-resources: JSON POSTs to randomized paths at a fixed virtual-user count and rate cap."
)]
pub struct LoadArgs {
    /// Base URL of the target; every request appends a random path segment
    #[arg(long, short = 'u', env = "HOWLITE_TARGET", default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Run duration, e.g. 2m, 1m30s, 500ms (units: ms/s/m/h)
    #[arg(
        long,
        short = 'd',
        env = "HOWLITE_DURATION",
        default_value = DEFAULT_DURATION,
        value_parser = parse_duration_text
    )]
    pub duration: String,

    /// Aggregate requests per second across all virtual users (0 = uncapped)
    #[arg(long, short = 'r', env = "HOWLITE_RPS", default_value = DEFAULT_RPS)]
    pub rps: u64,

    /// Number of concurrent virtual users
    #[arg(
        long,
        short = 'c',
        env = "HOWLITE_VUS",
        default_value = DEFAULT_VUS,
        value_parser = parse_vus
    )]
    pub vus: PositiveU64,

    /// Per-request timeout, e.g. 60s, 1m30s (units: ms/s/m/h)
    #[arg(
        long = "timeout",
        env = "HOWLITE_TIMEOUT",
        default_value = DEFAULT_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Character set of the random path segment
    #[arg(long, value_enum, default_value_t = PathAlphabet::LowerAlnum)]
    pub alphabet: PathAlphabet,

    /// Length of the random path segment
    #[arg(
        long = "path-length",
        default_value = DEFAULT_PATH_LENGTH,
        value_parser = parse_positive_usize
    )]
    pub path_length: PositiveUsize,

    /// Path to config file (TOML or JSON)
    #[arg(long)]
    pub config: Option<String>,

    /// Print this many generated requests and exit without sending anything
    #[arg(long = "dump-requests", value_parser = parse_positive_usize)]
    pub dump_requests: Option<PositiveUsize>,

    /// Write the run summary as JSON to this path
    #[arg(long = "summary-export")]
    pub summary_export: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl LoadArgs {
    /// Engine-facing options block for this invocation.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            duration: self.duration.clone(),
            rps: self.rps,
            vus: self.vus.get(),
        }
    }
}
