/// Base URL of the resource service under test.
pub(crate) const DEFAULT_TARGET: &str = "http://howlite-resources:8080";

/// Config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] =
    ["howlite-loadtest.toml", "howlite-loadtest.json"];

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("howlite-loadtest/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_DURATION: &str = "2m";
pub(crate) const DEFAULT_RPS: &str = "1000";
pub(crate) const DEFAULT_VUS: &str = "1000";
/// Upper bound on concurrent virtual users.
pub(crate) const MAX_VUS: u64 = 100_000;
pub(crate) const DEFAULT_TIMEOUT: &str = "60s";
pub(crate) const DEFAULT_PATH_LENGTH: &str = "30";
