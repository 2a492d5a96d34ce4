//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::LoadArgs;
pub use types::{PathAlphabet, PositiveU64, PositiveUsize};

pub(crate) use defaults::{DEFAULT_CONFIG_FILES, DEFAULT_TARGET, DEFAULT_USER_AGENT, MAX_VUS};
pub(crate) use parsers::parse_duration_arg;
