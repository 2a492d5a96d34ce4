use std::path::Path;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{LoadArgs, PathAlphabet, PositiveU64, PositiveUsize, parse_duration_arg};
use crate::config::types::ConfigFile;
use crate::config::{apply_config, load_config_file};
use crate::error::AppResult;
use crate::scenario::{Options, RequestDescriptor, RequestGenerator};

thread_local! {
    static BASE_MATCHES: ArgMatches = LoadArgs::command().get_matches_from(["howlite-loadtest"]);
}

/// Parses a duration argument (e.g. `2m`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Parses TOML config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<Options> {
    let config: ConfigFile = toml::from_str(input)?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<Options> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    apply_config_to_defaults(&config)
}

/// Loads a config file from disk, dispatching on its extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_config_path_input(path: &Path) -> AppResult<Options> {
    let config = load_config_file(path)?;
    apply_config_to_defaults(&config)
}

/// Parses a positive u64 string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_u64_input(input: &str) -> AppResult<u64> {
    let value: PositiveU64 = input.parse()?;
    Ok(value.get())
}

/// Parses a positive usize string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_usize_input(input: &str) -> AppResult<usize> {
    let value: PositiveUsize = input.parse()?;
    Ok(value.get())
}

/// Builds a generator for `target` and produces one request.
///
/// # Errors
///
/// Returns an error when the target URL or path length is rejected.
pub fn generate_request_input(
    target: &str,
    alphabet: PathAlphabet,
    path_length: usize,
) -> AppResult<RequestDescriptor> {
    let path_length = PositiveUsize::try_from(path_length)?;
    let generator = RequestGenerator::new(target, alphabet, path_length)?;
    Ok(generator.generate())
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<Options> {
    BASE_MATCHES.with(|matches| {
        let mut args = LoadArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)?;
        let options = args.options();
        options.validate()?;
        Ok(options)
    })
}
