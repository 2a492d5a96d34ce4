use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{LoadArgs, MAX_VUS, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line or through an environment variable win
/// over the config file.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "target")
        && let Some(target) = config.target.clone()
    {
        args.target = target;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout
            .to_duration()
            .map_err(|err| invalid_field("timeout", err))?;
    }

    if !is_explicit(matches, "alphabet")
        && let Some(alphabet) = config.alphabet
    {
        args.alphabet = alphabet;
    }

    if !is_explicit(matches, "path_length")
        && let Some(length) = config.path_length
    {
        args.path_length = PositiveUsize::try_from(length)
            .map_err(|err| invalid_field("path_length", AppError::validation(err)))?;
    }

    if !is_explicit(matches, "summary_export")
        && let Some(path) = config.summary_export.clone()
    {
        args.summary_export = Some(path);
    }

    if let Some(options) = config.options.as_ref() {
        if !is_explicit(matches, "duration")
            && let Some(duration) = options.duration.as_ref()
        {
            args.duration = duration
                .to_text()
                .map_err(|err| invalid_field("options.duration", err))?;
        }

        if !is_explicit(matches, "rps")
            && let Some(rps) = options.rps
        {
            args.rps = rps;
        }

        if !is_explicit(matches, "vus")
            && let Some(vus) = options.vus
        {
            if vus > MAX_VUS {
                return Err(invalid_field(
                    "options.vus",
                    AppError::validation(ValidationError::ValueTooLarge { max: MAX_VUS }),
                ));
            }
            args.vus = PositiveU64::try_from(vus)
                .map_err(|err| invalid_field("options.vus", AppError::validation(err)))?;
        }
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn invalid_field(field: &'static str, err: AppError) -> AppError {
    AppError::config(ConfigError::InvalidField {
        field,
        source: Box::new(err),
    })
}
