use std::time::Duration;

use serde::Deserialize;

use crate::args::{PathAlphabet, parse_duration_arg};
use crate::error::{AppError, AppResult, ValidationError};

/// On-disk config layout (`howlite-loadtest.toml` / `.json`).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub target: Option<String>,
    pub timeout: Option<DurationValue>,
    pub alphabet: Option<PathAlphabet>,
    pub path_length: Option<usize>,
    pub summary_export: Option<String>,
    pub options: Option<OptionsConfig>,
}

/// Engine-facing `options` block.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    pub duration: Option<DurationValue>,
    pub rps: Option<u64>,
    pub vus: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(AppError::validation(ValidationError::DurationZero))
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }

    /// Textual form accepted by the options block (`120` becomes `120s`).
    pub(crate) fn to_text(&self) -> AppResult<String> {
        self.to_duration()?;
        match self {
            DurationValue::Seconds(secs) => Ok(format!("{}s", secs)),
            DurationValue::Text(text) => Ok(text.trim().to_owned()),
        }
    }
}
