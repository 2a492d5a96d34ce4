use std::num::NonZeroU64;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::args::{MAX_VUS, PositiveUsize, parse_duration_arg};
use crate::error::{AppError, AppResult, ValidationError};

/// Options block handed to the engine: how long, how fast, how many VUs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub duration: String,
    pub rps: u64,
    pub vus: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            duration: "2m".to_owned(),
            rps: 1000,
            vus: 1000,
        }
    }
}

impl Options {
    /// Wall-clock length of the run.
    ///
    /// # Errors
    ///
    /// Returns an error when `duration` is not a valid duration string.
    pub fn run_duration(&self) -> AppResult<Duration> {
        parse_duration_arg(&self.duration)
    }

    /// Aggregate rate cap; `rps = 0` leaves the run uncapped.
    #[must_use]
    pub const fn rate_cap(&self) -> Option<NonZeroU64> {
        NonZeroU64::new(self.rps)
    }

    /// Number of virtual-user tasks to spawn.
    ///
    /// # Errors
    ///
    /// Returns an error when `vus` is zero or above `MAX_VUS`.
    pub fn virtual_users(&self) -> AppResult<PositiveUsize> {
        if self.vus > MAX_VUS {
            return Err(AppError::validation(ValidationError::ValueTooLarge {
                max: MAX_VUS,
            }));
        }
        let vus = usize::try_from(self.vus).unwrap_or(usize::MAX);
        PositiveUsize::try_from(vus).map_err(AppError::validation)
    }

    /// Checks every field without starting anything.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> AppResult<()> {
        self.run_duration()?;
        self.virtual_users()?;
        Ok(())
    }
}
