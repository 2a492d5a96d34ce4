use std::time::Duration;

use super::defaults::MAX_VUS;
use super::types::{PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

/// Positive virtual-user count no larger than `MAX_VUS`.
pub(super) fn parse_vus(s: &str) -> AppResult<PositiveU64> {
    let vus = parse_positive_u64(s)?;
    if vus.get() > MAX_VUS {
        return Err(AppError::validation(ValidationError::ValueTooLarge {
            max: MAX_VUS,
        }));
    }
    Ok(vus)
}

/// Validates a duration string and keeps it in its textual form.
pub(super) fn parse_duration_text(s: &str) -> AppResult<String> {
    parse_duration_arg(s)?;
    Ok(s.trim().to_owned())
}

/// Parses `<n><unit>` parts (`ms`, `s`, `m`, `h`), e.g. `2m`, `1m30s`,
/// `1h2m500ms`. A lone number without a unit is seconds.
pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let value = s.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::DurationEmpty));
    }

    let mut rest = value;
    let mut total = Duration::ZERO;
    let mut is_first = true;
    while !rest.is_empty() {
        let digits_len = rest
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_len == 0 {
            return Err(invalid_format(value));
        }
        let (num_part, after_number) = rest.split_at(digits_len);
        let unit_len = after_number
            .find(|ch: char| ch.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit_part, remainder) = after_number.split_at(unit_len);

        let number: u64 = num_part.parse().map_err(|err| {
            AppError::validation(ValidationError::InvalidDurationNumber {
                value: value.to_owned(),
                source: err,
            })
        })?;
        let unit = match unit_part {
            "" if is_first => "s",
            "" => return Err(invalid_format(value)),
            unit => unit,
        };

        total = total
            .checked_add(unit_duration(number, unit)?)
            .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
        is_first = false;
        rest = remainder;
    }

    if total.as_millis() == 0 {
        return Err(AppError::validation(ValidationError::DurationZero));
    }

    Ok(total)
}

fn unit_duration(number: u64, unit: &str) -> AppResult<Duration> {
    match unit {
        "ms" => Ok(Duration::from_millis(number)),
        "s" => Ok(Duration::from_secs(number)),
        "m" => number
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow)),
        "h" => number
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_mul(60))
            .map(Duration::from_secs)
            .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow)),
        _ => Err(AppError::validation(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        })),
    }
}

fn invalid_format(value: &str) -> AppError {
    AppError::validation(ValidationError::InvalidDurationFormat {
        value: value.to_owned(),
    })
}
