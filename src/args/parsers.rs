use std::time::Duration;

use url::Url;

use super::types::PositiveUsize;
use crate::error::{AppError, AppResult, ValidationError};

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(super) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::from)
}

/// Accepts absolute `http`/`https` URLs only.
pub(crate) fn parse_target_url(s: &str) -> Result<Url, ValidationError> {
    let value = s.trim();
    let url = Url::parse(value).map_err(|err| ValidationError::InvalidUrl {
        value: value.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(ValidationError::UnsupportedScheme {
            value: value.to_owned(),
        }),
    }
}

pub(crate) fn parse_request_count(s: &str) -> Result<PositiveUsize, ValidationError> {
    let value = s.trim();
    value
        .parse::<usize>()
        .ok()
        .and_then(|count| PositiveUsize::try_from(count).ok())
        .ok_or_else(|| ValidationError::InvalidRequestCount {
            value: value.to_owned(),
        })
}

/// Parses `250ms`, `30s`, `2m`, `1h`; a bare number means seconds.
pub(crate) fn parse_duration_value(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|minutes| minutes.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
