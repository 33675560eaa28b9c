use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{LoadArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Anything given on the
/// command line or through the environment wins.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_explicit(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = Some(requests.to_string());
    }

    if !is_explicit(matches, "token")
        && args.trailing.is_empty()
        && let Some(token) = config.token.clone()
    {
        args.token = Some(token);
    }

    if !is_explicit(matches, "payload_dir")
        && args.trailing.len() < 2
        && let Some(dir) = config.payload_dir.clone()
    {
        args.payload_dir = Some(dir);
    }

    if !is_explicit(matches, "mode")
        && let Some(mode) = config.mode
    {
        args.mode = mode;
    }

    if !is_explicit(matches, "window_size")
        && let Some(size) = config.window_size
    {
        args.window_size = Some(ensure_positive_usize(size, "window_size")?);
    }

    if !is_explicit(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "timeout",
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "bandwidth")
        && let Some(bandwidth) = config.bandwidth
    {
        args.bandwidth = bandwidth;
    }

    if !is_explicit(matches, "chart_height")
        && let Some(height) = config.chart_height
    {
        args.chart_height = ensure_positive_usize(height, "chart_height")?;
    }

    if !is_explicit(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_usize(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err: ValidationError| {
        AppError::config(ConfigError::InvalidField { field, source: err })
    })
}
