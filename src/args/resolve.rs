use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;
use url::Url;

use super::cli::LoadArgs;
use super::defaults::default_window_size;
use super::parsers::{parse_request_count, parse_target_url};
use super::types::{DispatchMode, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

/// Fully validated inputs for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub url: Url,
    pub requests: PositiveUsize,
    pub bearer_token: Option<String>,
    pub payload_dir: Option<PathBuf>,
    pub mode: DispatchMode,
    pub window_size: PositiveUsize,
    pub timeout: Duration,
    pub bandwidth: bool,
    pub chart_height: PositiveUsize,
    pub no_color: bool,
}

impl RunSettings {
    /// Validates the URL and request count and settles the trailing
    /// positionals into a bearer token and payload folder.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or malformed URL, a missing or
    /// non-positive request count, or surplus positionals.
    pub fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let raw_url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let url = parse_target_url(raw_url)?;
        let raw_requests = args
            .requests
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingRequestCount))?;
        let requests = parse_request_count(raw_requests)?;

        let (positional_token, positional_dir) = split_trailing(&args.trailing)?;
        let bearer_token = non_empty(args.token.clone().or(positional_token));
        let payload_dir = args.payload_dir.clone().or(positional_dir);

        Ok(Self {
            url,
            requests,
            bearer_token,
            payload_dir,
            mode: args.mode,
            window_size: args.window_size.unwrap_or_else(default_window_size),
            timeout: args.timeout,
            bandwidth: args.bandwidth,
            chart_height: args.chart_height,
            no_color: args.no_color,
        })
    }
}

/// `[token] [folder]` with both present, otherwise a lone value is the folder
/// when it names an existing directory and the token when it does not.
fn split_trailing(trailing: &[String]) -> AppResult<(Option<String>, Option<PathBuf>)> {
    match trailing {
        [] => Ok((None, None)),
        [single] if Path::new(single).is_dir() => Ok((None, Some(PathBuf::from(single)))),
        [single] => {
            if looks_like_path(single) {
                warn!(
                    "'{}' is not an existing directory; sending it as the bearer token",
                    single
                );
            }
            Ok((Some(single.clone()), None))
        }
        [token, folder] => Ok((Some(token.clone()), Some(PathBuf::from(folder)))),
        [_, _, extra, ..] => Err(AppError::validation(
            ValidationError::UnexpectedPositional {
                value: extra.clone(),
            },
        )),
    }
}

/// Tokens never contain path separators; a value that does is most likely a
/// mistyped payload folder.
pub(super) fn looks_like_path(value: &str) -> bool {
    value.contains('/') || value.contains(std::path::MAIN_SEPARATOR)
}

/// An empty token (e.g. `""` used as a placeholder) means no auth.
fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|value| !value.trim().is_empty())
}
