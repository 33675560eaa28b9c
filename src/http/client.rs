use std::time::Duration;

use reqwest::Client;
use tracing::error;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Builds the client shared by every in-flight request of a run. Only the
/// per-request timeout and user agent live on the client; everything
/// request-specific is set on each request.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialized.
pub fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| {
            error!("Failed to build HTTP client: {}", err);
            AppError::http(HttpError::BuildClientFailed { source: err })
        })
}
