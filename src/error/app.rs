use thiserror::Error;

use super::{ConfigError, HttpError, MetricsError, PayloadError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn payload<E>(error: E) -> Self
    where
        E: Into<PayloadError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn metrics<E>(error: E) -> Self
    where
        E: Into<MetricsError>,
    {
        error.into().into()
    }

    /// Argument errors that should be followed by the usage line.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
