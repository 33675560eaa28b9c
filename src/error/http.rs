use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid bearer token: {source}")]
    InvalidBearerToken {
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
}
