use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Payload folder '{path}' does not exist or is not a directory.")]
    NotADirectory { path: PathBuf },
    #[error("Failed to list payload folder '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No JSON files found in the specified folder '{path}'.")]
    NoJsonFiles { path: PathBuf },
    #[error("Failed to read payload file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
