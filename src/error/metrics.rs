use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to create latency histogram: {source}")]
    Histogram {
        #[source]
        source: hdrhistogram::CreationError,
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
