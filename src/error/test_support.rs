use super::{ConfigError, MetricsError, PayloadError, ValidationError};

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        ValidationError::TestExpectation { message }
    }
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for ConfigError {
    fn from(message: &'static str) -> Self {
        ConfigError::TestExpectation { message }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        ConfigError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for PayloadError {
    fn from(message: &'static str) -> Self {
        PayloadError::TestExpectation { message }
    }
}

impl From<String> for PayloadError {
    fn from(value: String) -> Self {
        PayloadError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for MetricsError {
    fn from(message: &'static str) -> Self {
        MetricsError::TestExpectation { message }
    }
}

impl From<String> for MetricsError {
    fn from(value: String) -> Self {
        MetricsError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}
