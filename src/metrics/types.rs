use std::time::Duration;

/// Result of one request, produced exactly once per dispatched task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    /// Position of the request in the run; decides series placement.
    pub index: usize,
    /// Send until status line and headers arrived.
    pub latency: Duration,
    /// Time spent draining the body, kept out of `latency`.
    pub body_time: Duration,
    pub success: bool,
    pub failure: Option<String>,
    pub response_bytes: Option<u64>,
}

impl RequestOutcome {
    #[must_use]
    pub const fn success(index: usize, latency: Duration, response_bytes: Option<u64>) -> Self {
        Self {
            index,
            latency,
            body_time: Duration::ZERO,
            success: true,
            failure: None,
            response_bytes,
        }
    }

    #[must_use]
    pub fn failure(
        index: usize,
        latency: Duration,
        reason: impl Into<String>,
        response_bytes: Option<u64>,
    ) -> Self {
        Self {
            index,
            latency,
            body_time: Duration::ZERO,
            success: false,
            failure: Some(reason.into()),
            response_bytes,
        }
    }

    #[must_use]
    pub const fn with_body_time(mut self, body_time: Duration) -> Self {
        self.body_time = body_time;
        self
    }

    #[must_use]
    pub fn latency_us(&self) -> u64 {
        micros(self.latency)
    }
}

/// Whole microseconds, saturating at `u64::MAX`.
#[must_use]
pub fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
