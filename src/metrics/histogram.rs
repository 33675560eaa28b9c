use hdrhistogram::Histogram;

use crate::error::MetricsError;

/// Microsecond latency distribution behind the percentile lines of the summary.
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new auto-resizing latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        let hist =
            Histogram::<u64>::new(3).map_err(|err| MetricsError::Histogram { source: err })?;
        Ok(Self { hist })
    }

    pub fn record(&mut self, latency_us: u64) {
        self.hist.saturating_record(latency_us.max(1));
    }

    /// P50, P90 and P99 in microseconds; zeros when nothing was recorded.
    #[must_use]
    pub fn percentiles(&self) -> (u64, u64, u64) {
        if self.count() == 0 {
            return (0, 0, 0);
        }

        (
            self.hist.value_at_quantile(0.5),
            self.hist.value_at_quantile(0.9),
            self.hist.value_at_quantile(0.99),
        )
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}
