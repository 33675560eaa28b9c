use crate::error::{AppError, AppResult};

use super::histogram::LatencyHistogram;
use super::series::{SERIES_CAPACITY, SeriesPair, reservoir_index, sampling_stride};
use super::types::{RequestOutcome, micros};

/// Emitted for every outcome whose index falls on the sampling stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSample {
    pub index: usize,
    pub successful: u64,
    pub failed: u64,
    pub average_latency_us: u64,
    pub response_bytes: u64,
}

/// Running totals and chart series for one run.
#[derive(Debug, Clone)]
pub struct RunAggregate {
    planned: usize,
    stride: usize,
    successful: u64,
    failed: u64,
    latency_sum_us: u128,
    body_time_sum_us: u128,
    min_latency_us: u64,
    max_latency_us: u64,
    failure_reasons: Vec<String>,
    histogram: LatencyHistogram,
    latency: SeriesPair,
    bandwidth: SeriesPair,
    filled: [bool; SERIES_CAPACITY],
}

impl RunAggregate {
    /// Creates an empty aggregate sized for `planned` requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency histogram cannot be allocated.
    pub fn new(planned: usize) -> AppResult<Self> {
        let histogram = LatencyHistogram::new().map_err(AppError::metrics)?;
        Ok(Self {
            planned,
            stride: sampling_stride(planned),
            successful: 0,
            failed: 0,
            latency_sum_us: 0,
            body_time_sum_us: 0,
            min_latency_us: u64::MAX,
            max_latency_us: 0,
            failure_reasons: Vec::new(),
            histogram,
            latency: SeriesPair::default(),
            bandwidth: SeriesPair::default(),
            filled: [false; SERIES_CAPACITY],
        })
    }

    /// Folds one outcome into the totals. Returns a progress sample when the
    /// outcome's index lies on the sampling stride.
    pub fn fold(&mut self, outcome: &RequestOutcome) -> Option<ProgressSample> {
        let latency_us = outcome.latency_us();
        self.latency_sum_us = self.latency_sum_us.saturating_add(u128::from(latency_us));
        self.min_latency_us = self.min_latency_us.min(latency_us);
        self.max_latency_us = self.max_latency_us.max(latency_us);
        self.histogram.record(latency_us);
        self.body_time_sum_us = self
            .body_time_sum_us
            .saturating_add(u128::from(micros(outcome.body_time)));

        if outcome.success {
            self.successful = self.successful.saturating_add(1);
        } else {
            self.failed = self.failed.saturating_add(1);
            if let Some(reason) = outcome.failure.as_deref()
                && !self.failure_reasons.iter().any(|known| known == reason)
            {
                self.failure_reasons.push(reason.to_owned());
            }
        }

        if outcome.index.checked_rem(self.stride) != Some(0) {
            return None;
        }

        let response_bytes = outcome.response_bytes.unwrap_or(0);
        let slot = reservoir_index(outcome.index, self.stride);
        // Only the first sampled index of a slot may fill it, whatever order
        // outcomes arrive in.
        if outcome.index == slot.saturating_mul(self.stride)
            && let Some(filled) = self.filled.get_mut(slot)
            && !*filled
        {
            *filled = true;
            self.latency.write(slot, outcome.success, latency_us);
            self.bandwidth.write(slot, outcome.success, response_bytes);
        }

        Some(ProgressSample {
            index: outcome.index,
            successful: self.successful,
            failed: self.failed,
            average_latency_us: self.average_latency_us(),
            response_bytes,
        })
    }

    /// Requests folded so far.
    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.successful.saturating_add(self.failed)
    }

    #[must_use]
    pub const fn planned(&self) -> usize {
        self.planned
    }

    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub const fn successful(&self) -> u64 {
        self.successful
    }

    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.failed
    }

    #[must_use]
    pub const fn latency_sum_us(&self) -> u128 {
        self.latency_sum_us
    }

    /// Mean latency over every folded outcome, `0` before the first one.
    #[must_use]
    pub fn average_latency_us(&self) -> u64 {
        let count = u128::from(self.successful.saturating_add(self.failed));
        self.latency_sum_us
            .checked_div(count)
            .map_or(0, |avg| u64::try_from(avg).unwrap_or(u64::MAX))
    }

    /// Mean time spent draining response bodies, kept apart from latency.
    #[must_use]
    pub fn average_body_time_us(&self) -> u64 {
        let count = u128::from(self.successful.saturating_add(self.failed));
        self.body_time_sum_us
            .checked_div(count)
            .map_or(0, |avg| u64::try_from(avg).unwrap_or(u64::MAX))
    }

    /// `(min, max)` latency, zeros before the first outcome.
    #[must_use]
    pub const fn latency_bounds_us(&self) -> (u64, u64) {
        if self.successful == 0 && self.failed == 0 {
            return (0, 0);
        }
        (self.min_latency_us, self.max_latency_us)
    }

    #[must_use]
    pub fn percentiles_us(&self) -> (u64, u64, u64) {
        self.histogram.percentiles()
    }

    /// Distinct failure classifications in first-seen order.
    #[must_use]
    pub fn failure_reasons(&self) -> &[String] {
        &self.failure_reasons
    }

    #[must_use]
    pub const fn latency_series(&self) -> &SeriesPair {
        &self.latency
    }

    #[must_use]
    pub const fn bandwidth_series(&self) -> &SeriesPair {
        &self.bandwidth
    }

    /// Width of the sampled range: highest written slot plus one.
    #[must_use]
    pub fn filled_slots(&self) -> usize {
        self.filled
            .iter()
            .rposition(|filled| *filled)
            .map_or(0, |slot| slot.saturating_add(1))
    }

    /// Whether `slot` holds a sample.
    #[must_use]
    pub fn is_slot_filled(&self, slot: usize) -> bool {
        self.filled.get(slot).copied().unwrap_or(false)
    }
}
