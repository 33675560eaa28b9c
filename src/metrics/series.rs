/// Number of slots in every chart series.
pub const SERIES_CAPACITY: usize = 100;

/// Sampling interval in request-index units: every request below 100, else
/// one in `total / 100`.
#[must_use]
pub fn sampling_stride(total: usize) -> usize {
    if total < SERIES_CAPACITY {
        return 1;
    }
    total.checked_div(SERIES_CAPACITY).unwrap_or(1).max(1)
}

/// Slot a sampled request lands in, capped at the last slot.
#[must_use]
pub fn reservoir_index(index: usize, stride: usize) -> usize {
    index
        .checked_div(stride.max(1))
        .unwrap_or(index)
        .min(SERIES_CAPACITY.saturating_sub(1))
}

/// Success and failure samples sharing one slot axis. A slot holds a value in
/// at most one of the two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPair {
    pub success: [u64; SERIES_CAPACITY],
    pub failure: [u64; SERIES_CAPACITY],
}

impl Default for SeriesPair {
    fn default() -> Self {
        Self {
            success: [0; SERIES_CAPACITY],
            failure: [0; SERIES_CAPACITY],
        }
    }
}

impl SeriesPair {
    pub(super) fn write(&mut self, slot: usize, success: bool, value: u64) {
        let target = if success {
            &mut self.success
        } else {
            &mut self.failure
        };
        if let Some(cell) = target.get_mut(slot) {
            *cell = value;
        }
    }

    /// Largest value across both halves.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.success
            .iter()
            .chain(self.failure.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }
}
