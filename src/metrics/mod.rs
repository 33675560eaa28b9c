//! Outcome types, the run aggregate, and the fixed-size sample series.
mod aggregate;
mod histogram;
mod series;
mod types;


pub use aggregate::{ProgressSample, RunAggregate};
pub use histogram::LatencyHistogram;
pub use series::{SERIES_CAPACITY, SeriesPair, reservoir_index, sampling_stride};
pub use types::{RequestOutcome, micros};
