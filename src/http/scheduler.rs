use std::future::Future;
use std::ops::Range;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::debug;

use crate::args::PositiveUsize;
use crate::error::AppResult;
use crate::metrics::RequestOutcome;

use super::executor::{RequestTask, TaskPlan};

/// How requests are gated while in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Every request at once, one join at the end.
    Concurrent,
    /// Consecutive windows of the given size, joined one after another.
    Windowed(PositiveUsize),
}

impl DispatchPolicy {
    #[must_use]
    pub fn window_size(self, total: usize) -> usize {
        match self {
            DispatchPolicy::Concurrent => total.max(1),
            DispatchPolicy::Windowed(size) => size.get(),
        }
    }
}

/// All outcomes of one dispatch unit, sorted by request index.
#[derive(Debug, Clone)]
pub struct WindowReport {
    /// 1-based window number.
    pub number: usize,
    pub window_count: usize,
    pub range: Range<usize>,
    pub elapsed: Duration,
    pub outcomes: Vec<RequestOutcome>,
}

impl WindowReport {
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.number >= self.window_count
    }
}

/// Splits `0..total` into consecutive index ranges of at most `size`.
#[must_use]
pub fn window_ranges(total: usize, size: usize) -> Vec<Range<usize>> {
    let size = size.max(1);
    (0..total)
        .step_by(size)
        .map(|start| start..start.saturating_add(size).min(total))
        .collect()
}

/// Runs every task of `plan` through `execute`, handing each finished window
/// to `on_window` before the next window is launched.
///
/// # Errors
///
/// Returns an error when a request task panics or is cancelled.
pub async fn dispatch<E, Fut, F>(
    plan: &TaskPlan,
    policy: DispatchPolicy,
    execute: E,
    mut on_window: F,
) -> AppResult<()>
where
    E: Fn(RequestTask) -> Fut,
    Fut: Future<Output = RequestOutcome> + Send + 'static,
    F: FnMut(WindowReport),
{
    let ranges = window_ranges(plan.total(), policy.window_size(plan.total()));
    let window_count = ranges.len();

    for (position, range) in ranges.into_iter().enumerate() {
        let number = position.saturating_add(1);
        debug!(
            "Dispatching window {}/{} (requests {}..{})",
            number, window_count, range.start, range.end
        );
        let started = Instant::now();

        let mut in_flight = JoinSet::new();
        for index in range.clone() {
            in_flight.spawn(execute(plan.task(index)));
        }

        let mut outcomes = Vec::with_capacity(range.len());
        while let Some(joined) = in_flight.join_next().await {
            outcomes.push(joined?);
        }
        outcomes.sort_by_key(|outcome| outcome.index);

        on_window(WindowReport {
            number,
            window_count,
            range,
            elapsed: started.elapsed(),
            outcomes,
        });
    }

    Ok(())
}
