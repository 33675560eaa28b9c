use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::args::{DispatchMode, RunSettings};
use crate::error::AppResult;
use crate::http::{DispatchPolicy, RequestExecutor, TaskPlan, build_client, dispatch};
use crate::metrics::RunAggregate;
use crate::payload::PayloadSource;
use crate::report::Reporter;

use super::phase::RunPhase;

/// What a finished run leaves behind.
#[derive(Debug)]
pub struct RunReport {
    pub aggregate: RunAggregate,
    pub phase: RunPhase,
    pub elapsed: Duration,
}

/// Runs the whole load test described by `settings` and prints its report.
///
/// # Errors
///
/// Returns an error when payloads cannot be loaded, the client or bearer
/// header cannot be built, or a request task fails to join.
pub async fn run_load(settings: &RunSettings) -> AppResult<RunReport> {
    let reporter = Reporter::new(settings);
    let total = settings.requests.get();

    let payloads = PayloadSource::load(settings.payload_dir.as_deref())?;
    debug!("Loaded {} payload file(s)", payloads.file_count());

    let client = build_client(settings.timeout)?;
    let plan = TaskPlan::new(
        settings.url.clone(),
        payloads,
        settings.bearer_token.as_deref(),
        total,
    )?;
    let mut aggregate = RunAggregate::new(total)?;
    let policy = dispatch_policy(settings);

    reporter.start(settings);
    let started = Instant::now();
    let mut phase = RunPhase::Dispatching;

    let executor = RequestExecutor::new(client);
    dispatch(
        &plan,
        policy,
        |task| {
            let executor = executor.clone();
            async move { executor.execute(task).await }
        },
        |window| {
            for outcome in &window.outcomes {
                if let Some(sample) = aggregate.fold(outcome) {
                    reporter.progress(&sample);
                }
            }
            if window.window_count > 1 {
                reporter.window(&window);
            }
            if !window.is_last() {
                phase.advance(RunPhase::Aggregating);
            }
        },
    )
    .await?;

    let elapsed = started.elapsed();
    reporter.finish(&aggregate);
    phase.advance(RunPhase::Reported);
    info!(
        "Completed {} requests in {}ms",
        aggregate.total_requests(),
        elapsed.as_millis()
    );

    Ok(RunReport {
        aggregate,
        phase,
        elapsed,
    })
}

const fn dispatch_policy(settings: &RunSettings) -> DispatchPolicy {
    match settings.mode {
        DispatchMode::Concurrent => DispatchPolicy::Concurrent,
        DispatchMode::Windowed => DispatchPolicy::Windowed(settings.window_size),
    }
}
