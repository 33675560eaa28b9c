use url::Url;

use crate::args::DispatchMode;
use crate::http::WindowReport;
use crate::metrics::{ProgressSample, RunAggregate};

use super::formatting::{format_mb, format_ms};

pub(super) fn start_line(url: &Url, requests: usize, mode: DispatchMode) -> String {
    format!(
        "Benchmarking {url} with {requests} requests ({} mode)...",
        mode.as_str()
    )
}

pub(super) fn progress_line(sample: &ProgressSample) -> String {
    format!(
        "Successful: {}, Failed: {}, Average response time: {} ms, Bandwidth: {} MB",
        sample.successful,
        sample.failed,
        format_ms(sample.average_latency_us),
        format_mb(sample.response_bytes)
    )
}

pub(super) fn window_line(report: &WindowReport) -> String {
    let elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX);
    format!(
        "Window {}/{}: requests {}..{} done in {}ms",
        report.number, report.window_count, report.range.start, report.range.end, elapsed_ms
    )
}

/// Counter, latency and failure lines printed after the run.
pub(super) fn summary_lines(aggregate: &RunAggregate) -> Vec<String> {
    let (min_us, max_us) = aggregate.latency_bounds_us();
    let (p50, p90, p99) = aggregate.percentiles_us();

    let mut lines = vec![
        "Summary:".to_owned(),
        format!("Total Requests: {}", aggregate.total_requests()),
        format!("Successful Requests: {}", aggregate.successful()),
        format!("Failed Requests: {}", aggregate.failed()),
        format!(
            "Average response time: {} ms",
            format_ms(aggregate.average_latency_us())
        ),
        format!(
            "Average body read time: {} ms",
            format_ms(aggregate.average_body_time_us())
        ),
        format!(
            "Min/Max response time: {} ms / {} ms",
            format_ms(min_us),
            format_ms(max_us)
        ),
        format!(
            "P50/P90/P99 response time: {} ms / {} ms / {} ms",
            format_ms(p50),
            format_ms(p90),
            format_ms(p99)
        ),
    ];

    if !aggregate.failure_reasons().is_empty() {
        lines.push("Failed requests log:".to_owned());
        lines.extend(
            aggregate
                .failure_reasons()
                .iter()
                .map(|reason| format!("Failed request reason: {reason}")),
        );
    }
    lines
}

pub(super) fn latency_caption(stride: usize) -> String {
    format!("Chart: Response time (ms) per {stride} requests")
}

pub(super) fn bandwidth_caption(stride: usize) -> String {
    format!("Chart: Bandwidth (MB) per {stride} requests")
}
