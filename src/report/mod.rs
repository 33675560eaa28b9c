//! Console output for a run: progress lines, the summary, and the charts.
mod chart;
mod formatting;
mod summary;
mod theme;


use crate::args::RunSettings;
use crate::http::WindowReport;
use crate::metrics::{ProgressSample, RunAggregate, SeriesPair};

pub use chart::{ChartOptions, ChartSeries, plot};
pub use formatting::{format_mb, format_ms};

/// Writes run output to stdout.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
    bandwidth: bool,
    chart_height: usize,
}

impl Reporter {
    #[must_use]
    pub fn new(settings: &RunSettings) -> Self {
        Self {
            color: theme::use_color(settings.no_color),
            bandwidth: settings.bandwidth,
            chart_height: settings.chart_height.get(),
        }
    }

    pub fn start(&self, settings: &RunSettings) {
        println!(
            "{}",
            summary::start_line(&settings.url, settings.requests.get(), settings.mode)
        );
    }

    pub fn progress(&self, sample: &ProgressSample) {
        println!("{}", summary::progress_line(sample));
    }

    pub fn window(&self, report: &WindowReport) {
        println!("{}", summary::window_line(report));
    }

    pub fn finish(&self, aggregate: &RunAggregate) {
        print!("{}", self.render(aggregate));
    }

    /// Full end-of-run text: summary lines followed by the chart(s).
    #[must_use]
    pub fn render(&self, aggregate: &RunAggregate) -> String {
        let mut out = String::new();
        for line in summary::summary_lines(aggregate) {
            out.push_str(&line);
            out.push('\n');
        }

        let filled = aggregate.filled_slots();
        if filled == 0 {
            return out;
        }

        out.push_str(&summary::latency_caption(aggregate.stride()));
        out.push('\n');
        out.push_str(&self.chart(
            aggregate.latency_series(),
            filled,
            theme::SUCCESS_LATENCY_COLOR,
            |us| format!("{} ms", format_ms(us)),
        ));

        if self.bandwidth {
            out.push_str(&summary::bandwidth_caption(aggregate.stride()));
            out.push('\n');
            out.push_str(&self.chart(
                aggregate.bandwidth_series(),
                filled,
                theme::SUCCESS_BANDWIDTH_COLOR,
                |bytes| format!("{} MB", format_mb(bytes)),
            ));
        }
        out
    }

    fn chart<L>(
        &self,
        series: &SeriesPair,
        filled: usize,
        success_color: ratatui::style::Color,
        format_label: L,
    ) -> String
    where
        L: Fn(u64) -> String,
    {
        let success = series.success.get(..filled).unwrap_or(&series.success);
        let failure = series.failure.get(..filled).unwrap_or(&series.failure);
        let lines = [
            ChartSeries {
                values: success,
                color: success_color,
            },
            ChartSeries {
                values: failure,
                color: theme::FAILURE_COLOR,
            },
        ];
        let options = ChartOptions {
            height: self.chart_height,
            fill: theme::CHART_FILL,
            label_color: theme::LABEL_COLOR,
            color: self.color,
        };
        plot(&lines, &options, format_label)
    }
}
