use crossterm::style::Stylize;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::{self, Marker};
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Widget};

const MIN_PLOT_COLUMNS: usize = 20;
const MAX_PLOT_COLUMNS: usize = 100;
/// X-axis line plus its label row.
const X_AXIS_ROWS: usize = 2;

/// One line of the chart and the color it is drawn in.
#[derive(Debug, Clone, Copy)]
pub struct ChartSeries<'data> {
    pub values: &'data [u64],
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Rows of the plot area; the x axis adds two more.
    pub height: usize,
    pub fill: char,
    pub label_color: Color,
    pub color: bool,
}

/// Draws the series with a ratatui line chart into an off-screen buffer and
/// returns the buffer as text, one line per row. Series are drawn in order,
/// later ones on top.
#[must_use]
pub fn plot<L>(series: &[ChartSeries<'_>], options: &ChartOptions, format_label: L) -> String
where
    L: Fn(u64) -> String,
{
    let len = series
        .iter()
        .map(|line| line.values.len())
        .max()
        .unwrap_or(0);
    if len == 0 {
        return String::new();
    }

    let max = series
        .iter()
        .flat_map(|line| line.values.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);
    let y_labels: Vec<String> = [0, max.checked_div(2).unwrap_or(0), max]
        .into_iter()
        .map(&format_label)
        .collect();
    let label_width = y_labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);

    let points: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|line| {
            line.values
                .iter()
                .enumerate()
                .map(|(slot, value)| (slot as f64, *value as f64))
                .collect()
        })
        .collect();

    let label_style = if options.color {
        Style::default().fg(options.label_color)
    } else {
        Style::default()
    };
    let datasets = series
        .iter()
        .zip(points.iter())
        .map(|(line, data)| {
            let style = if options.color {
                Style::default().fg(line.color)
            } else {
                Style::default()
            };
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(data)
        })
        .collect();

    let x_max = len.saturating_sub(1).max(1);
    let chart = Chart::new(datasets)
        .hidden_legend_constraints((Constraint::Ratio(0, 1), Constraint::Ratio(0, 1)))
        .x_axis(
            Axis::default()
                .style(label_style)
                .bounds([0.0, x_max as f64])
                .labels(vec![Span::raw("1"), Span::raw(len.to_string())]),
        )
        .y_axis(
            Axis::default()
                .style(label_style)
                .bounds([0.0, max as f64])
                .labels(y_labels.into_iter().map(Span::raw).collect()),
        );

    let columns = len.clamp(MIN_PLOT_COLUMNS, MAX_PLOT_COLUMNS);
    let width = label_width.saturating_add(1).saturating_add(columns);
    let height = options.height.max(1).saturating_add(X_AXIS_ROWS);
    let area = Rect::new(
        0,
        0,
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(height).unwrap_or(u16::MAX),
    );
    let mut buffer = Buffer::empty(area);
    chart.render(area, &mut buffer);

    buffer_to_text(&buffer, options)
}

/// Serializes the buffer row by row. Blank cells of the plot area (right of
/// the y axis, above the x axis) become the fill glyph.
fn buffer_to_text(buffer: &Buffer, options: &ChartOptions) -> String {
    let area = buffer.area;
    let mut out = String::new();
    let mut below_x_axis = false;

    for y in area.top()..area.bottom() {
        let mut row = String::new();
        let mut inside_plot = false;
        let mut axis_corner = false;

        for x in area.left()..area.right() {
            let cell = buffer.get(x, y);
            let symbol = cell.symbol.as_str();
            if symbol == symbols::line::BOTTOM_LEFT {
                axis_corner = true;
            }

            if inside_plot && !below_x_axis && symbol == " " {
                row.push(options.fill);
            } else if options.color && cell.fg != Color::Reset {
                row.push_str(
                    &symbol
                        .with(crossterm::style::Color::from(cell.fg))
                        .to_string(),
                );
            } else {
                row.push_str(symbol);
            }

            if symbol == symbols::line::VERTICAL {
                inside_plot = true;
            }
        }

        out.push_str(row.trim_end());
        out.push('\n');
        if axis_corner {
            below_x_axis = true;
        }
    }
    out
}
