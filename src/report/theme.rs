use std::io::IsTerminal;

use ratatui::style::Color;

pub(super) const SUCCESS_LATENCY_COLOR: Color = Color::Green;
pub(super) const FAILURE_COLOR: Color = Color::Red;
pub(super) const SUCCESS_BANDWIDTH_COLOR: Color = Color::Yellow;
pub(super) const LABEL_COLOR: Color = Color::Cyan;
pub(super) const CHART_FILL: char = '·';

pub(super) fn use_color(no_color: bool) -> bool {
    !no_color && std::io::stdout().is_terminal()
}
