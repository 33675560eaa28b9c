use std::num::NonZeroUsize;

use super::types::PositiveUsize;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("benchload/", env!("CARGO_PKG_VERSION"));

/// Config filenames checked in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["benchload.toml", "benchload.json"];

pub(super) const DEFAULT_TIMEOUT: &str = "200s";
pub(super) const DEFAULT_CHART_HEIGHT: &str = "15";

/// Window size used when none is configured: one request per hardware thread.
pub(crate) fn default_window_size() -> PositiveUsize {
    let threads = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    PositiveUsize::try_from(threads).unwrap_or(PositiveUsize::ONE)
}
