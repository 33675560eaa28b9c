use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{DEFAULT_CHART_HEIGHT, DEFAULT_TIMEOUT};
use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::{DispatchMode, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fire a fixed batch of HTTP requests at an endpoint and chart per-request latency in the terminal.",
    override_usage = "benchload <URL> <NUM_REQUESTS> [BEARER_TOKEN] [JSON_FOLDER] [OPTIONS]"
)]
pub struct LoadArgs {
    /// Target URL (absolute http/https)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Number of requests to send (>= 1)
    #[arg(value_name = "NUM_REQUESTS")]
    pub requests: Option<String>,

    /// Optional bearer token and/or folder of *.json payloads.
    /// With a single value, an existing directory is taken as the payload folder.
    #[arg(value_name = "TOKEN_OR_FOLDER", num_args = 0..=2)]
    pub trailing: Vec<String>,

    /// Bearer token sent as `Authorization: Bearer <token>`
    #[arg(long = "token", env = "BENCHLOAD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Folder of *.json files used as POST bodies
    #[arg(long = "payload-dir")]
    pub payload_dir: Option<PathBuf>,

    /// Dispatch policy
    #[arg(long = "mode", value_enum, default_value_t = DispatchMode::Windowed)]
    pub mode: DispatchMode,

    /// Requests per window in windowed mode (defaults to available parallelism)
    #[arg(long = "window-size", value_parser = parse_positive_usize)]
    pub window_size: Option<PositiveUsize>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Also chart response size (MB) per sampled request
    #[arg(long = "bandwidth")]
    pub bandwidth: bool,

    /// Chart height in rows
    #[arg(long = "chart-height", default_value = DEFAULT_CHART_HEIGHT, value_parser = parse_positive_usize)]
    pub chart_height: PositiveUsize,

    /// Disable ANSI colors
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to a TOML or JSON config file
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
