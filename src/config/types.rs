use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::args::DispatchMode;
use crate::args::parsers::parse_duration_value;
use crate::error::ValidationError;

/// Values a `benchload.toml` / `benchload.json` file may set. Every field is
/// optional and only fills in what the command line left unset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<u64>,
    pub token: Option<String>,
    pub payload_dir: Option<PathBuf>,
    pub mode: Option<DispatchMode>,
    pub window_size: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub bandwidth: Option<bool>,
    pub chart_height: Option<usize>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
