use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::error::{AppError, AppResult, PayloadError};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// One JSON document sent verbatim as a POST body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub path: PathBuf,
    pub body: Bytes,
}

/// Maps a request index to the body it carries, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PayloadSource {
    /// No folder given: every request is a plain GET.
    #[default]
    Empty,
    /// A single file, reused by every request.
    Single(Payload),
    /// File `i` for request `i`; requests past the last file fall back to GET.
    PerIndex(Vec<Payload>),
}

impl PayloadSource {
    /// Reads every `*.json` file in `dir` up front.
    ///
    /// # Errors
    ///
    /// Returns an error when the folder is missing, cannot be listed, holds no
    /// JSON files, or a file cannot be read.
    pub fn load(dir: Option<&Path>) -> AppResult<Self> {
        let Some(dir) = dir else {
            return Ok(PayloadSource::Empty);
        };
        let files = discover_json_files(dir)?;
        let mut payloads = Vec::with_capacity(files.len());
        for path in files {
            let body = std::fs::read(&path).map_err(|err| {
                AppError::payload(PayloadError::ReadFile {
                    path: path.clone(),
                    source: err,
                })
            })?;
            debug!("Loaded payload {} ({} bytes)", path.display(), body.len());
            payloads.push(Payload {
                path,
                body: Bytes::from(body),
            });
        }
        Ok(Self::from_payloads(payloads))
    }

    #[must_use]
    pub fn from_payloads(mut payloads: Vec<Payload>) -> Self {
        match payloads.len() {
            0 => PayloadSource::Empty,
            1 => payloads
                .pop()
                .map_or(PayloadSource::Empty, PayloadSource::Single),
            _ => PayloadSource::PerIndex(payloads),
        }
    }

    #[must_use]
    pub fn payload_for(&self, index: usize) -> Option<&Payload> {
        match self {
            PayloadSource::Empty => None,
            PayloadSource::Single(payload) => Some(payload),
            PayloadSource::PerIndex(payloads) => payloads.get(index),
        }
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            PayloadSource::Empty => 0,
            PayloadSource::Single(_) => 1,
            PayloadSource::PerIndex(payloads) => payloads.len(),
        }
    }
}

/// Lists the `*.json` files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns an error when `dir` is not a readable directory or contains no
/// JSON files.
pub fn discover_json_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AppError::payload(PayloadError::NotADirectory {
            path: dir.to_path_buf(),
        }));
    }
    let entries = std::fs::read_dir(dir).map_err(|err| {
        AppError::payload(PayloadError::ReadDir {
            path: dir.to_path_buf(),
            source: err,
        })
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            AppError::payload(PayloadError::ReadDir {
                path: dir.to_path_buf(),
                source: err,
            })
        })?;
        let path = entry.path();
        if path.is_file() && has_json_extension(&path) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(AppError::payload(PayloadError::NoJsonFiles {
            path: dir.to_path_buf(),
        }));
    }
    files.sort();
    Ok(files)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
