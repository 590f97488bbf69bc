//! Flat-file JSON persistence.
//!
//! Every durable artifact in this system is a whole JSON array in a single
//! file. Loading is lenient: a missing file is an empty input, a malformed
//! element is skipped with a warning, a UTF-8 BOM is tolerated. Saving is a
//! whole-file atomic replace (write to a sibling temp file, then rename) so
//! no reader ever observes a partially written file. There is no
//! cross-process locking; two concurrent writers remain an unsafe
//! condition the operator must avoid.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from flat-file persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("{path} is not a JSON array: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
}

/// Load a JSON array of records, skipping elements that fail to decode.
///
/// A missing file yields an empty vector - the affected stage degrades to
/// "no candidates" instead of aborting the run. A file that is not a JSON
/// array at the top level is an error; individual malformed elements are
/// skipped with a warning.
pub fn load_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "input file missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(StoreError::Read {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    // Listings exported on Windows tend to carry a UTF-8 BOM.
    let bytes = bytes
        .strip_prefix(&[0xef, 0xbb, 0xbf][..])
        .unwrap_or(&bytes[..]);

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        warn!(path = %path.display(), "input file empty, treating as empty");
        return Ok(Vec::new());
    }

    let values: Vec<serde_json::Value> =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

    let total = values.len();
    let mut records = Vec::with_capacity(total);
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "skipping malformed record");
            }
        }
    }

    debug!(path = %path.display(), loaded = records.len(), total, "loaded records");
    Ok(records)
}

/// Serialize records as pretty-printed JSON and atomically replace `path`.
pub fn save_json_array<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records).map_err(|e| StoreError::Serialize {
        path: path.display().to_string(),
        source: e,
    })?;
    save_text(path, &json)
}

/// Atomically replace `path` with `contents`.
///
/// The temp file lives in the same directory so the final rename stays on
/// one filesystem.
pub fn save_text(path: &Path, contents: &str) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    fs::write(&tmp, contents).map_err(|source| StoreError::Write {
        path: tmp.display().to_string(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(write_err)?;
    Ok(())
}
