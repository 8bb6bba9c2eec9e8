//! Baseline Store
//!
//! Persists a [`FingerprintMapping`] as a pretty-printed JSON document:
//!
//! ```json
//! {
//!   "dir/file.txt": { "hash": "<64 hex chars>", "size": 12, "modified": 1700000000.5 }
//! }
//! ```
//!
//! Writes are atomic: the document goes to a sibling temporary file that is
//! renamed over the destination, so a failed save never leaves a partial
//! baseline behind.

use crate::error::BaselineError;
use crate::types::{FingerprintMapping, DIGEST_HEX_LEN};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// Serialize `mapping` and write it to `destination`
pub fn save(mapping: &FingerprintMapping, destination: &Path) -> Result<(), BaselineError> {
    let write_error = |source: std::io::Error| BaselineError::Write {
        path: destination.to_path_buf(),
        source,
    };

    let mut serialized = serde_json::to_vec_pretty(mapping)
        .map_err(|e| write_error(std::io::Error::new(ErrorKind::InvalidData, e)))?;
    serialized.push(b'\n');

    let parent = match destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(write_error)?;
            parent
        }
        None => Path::new("."),
    };

    // Uniquely named sibling, so no existing file is clobbered and the rename
    // stays on one filesystem. Dropped (and removed) on any failure.
    let mut temp = tempfile::Builder::new()
        .prefix(&temp_prefix_for(destination))
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(write_error)?;
    temp.write_all(&serialized).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(destination).map_err(|e| write_error(e.error))?;

    info!(
        path = %destination.display(),
        file_count = mapping.len(),
        bytes = serialized.len(),
        "Baseline saved"
    );
    Ok(())
}

/// Read and validate a baseline from `source`
pub fn load(source: &Path) -> Result<FingerprintMapping, BaselineError> {
    let content = fs::read_to_string(source).map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::NotFound => "file does not exist".to_string(),
            _ => e.to_string(),
        };
        BaselineError::parse(source, reason)
    })?;

    let mapping: FingerprintMapping = serde_json::from_str(&content)
        .map_err(|e| BaselineError::parse(source, format!("invalid baseline document: {}", e)))?;

    for (key, record) in &mapping {
        if key.is_empty() {
            return Err(BaselineError::parse(source, "empty path key"));
        }
        if !is_hex_digest(&record.digest) {
            return Err(BaselineError::parse(
                source,
                format!("entry {:?} has malformed hash {:?}", key, record.digest),
            ));
        }
        if !record.modified_at.is_finite() {
            return Err(BaselineError::parse(
                source,
                format!("entry {:?} has a non-finite modified time", key),
            ));
        }
    }

    debug!(path = %source.display(), file_count = mapping.len(), "Baseline loaded");
    Ok(mapping)
}

fn is_hex_digest(digest: &str) -> bool {
    digest.len() == DIGEST_HEX_LEN && digest.bytes().all(|b| b.is_ascii_hexdigit())
}

/// `.<file name>.` prefix for the temporary sibling
fn temp_prefix_for(destination: &Path) -> OsString {
    let mut prefix = OsString::from(".");
    prefix.push(
        destination
            .file_name()
            .unwrap_or_else(|| OsStr::new("baseline")),
    );
    prefix.push(".");
    prefix
}
