//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ScanError};

/// Map domain errors to the message printed on stderr before exiting.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Scan(ScanError::RootNotFound(path)) => {
            format!("Error: directory {} does not exist", path.display())
        }
        _ => format!("Error: {}", e),
    }
}
