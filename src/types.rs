//! Core types for file fingerprints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hex-encoded SHA-256 content digest (64 lowercase characters)
pub type Digest = String;

/// Length of a hex-encoded digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Fingerprint of a single regular file at scan time
///
/// Field names on disk (`hash`, `size`, `modified`) are part of the baseline
/// format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    /// Content digest of the full file
    #[serde(rename = "hash")]
    pub digest: Digest,

    /// Byte length at read time
    pub size: u64,

    /// Modification time in seconds since the Unix epoch. Informational only.
    #[serde(rename = "modified")]
    pub modified_at: f64,
}

impl FingerprintRecord {
    pub fn new(digest: Digest, size: u64, modified_at: f64) -> Self {
        Self {
            digest,
            size,
            modified_at,
        }
    }

    /// Whether two records describe the same content.
    ///
    /// Only `digest` and `size` take part; `modified_at` is ignored.
    pub fn same_content(&self, other: &FingerprintRecord) -> bool {
        self.digest == other.digest && self.size == other.size
    }
}

/// Root-relative, `/`-separated path -> fingerprint
pub type FingerprintMapping = BTreeMap<String, FingerprintRecord>;
