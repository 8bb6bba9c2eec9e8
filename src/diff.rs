//! Differ: classifies every path of two fingerprint mappings
//!
//! Classification looks only at content identity (digest and size). A file
//! whose modification time changed but whose content did not is unchanged.
//! Renames are not detected: a moved file shows up as one deleted path and
//! one new path.

use crate::types::FingerprintMapping;
use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome for a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    New,
    Deleted,
    Modified,
    Unchanged,
}

/// Result of comparing a current scan against a baseline
///
/// The three sets are pairwise disjoint. Keys present in both mappings with
/// the same content are counted in `unchanged` and appear in no set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// In current, not in baseline
    pub new: BTreeSet<String>,
    /// In baseline, not in current
    pub deleted: BTreeSet<String>,
    /// In both, with a different digest or size
    pub modified: BTreeSet<String>,
    /// Number of keys in both with identical content
    pub unchanged: usize,
}

impl ClassificationResult {
    /// True when no path was added, removed, or modified
    pub fn is_clean(&self) -> bool {
        self.new.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    pub fn total_changes(&self) -> usize {
        self.new.len() + self.deleted.len() + self.modified.len()
    }

    /// Classification of `path`.
    ///
    /// Paths found in neither mapping also report `Unchanged`.
    pub fn classify(&self, path: &str) -> Change {
        if self.new.contains(path) {
            Change::New
        } else if self.deleted.contains(path) {
            Change::Deleted
        } else if self.modified.contains(path) {
            Change::Modified
        } else {
            Change::Unchanged
        }
    }
}

/// Compare `current` against `baseline`
pub fn diff(current: &FingerprintMapping, baseline: &FingerprintMapping) -> ClassificationResult {
    let mut result = ClassificationResult::default();

    for (path, record) in current {
        match baseline.get(path) {
            None => {
                result.new.insert(path.clone());
            }
            Some(previous) if !record.same_content(previous) => {
                result.modified.insert(path.clone());
            }
            Some(_) => result.unchanged += 1,
        }
    }

    result.deleted = baseline
        .keys()
        .filter(|path| !current.contains_key(*path))
        .cloned()
        .collect();

    result
}
