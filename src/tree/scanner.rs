//! Tree scanner: walks a root and fingerprints every regular file under it

use crate::config::ScanConfig;
use crate::error::{ReadError, ScanError};
use crate::tree::hasher::{Fingerprinter, Sha256Fingerprinter};
use crate::tree::path;
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use crate::types::{FingerprintMapping, FingerprintRecord};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A file left out of the mapping because it could not be read
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub key: String,
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a scan: the mapping plus per-file diagnostics
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Resolved absolute root
    pub root: PathBuf,
    pub fingerprints: FingerprintMapping,
    pub skipped: Vec<SkippedFile>,
}

/// Produces a [`FingerprintMapping`] for a directory tree
///
/// Every call is independent; nothing is cached between scans.
pub struct Scanner {
    root: PathBuf,
    walker_config: WalkerConfig,
    jobs: usize,
    fingerprinter: Arc<dyn Fingerprinter>,
}

impl Scanner {
    /// Create a sequential scanner with the default SHA-256 fingerprinter
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            walker_config: WalkerConfig::default(),
            jobs: 1,
            fingerprinter: Arc::new(Sha256Fingerprinter::default()),
        }
    }

    /// Create a scanner from the `[scan]` configuration section
    pub fn from_config(root: impl Into<PathBuf>, config: &ScanConfig) -> Self {
        Self::new(root)
            .with_walker_config(WalkerConfig {
                ignore_patterns: config.ignore.clone(),
                max_depth: config.max_depth,
                exclude: Vec::new(),
            })
            .with_jobs(config.jobs)
            .with_fingerprinter(Sha256Fingerprinter::new(config.chunk_size))
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Worker count: 1 hashes sequentially, 0 uses the global rayon pool,
    /// N > 1 uses a dedicated pool of N threads.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_fingerprinter<F: Fingerprinter + 'static>(mut self, fingerprinter: F) -> Self {
        self.fingerprinter = Arc::new(fingerprinter);
        self
    }

    /// Leave `file` out of the scan if it lives under the root.
    ///
    /// The file does not need to exist yet; only its parent directory is
    /// resolved.
    pub fn exclude_file(mut self, file: &Path) -> Self {
        let resolved = match (file.parent(), file.file_name()) {
            (Some(parent), Some(name)) => {
                let parent = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                dunce::canonicalize(parent).ok().map(|p| p.join(name))
            }
            _ => None,
        };
        match resolved {
            Some(path) => self.walker_config.exclude.push(path),
            None => debug!(path = %file.display(), "Exclusion target cannot be resolved"),
        }
        self
    }

    /// Scan the tree and return only the mapping
    pub fn scan(&self) -> Result<FingerprintMapping, ScanError> {
        self.scan_report().map(|report| report.fingerprints)
    }

    /// Scan the tree, returning the mapping and the files that were skipped
    ///
    /// Unreadable files are left out and logged; only root-level and
    /// traversal failures abort the scan.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn scan_report(&self) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let root = path::resolve_root(&self.root)?;
        info!(resolved = %root.display(), "Starting scan");

        let walker = Walker::with_config(root.clone(), self.walker_config.clone());
        let entries = walker.walk()?;
        debug!(file_count = entries.len(), "Walked filesystem");

        let (fingerprints, skipped) = assemble(self.fingerprint_all(entries));

        info!(
            file_count = fingerprints.len(),
            skipped_count = skipped.len(),
            duration_ms = start.elapsed().as_millis(),
            "Scan completed"
        );

        Ok(ScanReport {
            root,
            fingerprints,
            skipped,
        })
    }

    fn fingerprint_all(&self, entries: Vec<Entry>) -> Vec<Fingerprinted> {
        match self.jobs {
            1 => entries.into_iter().map(|e| self.fingerprint(e)).collect(),
            0 => entries.into_par_iter().map(|e| self.fingerprint(e)).collect(),
            jobs => match rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .thread_name(|i| format!("fim-hash-{i}"))
                .build()
            {
                Ok(pool) => {
                    pool.install(|| entries.into_par_iter().map(|e| self.fingerprint(e)).collect())
                }
                Err(e) => {
                    warn!(jobs, "Failed to start worker pool, hashing sequentially: {}", e);
                    entries.into_iter().map(|e| self.fingerprint(e)).collect()
                }
            },
        }
    }

    fn fingerprint(&self, entry: Entry) -> Fingerprinted {
        match entry {
            Entry::File {
                path,
                key,
                modified_at,
            } => {
                // Size comes from the bytes actually hashed, not the earlier stat
                let outcome = match self.fingerprinter.fingerprint(&path) {
                    Ok(content) => Ok(FingerprintRecord::new(
                        content.digest,
                        content.size,
                        modified_at,
                    )),
                    Err(err) => Err(skip(&key, err)),
                };
                Fingerprinted { key, path, outcome }
            }
            Entry::Unreadable { path, key, source } => {
                let outcome = Err(skip(&key, ReadError::new(path.clone(), source)));
                Fingerprinted { key, path, outcome }
            }
        }
    }
}

/// Outcome of fingerprinting one walked entry
struct Fingerprinted {
    key: String,
    path: PathBuf,
    outcome: Result<FingerprintRecord, SkippedFile>,
}

/// Build the mapping from per-file outcomes
///
/// Keys must identify exactly one file. If several files produce the same
/// key, none of them is recorded and each is reported as skipped.
fn assemble(results: Vec<Fingerprinted>) -> (FingerprintMapping, Vec<SkippedFile>) {
    let mut fingerprints = FingerprintMapping::new();
    let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut collided: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for Fingerprinted { key, path, outcome } in results {
        let record = match outcome {
            Ok(record) => record,
            Err(file) => {
                skipped.push(file);
                continue;
            }
        };
        if let Some(paths) = collided.get_mut(&key) {
            paths.push(path);
        } else if let Some(first) = sources.remove(&key) {
            fingerprints.remove(&key);
            collided.insert(key, vec![first, path]);
        } else {
            sources.insert(key.clone(), path);
            fingerprints.insert(key, record);
        }
    }

    for (key, paths) in collided {
        warn!(key = %key, file_count = paths.len(), "Distinct files share one key, leaving them out");
        let reason = format!("{} files map to the key {:?}", paths.len(), key);
        skipped.extend(paths.into_iter().map(|path| SkippedFile {
            key: key.clone(),
            path,
            reason: reason.clone(),
        }));
    }

    warn_equivalent_names(&fingerprints);
    skipped.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.path.cmp(&b.path)));
    (fingerprints, skipped)
}

/// Log keys that differ only in Unicode normalization and so look identical
fn warn_equivalent_names(fingerprints: &FingerprintMapping) {
    let mut by_form: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for key in fingerprints.keys() {
        by_form
            .entry(path::canonical_form(key))
            .or_default()
            .push(key.as_str());
    }
    for keys in by_form.values().filter(|keys| keys.len() > 1) {
        warn!(keys = ?keys, "Files with canonically equivalent names");
    }
}

fn skip(key: &str, err: ReadError) -> SkippedFile {
    warn!(path = %err.path.display(), "Skipping unreadable file: {}", err.source);
    SkippedFile {
        key: key.to_string(),
        path: err.path,
        reason: err.source.to_string(),
    }
}
