//! Filesystem walker for enumerating regular files under a root

use crate::error::ScanError;
use crate::tree::path::{self, KeyError};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Entries produced by a walk
#[derive(Debug)]
pub enum Entry {
    /// A regular file with the modification time captured when it was listed
    File {
        path: PathBuf,
        key: String,
        modified_at: f64,
    },
    /// A regular file that cannot be fingerprinted: its metadata could not be
    /// read or its name has no lossless key
    Unreadable {
        path: PathBuf,
        key: String,
        source: io::Error,
    },
}

impl Entry {
    pub fn key(&self) -> &str {
        match self {
            Entry::File { key, .. } | Entry::Unreadable { key, .. } => key,
        }
    }
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Path component names to skip entirely (e.g. ".git")
    pub ignore_patterns: Vec<String>,
    /// Maximum depth below the root (None = unlimited)
    pub max_depth: Option<usize>,
    /// Absolute paths of files to leave out (e.g. the baseline file itself)
    pub exclude: Vec<PathBuf>,
}

/// Walks a resolved root and lists its regular files.
///
/// Symlinks are never followed. Directories, symlinks and special files are
/// skipped without producing entries.
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a walker for an already resolved root (see [`path::resolve_root`])
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and collect file entries, sorted by path
    pub fn walk(&self) -> Result<Vec<Entry>, ScanError> {
        let mut entries = Vec::new();
        let mut special_count = 0usize;

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    let vanished = err.depth() > 0
                        && err.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound);
                    if vanished {
                        warn!(path = %path.display(), "Entry disappeared during scan, skipping");
                        continue;
                    }
                    return Err(ScanError::Walk {
                        path,
                        source: io::Error::from(err),
                    });
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                trace!(path = %entry.path().display(), "Skipping non-regular file");
                special_count += 1;
                continue;
            }
            if self.is_excluded(entry.path()) {
                debug!(path = %entry.path().display(), "Skipping excluded file");
                continue;
            }

            let key = match path::relative_key(&self.root, entry.path()) {
                Ok(key) => key,
                Err(KeyError::OutsideRoot) => continue,
                Err(KeyError::NotUnicode(lossy)) => {
                    entries.push(Entry::Unreadable {
                        path: entry.path().to_path_buf(),
                        key: lossy,
                        source: io::Error::new(
                            io::ErrorKind::InvalidData,
                            "file name is not valid UTF-8",
                        ),
                    });
                    continue;
                }
            };

            match entry.metadata() {
                Ok(metadata) => entries.push(Entry::File {
                    path: entry.path().to_path_buf(),
                    key,
                    modified_at: metadata.modified().map(epoch_seconds).unwrap_or(0.0),
                }),
                Err(err) => entries.push(Entry::Unreadable {
                    path: entry.path().to_path_buf(),
                    key,
                    source: io::Error::from(err),
                }),
            }
        }

        if special_count > 0 {
            debug!(special_count, "Skipped non-regular entries");
        }

        Ok(entries)
    }

    /// Ignore patterns match whole path component names below the root
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.as_str() == name)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.config.exclude.iter().any(|excluded| excluded == path)
    }
}

/// Seconds since the Unix epoch, negative for earlier times
pub fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}
