//! Path resolution and mapping keys

use crate::error::ScanError;
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Resolve a scan root to its canonical absolute form
///
/// Different spellings of the same directory (relative, absolute, trailing
/// slash, `..` segments) resolve to the same path, which keeps the keys
/// produced under it stable.
pub fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let canonical = dunce::canonicalize(root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScanError::RootNotFound(root.to_path_buf()),
        _ => ScanError::Walk {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    if !canonical.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    Ok(canonical)
}

/// Why a path has no mapping key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The path is the root itself or lies outside it
    OutsideRoot,
    /// A component is not valid UTF-8; carries a lossy rendering for diagnostics
    NotUnicode(String),
}

/// Build the mapping key for `path` relative to `root`
///
/// Components are joined with `/` exactly as they appear on disk. Names are
/// not Unicode-normalized, so canonically equivalent spellings stay distinct
/// keys. Names that are not valid UTF-8 have no lossless key and are rejected.
pub fn relative_key(root: &Path, path: &Path) -> Result<String, KeyError> {
    let relative = path.strip_prefix(root).map_err(|_| KeyError::OutsideRoot)?;

    let mut parts = Vec::new();
    let mut lossless = true;
    for component in relative.components() {
        match component {
            Component::Normal(name) => match name.to_str() {
                Some(name) => parts.push(Cow::Borrowed(name)),
                None => {
                    lossless = false;
                    parts.push(name.to_string_lossy());
                }
            },
            Component::CurDir => continue,
            _ => return Err(KeyError::OutsideRoot),
        }
    }

    if parts.is_empty() {
        return Err(KeyError::OutsideRoot);
    }

    let key = parts.join("/");
    if lossless {
        Ok(key)
    } else {
        Err(KeyError::NotUnicode(key))
    }
}

/// NFC form of a key, used to spot names that render identically
pub fn canonical_form(key: &str) -> String {
    key.nfc().collect()
}
