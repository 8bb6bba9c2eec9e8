//! Filesystem scanning
//!
//! Walks a directory tree and fingerprints each regular file by content.

pub mod hasher;
pub mod path;
pub mod scanner;
pub mod walker;
