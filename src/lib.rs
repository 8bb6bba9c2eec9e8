//! fim: File Integrity Monitoring
//!
//! Records a cryptographic snapshot (baseline) of a directory tree and later
//! detects added, deleted, and modified files by rescanning and diffing
//! against it.
//!
//! The engine is scan -> fingerprint -> diff:
//! - [`tree::scanner::Scanner`] walks a root and builds a [`types::FingerprintMapping`]
//! - [`baseline::save`] / [`baseline::load`] persist mappings as JSON
//! - [`diff::diff`] classifies every path as new, deleted, modified, or unchanged

pub mod baseline;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod tree;
pub mod types;
