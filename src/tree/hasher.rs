//! Content digests for files using SHA-256
//!
//! Files are streamed through the hash in fixed-size chunks, so memory use
//! does not grow with file size.

use crate::error::ReadError;
use crate::types::Digest;
use sha2::{Digest as _, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Default read chunk size (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Digest of a byte stream together with the number of bytes it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedContent {
    pub digest: Digest,
    pub size: u64,
}

/// Compute the hex digest of everything readable from `reader`
///
/// Reads in chunks of `chunk_size` bytes until end-of-stream.
pub fn hash_reader<R: Read>(reader: R, chunk_size: usize) -> std::io::Result<Digest> {
    hash_reader_counted(reader, chunk_size).map(|content| content.digest)
}

/// Like [`hash_reader`], also counting the bytes that went into the digest
pub fn hash_reader_counted<R: Read>(
    mut reader: R,
    chunk_size: usize,
) -> std::io::Result<HashedContent> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut size = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
        size += read as u64;
    }

    Ok(HashedContent {
        digest: hex::encode(hasher.finalize()),
        size,
    })
}

/// Compute the hex digest of a file's full content
pub fn hash_file(path: &Path, chunk_size: usize) -> Result<Digest, ReadError> {
    fingerprint_file(path, chunk_size).map(|content| content.digest)
}

/// Digest and byte length of a file, both taken from the same read
pub fn fingerprint_file(path: &Path, chunk_size: usize) -> Result<HashedContent, ReadError> {
    let file = File::open(path).map_err(|e| ReadError::new(path, e))?;
    hash_reader_counted(file, chunk_size).map_err(|e| ReadError::new(path, e))
}

/// Compute the hex digest of an in-memory buffer
pub fn hash_bytes(content: &[u8]) -> Digest {
    hex::encode(Sha256::digest(content))
}

/// Produces the content digest and size for one file.
///
/// The scanner fingerprints files through this trait so the read strategy
/// can be swapped out. The returned size must be the number of bytes that
/// went into the digest.
pub trait Fingerprinter: Send + Sync {
    fn fingerprint(&self, path: &Path) -> Result<HashedContent, ReadError>;
}

/// Streaming SHA-256 fingerprinter
#[derive(Debug, Clone)]
pub struct Sha256Fingerprinter {
    chunk_size: usize,
}

impl Sha256Fingerprinter {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for Sha256Fingerprinter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Fingerprinter for Sha256Fingerprinter {
    fn fingerprint(&self, path: &Path) -> Result<HashedContent, ReadError> {
        fingerprint_file(path, self.chunk_size)
    }
}
