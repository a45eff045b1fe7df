//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Single-threaded directory walking via walkdir
//! - Extension-class candidate filtering
//! - Streaming BLAKE3 content digests
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`hasher`]: BLAKE3 file digesting (streaming, chunked)

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{digest_to_hex, Digest, Hasher, CHUNK_SIZE};
pub use walker::{Walker, WalkerConfig};

/// A candidate file discovered by the walker.
///
/// Immutable once produced; consumed exactly once by the grouping pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl Candidate {
    /// Create a new candidate.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while traversing.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file digesting.
///
/// Any of these aborts the run: an unreadable candidate is fatal,
/// never retried.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found (e.g. deleted mid-run).
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_new() {
        let c = Candidate::new(PathBuf::from("/test/file.jpg"), 1024);
        assert_eq!(c.path, PathBuf::from("/test/file.jpg"));
        assert_eq!(c.size, 1024);
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::NotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Path not found: /missing");

        let err = ScanError::NotADirectory(PathBuf::from("/file.txt"));
        assert_eq!(err.to_string(), "Not a directory: /file.txt");
    }

    #[test]
    fn test_hash_error_display() {
        let err = HashError::NotFound(PathBuf::from("/test"));
        assert_eq!(err.to_string(), "File not found: /test");

        let err = HashError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "Permission denied: /secret");
    }
}
