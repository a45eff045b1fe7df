//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing BLAKE3 digests
//! of file contents. Files are read in fixed-size chunks so peak memory
//! stays bounded regardless of file size.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::HashError;

/// Size of the read buffer used while digesting.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A BLAKE3 content digest (32 bytes).
pub type Digest = [u8; 32];

/// Render a digest as a lowercase hex string.
#[must_use]
pub fn digest_to_hex(digest: &Digest) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Streaming BLAKE3 file hasher.
#[derive(Debug, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the digest over a file's full byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read. This is
    /// fatal for the run: the caller propagates it, nothing is retried.
    pub fn digest_file(&self, path: &Path) -> Result<Digest, HashError> {
        let mut file = File::open(path).map_err(|e| map_io_error(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; CHUNK_SIZE];

        loop {
            let n = file.read(&mut buf).map_err(|e| map_io_error(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Map a std I/O error to the matching [`HashError`] variant.
fn map_io_error(path: &Path, e: io::Error) -> HashError {
    match e.kind() {
        io::ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: PathBuf::from(path),
            source: e,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_digest_deterministic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.bin");
        fs::write(&path, b"hello world").unwrap();

        let hasher = Hasher::new();
        let d1 = hasher.digest_file(&path).unwrap();
        let d2 = hasher.digest_file(&path).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_digest_differs_for_different_content() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        fs::write(&a, b"content a").unwrap();
        fs::write(&b, b"content b").unwrap();

        let hasher = Hasher::new();
        assert_ne!(
            hasher.digest_file(&a).unwrap(),
            hasher.digest_file(&b).unwrap()
        );
    }

    #[test]
    fn test_digest_matches_one_shot_blake3() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.bin");
        // Larger than one chunk to exercise the streaming loop.
        let content = vec![0xabu8; CHUNK_SIZE * 2 + 17];
        fs::write(&path, &content).unwrap();

        let streamed = Hasher::new().digest_file(&path).unwrap();
        let one_shot = *blake3::hash(&content).as_bytes();
        assert_eq!(streamed, one_shot);
    }

    #[test]
    fn test_digest_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = Hasher::new()
            .digest_file(&dir.path().join("gone.bin"))
            .unwrap_err();
        assert!(matches!(err, HashError::NotFound(_)));
    }

    #[test]
    fn test_digest_to_hex() {
        let digest = [0u8; 32];
        let hex = digest_to_hex(&digest);
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c == '0'));
    }
}
