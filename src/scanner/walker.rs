//! Directory walker for candidate discovery.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! and yielding [`Candidate`] values for every regular file whose name
//! matches the configured extension allow-list by case-insensitive suffix.
//! Traversal is single-threaded via [`walkdir`].
//!
//! # Example
//!
//! ```no_run
//! use dupefold::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::new(true, &[".jpg", ".png"]);
//! let walker = Walker::new(Path::new("/home/user/Pictures"), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(c) => println!("{}: {} bytes", c.path.display(), c.size),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{Candidate, ScanError};

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Recurse into subdirectories. When false, only the root's
    /// immediate entries are visited.
    pub recursive: bool,
    /// Allowed filename suffixes, lowercase with leading dot.
    pub suffixes: &'static [&'static str],
}

impl WalkerConfig {
    /// Create a new walker configuration.
    #[must_use]
    pub fn new(recursive: bool, suffixes: &'static [&'static str]) -> Self {
        Self {
            recursive,
            suffixes,
        }
    }
}

/// Directory walker yielding size-annotated candidates.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root directory.
    #[must_use]
    pub fn new(root: &Path, config: WalkerConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    /// Walk the root and yield a [`Candidate`] per matching file.
    ///
    /// Directories and non-matching files are skipped silently; traversal
    /// and metadata errors surface as [`ScanError`].
    pub fn walk(&self) -> impl Iterator<Item = Result<Candidate, ScanError>> + '_ {
        let mut walk = WalkDir::new(&self.root).follow_links(false);
        if !self.config.recursive {
            walk = walk.max_depth(1);
        }

        walk.into_iter().filter_map(move |entry| {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    return Some(Err(ScanError::Io {
                        path,
                        source: e.into(),
                    }));
                }
            };

            if !entry.file_type().is_file() {
                return None;
            }
            if !matches_suffix(entry.file_name().to_string_lossy().as_ref(), self.config.suffixes) {
                return None;
            }

            match entry.metadata() {
                Ok(meta) => {
                    log::trace!("candidate {} ({} bytes)", entry.path().display(), meta.len());
                    Some(Ok(Candidate::new(entry.path().to_path_buf(), meta.len())))
                }
                Err(e) => Some(Err(ScanError::Io {
                    path: entry.path().to_path_buf(),
                    source: e.into(),
                })),
            }
        })
    }
}

/// Check a filename against an allow-list by case-insensitive suffix.
fn matches_suffix(name: &str, suffixes: &[&str]) -> bool {
    let lower = name.to_lowercase();
    suffixes.iter().any(|s| lower.ends_with(s))
}
