//! Command-line interface definitions for dupefold.
//!
//! This module defines all CLI arguments using the clap derive API. The tool
//! is single-purpose, so the surface is flat: a target directory plus flags
//! controlling traversal, the action gate, dry-run mode, the audit sink and
//! byte accounting.
//!
//! # Example
//!
//! ```bash
//! # Report duplicate images under ~/Pictures without touching anything
//! dupefold --type img ~/Pictures
//!
//! # Collapse duplicate videos recursively, dry run first
//! dupefold --type vid --recursive --rename-delete --simulate ~/Videos
//!
//! # The real thing, with an audit trail and byte accounting
//! dupefold --type vid -r --rename-delete --record-deleted -z ~/Videos
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::naming::MarkPolicy;

/// Duplicate file collapser.
///
/// dupefold finds duplicate files by size and BLAKE3 content digest, merges
/// each duplicate group's filenames into one canonical name, renames the
/// first-discovered member to it and deletes the rest.
#[derive(Debug, Parser)]
#[command(name = "dupefold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to search for duplicates
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// File class to consider: img or vid
    ///
    /// Selects the extension allow-list, the duplicate-indicator glyph
    /// ('!' for img, '+' for vid) and how marks combine (img adds,
    /// vid keeps the high-water mark).
    #[arg(short = 't', long = "type", value_enum, value_name = "CLASS")]
    pub class: FileClass,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Rename the survivor and delete the rest of each duplicate group
    ///
    /// Without this gate, detection runs and groups are reported, but
    /// nothing on disk is touched.
    #[arg(long)]
    pub rename_delete: bool,

    /// Dry run: run full detection and naming, but mutate nothing
    #[arg(short, long)]
    pub simulate: bool,

    /// Append an audit record for every rename and delete
    #[arg(long)]
    pub record_deleted: bool,

    /// Audit sink path (default: <TARGET>/.dupefold-audit.tsv)
    #[arg(long, value_name = "PATH", requires = "record_deleted")]
    pub audit_file: Option<PathBuf>,

    /// Track bytes reclaimed by deletions and print a final total
    #[arg(short = 'z', long)]
    pub track_size: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Extension class selecting which files are candidates.
///
/// Matching is by case-insensitive filename suffix, so `PHOTO.JPG` is an
/// image candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileClass {
    /// Image-like files: .jpg .png .jpeg .gif .zip .pdf
    Img,
    /// Video-like files: .avi .mp4 .mpeg .mpg .flv .mov
    Vid,
}

impl FileClass {
    /// Allowed filename suffixes for this class, lowercase with leading dot.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileClass::Img => &[".jpg", ".png", ".jpeg", ".gif", ".zip", ".pdf"],
            FileClass::Vid => &[".avi", ".mp4", ".mpeg", ".mpg", ".flv", ".mov"],
        }
    }

    /// Duplicate-indicator glyph embedded in canonical names for this class.
    #[must_use]
    pub fn indicator(self) -> char {
        match self {
            FileClass::Img => '!',
            FileClass::Vid => '+',
        }
    }

    /// How marks from this run combine with marks already present in names.
    #[must_use]
    pub fn mark_policy(self) -> MarkPolicy {
        match self {
            FileClass::Img => MarkPolicy::Additive,
            FileClass::Vid => MarkPolicy::HighWater,
        }
    }
}

impl std::fmt::Display for FileClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileClass::Img => write!(f, "img"),
            FileClass::Vid => write!(f, "vid"),
        }
    }
}
