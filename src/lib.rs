//! dupefold - Duplicate File Collapser
//!
//! A CLI tool that finds duplicate files by size and BLAKE3 content digest,
//! merges each duplicate group's divergent filenames into one canonical
//! name, renames the first-discovered member to it and deletes the rest,
//! with dry-run, audit-trail and byte-accounting support.

pub mod actions;
pub mod audit;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod naming;
pub mod report;
pub mod scanner;

use std::env;
use std::path::PathBuf;

use anyhow::Context;

use crate::actions::{GroupResolver, ResolverConfig};
use crate::audit::AuditWriter;
use crate::cli::Cli;
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;
use crate::report::format_size;
use crate::scanner::{Candidate, ScanError, Walker, WalkerConfig};

/// Default audit sink file name, created inside the target directory.
const DEFAULT_AUDIT_FILE: &str = ".dupefold-audit.tsv";

/// Run the application: walk, detect, resolve, report.
///
/// # Errors
///
/// Returns an error for an unusable target directory, a traversal failure,
/// an unreadable candidate, or a failed rename/delete/audit action. All of
/// these abort the run.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let root = absolute_target(&cli.target)?;
    if !root.exists() {
        return Err(ScanError::NotFound(root).into());
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root).into());
    }

    log::info!(
        "searching {} for dupes of type {}",
        root.display(),
        cli.class.extensions().join(", ")
    );
    if cli.recursive {
        log::info!("recursing into subdirectories");
    }

    let walker = Walker::new(&root, WalkerConfig::new(cli.recursive, cli.class.extensions()));
    let mut candidates: Vec<Candidate> = Vec::new();
    for entry in walker.walk() {
        candidates.push(entry?);
    }
    log::info!("found {} potential files", candidates.len());

    let audit = if cli.record_deleted {
        let sink = cli
            .audit_file
            .clone()
            .unwrap_or_else(|| root.join(DEFAULT_AUDIT_FILE));
        log::debug!("audit sink: {}", sink.display());
        Some(AuditWriter::open(&sink)?)
    } else {
        None
    };

    let config = if cli.rename_delete {
        ResolverConfig::apply(cli.class, cli.simulate, cli.track_size)
    } else {
        ResolverConfig::report_only(cli.class)
    };
    let mut resolver = GroupResolver::new(config, audit);

    let summary = DuplicateFinder::new().run(candidates, &mut resolver)?;

    if cli.track_size {
        println!("total space saved = {}", format_size(summary.bytes_reclaimed));
    }

    if summary.duplicate_groups == 0 {
        Ok(ExitCode::NoDuplicates)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Resolve the target to an absolute path without touching symlinks.
fn absolute_target(target: &std::path::Path) -> anyhow::Result<PathBuf> {
    if target.is_absolute() {
        Ok(target.to_path_buf())
    } else {
        let cwd = env::current_dir().context("cannot determine working directory")?;
        Ok(cwd.join(target))
    }
}
