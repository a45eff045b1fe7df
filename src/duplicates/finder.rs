//! Duplicate finder: the pipeline orchestrator.
//!
//! # Overview
//!
//! This module drives the single-threaded detection pipeline:
//! 1. **Sort** candidates by size descending (path ascending on ties)
//! 2. **Bucket** contiguous equal-size runs; singletons are never hashed
//! 3. **Classify** each 2+ bucket by streaming BLAKE3 digest into the
//!    in-flight [`MatchSet`]
//! 4. **Resolve** each actionable group through the
//!    [`GroupResolver`](crate::actions::GroupResolver), clearing the
//!    match set before the next bucket
//!
//! Any digest or resolve error is fatal: it propagates out and the run
//! terminates, leaving nothing retried.

use std::time::Duration;

use crate::actions::{GroupResolver, ResolveError};
use crate::scanner::{Candidate, HashError, Hasher};

use super::groups::{sort_candidates, Buckets, MatchSet};

/// Errors that abort a detection run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// A candidate could not be digested (unreadable, race-deleted).
    #[error(transparent)]
    Hash(#[from] HashError),

    /// A group failed to resolve (rename/delete/audit error).
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Summary statistics for one detection run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Candidate files considered
    pub candidates: usize,
    /// Buckets with 2+ same-size members (the only ones hashed)
    pub buckets_hashed: usize,
    /// Files digested
    pub hashed_files: usize,
    /// Actionable duplicate groups found
    pub duplicate_groups: usize,
    /// Files deleted (or slated for deletion in simulate mode)
    pub files_deleted: usize,
    /// Bytes reclaimed, when byte-accounting is enabled
    pub bytes_reclaimed: u64,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// Orchestrator for the duplicate detection pipeline.
///
/// # Example
///
/// ```no_run
/// use dupefold::actions::{GroupResolver, ResolverConfig};
/// use dupefold::cli::FileClass;
/// use dupefold::duplicates::DuplicateFinder;
/// use dupefold::scanner::Candidate;
///
/// let candidates: Vec<Candidate> = vec![];
/// let mut resolver = GroupResolver::new(
///     ResolverConfig::report_only(FileClass::Img),
///     None,
/// );
/// let summary = DuplicateFinder::new()
///     .run(candidates, &mut resolver)
///     .unwrap();
/// println!("{} duplicate groups", summary.duplicate_groups);
/// ```
#[derive(Debug, Default)]
pub struct DuplicateFinder {
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new finder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hasher: Hasher::new(),
        }
    }

    /// Run the full pipeline over a candidate list.
    ///
    /// Consumes the candidates, resolves every actionable group through
    /// `resolver`, and returns summary statistics.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] on the first digest or resolve failure;
    /// the run stops there with no rollback of already-resolved groups.
    pub fn run(
        &self,
        mut candidates: Vec<Candidate>,
        resolver: &mut GroupResolver,
    ) -> Result<RunSummary, FinderError> {
        let start = std::time::Instant::now();
        let mut summary = RunSummary {
            candidates: candidates.len(),
            ..RunSummary::default()
        };

        sort_candidates(&mut candidates);

        let mut matches = MatchSet::new();
        for bucket in Buckets::new(&candidates) {
            // A singleton bucket has a unique size: no duplicate possible,
            // and it is never hashed.
            if bucket.len() < 2 {
                log::trace!(
                    "unique size {}: {}",
                    bucket[0].size,
                    bucket[0].path.display()
                );
                continue;
            }

            summary.buckets_hashed += 1;
            log::debug!(
                "bucket of {} files at {} bytes",
                bucket.len(),
                bucket[0].size
            );

            for candidate in bucket {
                let digest = self.hasher.digest_file(&candidate.path)?;
                summary.hashed_files += 1;
                matches.insert(digest, candidate.path.clone());
            }

            for digest in matches.digests() {
                if let Some(group) = matches.take_actionable(digest, bucket[0].size) {
                    log::info!(
                        "duplicate group {} ({} files, {} bytes each)",
                        &group.digest_hex()[..12],
                        group.len(),
                        group.size
                    );
                    summary.duplicate_groups += 1;
                    resolver.resolve(&group)?;
                }
            }

            // Singleton digests carry no information past their bucket.
            matches.clear();
        }

        summary.files_deleted = resolver.files_removed();
        summary.bytes_reclaimed = resolver.bytes_reclaimed();
        summary.duration = start.elapsed();

        log::info!(
            "run complete: {} candidates, {} buckets hashed, {} duplicate groups",
            summary.candidates,
            summary.buckets_hashed,
            summary.duplicate_groups
        );

        Ok(summary)
    }
}
