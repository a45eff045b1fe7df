//! Duplicate group resolution.
//!
//! # Overview
//!
//! For each actionable group the resolver picks the first-discovered member
//! as the rename source, synthesizes the canonical name, folds in the mark
//! encoding, then renames the source and removes the rest - transactionally
//! per group in the sense that the whole run aborts on the first failure,
//! with no rollback and no retry.
//!
//! Simulate mode runs the identical detection and naming logic and logs the
//! same actions, but skips the filesystem mutations. Dry-run parity is a
//! hard requirement: both modes choose the same canonical names and the
//! same deletion sets.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::audit::{ActionKind, AuditError, AuditWriter};
use crate::cli::FileClass;
use crate::duplicates::DuplicateGroup;
use crate::naming::{apply_marks, synthesize};

/// Errors during group resolution. All fatal.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Moving the survivor to its canonical path failed.
    #[error("rename failed for {path}: {source}")]
    Rename {
        /// The rename source path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Removing a losing duplicate failed.
    #[error("delete failed for {path}: {source}")]
    Delete {
        /// The path being removed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The audit sink failed.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Per-group resolution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    /// Group accepted, survivor not yet chosen.
    Pending,
    /// Canonical name synthesized, survivor being moved.
    Renaming,
    /// Losing members being removed.
    Deleting,
    /// Group fully processed and dropped from the in-flight mapping.
    Resolved,
    /// Terminal: a filesystem or audit action failed; the run aborts.
    Failed,
}

/// Configuration for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// File class, supplying the indicator glyph and mark policy.
    pub class: FileClass,
    /// The action gate: when false, groups are reported but untouched.
    pub rename_delete: bool,
    /// Dry run: log actions without mutating the filesystem.
    pub simulate: bool,
    /// Accumulate reclaimed bytes for the final report.
    pub track_size: bool,
}

impl ResolverConfig {
    /// Detection-only configuration: report groups, touch nothing.
    #[must_use]
    pub fn report_only(class: FileClass) -> Self {
        Self {
            class,
            rename_delete: false,
            simulate: false,
            track_size: false,
        }
    }

    /// Rename-and-delete configuration.
    #[must_use]
    pub fn apply(class: FileClass, simulate: bool, track_size: bool) -> Self {
        Self {
            class,
            rename_delete: true,
            simulate,
            track_size,
        }
    }
}

/// Executor that resolves duplicate groups one at a time.
#[derive(Debug)]
pub struct GroupResolver {
    config: ResolverConfig,
    audit: Option<AuditWriter>,
    groups_resolved: usize,
    files_removed: usize,
    bytes_reclaimed: u64,
}

impl GroupResolver {
    /// Create a resolver; pass an [`AuditWriter`] to enable the audit trail.
    #[must_use]
    pub fn new(config: ResolverConfig, audit: Option<AuditWriter>) -> Self {
        Self {
            config,
            audit,
            groups_resolved: 0,
            files_removed: 0,
            bytes_reclaimed: 0,
        }
    }

    /// Resolve one duplicate group.
    ///
    /// With the gate closed this only reports the group. Otherwise the
    /// survivor (`paths[0]`, first discovered) is renamed to the canonical
    /// name and every other member is deleted. Audit records are appended
    /// before the corresponding filesystem action is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] on the first rename, delete or audit
    /// failure. The group may be left partially applied; the run aborts.
    pub fn resolve(&mut self, group: &DuplicateGroup) -> Result<(), ResolveError> {
        if !self.config.rename_delete {
            for path in &group.paths {
                log::info!("  dupe: {}", path.display());
            }
            return Ok(());
        }

        let mut state = GroupState::Pending;
        log::debug!("group {}: {state:?}", &group.digest_hex()[..12]);

        // RENAMING: synthesize the canonical name and move the survivor.
        let indicator = self.config.class.indicator();
        let name = synthesize(&group.paths, indicator);
        let file_name = apply_marks(
            &name.base,
            &name.extension,
            group.len(),
            name.marks,
            self.config.class.mark_policy(),
            indicator,
        );
        let final_path = name.path_for(&file_name);
        let source = &group.paths[0];

        state = GroupState::Renaming;
        log::debug!("group {}: {state:?}", &group.digest_hex()[..12]);

        if let Some(audit) = self.audit.as_mut() {
            audit.append(ActionKind::Renamed, source, &final_path, &group.digest_hex())?;
        }
        log::info!("move: {} -> {}", source.display(), final_path.display());
        if !self.config.simulate {
            fs::rename(source, &final_path).map_err(|e| {
                log::error!("group {}: {:?}", &group.digest_hex()[..12], GroupState::Failed);
                ResolveError::Rename {
                    path: source.clone(),
                    source: e,
                }
            })?;
        }

        // DELETING: remove every other member.
        state = GroupState::Deleting;
        log::debug!("group {}: {state:?}", &group.digest_hex()[..12]);

        for loser in &group.paths[1..] {
            if self.config.track_size {
                self.bytes_reclaimed += group.size;
            }
            if let Some(audit) = self.audit.as_mut() {
                audit.append(ActionKind::Deleted, loser, &final_path, &group.digest_hex())?;
            }
            log::info!("rm:   {}", loser.display());
            // The survivor may have landed on a loser's old path; that
            // path now holds the survivor and must not be removed.
            if !self.config.simulate && *loser != final_path {
                fs::remove_file(loser).map_err(|e| {
                    log::error!("group {}: {:?}", &group.digest_hex()[..12], GroupState::Failed);
                    ResolveError::Delete {
                        path: loser.clone(),
                        source: e,
                    }
                })?;
            }
            self.files_removed += 1;
        }

        state = GroupState::Resolved;
        log::debug!("group {}: {state:?}", &group.digest_hex()[..12]);
        self.groups_resolved += 1;

        Ok(())
    }

    /// Groups fully resolved so far.
    #[must_use]
    pub fn groups_resolved(&self) -> usize {
        self.groups_resolved
    }

    /// Files removed (or slated for removal in simulate mode).
    #[must_use]
    pub fn files_removed(&self) -> usize {
        self.files_removed
    }

    /// Bytes reclaimed so far; 0 unless byte-accounting is enabled.
    #[must_use]
    pub fn bytes_reclaimed(&self) -> u64 {
        self.bytes_reclaimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn group_of(paths: &[&Path], size: u64) -> DuplicateGroup {
        DuplicateGroup {
            digest: [7u8; 32],
            size,
            paths: paths.iter().map(|p| p.to_path_buf()).collect(),
        }
    }

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_report_only_touches_nothing() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "a.jpg", b"x");
        let b = write(dir.path(), "b.jpg", b"x");
        let group = group_of(&[&a, &b], 1);

        let mut resolver = GroupResolver::new(ResolverConfig::report_only(FileClass::Img), None);
        resolver.resolve(&group).unwrap();

        assert!(a.exists());
        assert!(b.exists());
        assert_eq!(resolver.files_removed(), 0);
        assert_eq!(resolver.bytes_reclaimed(), 0);
    }

    #[test]
    fn test_apply_renames_survivor_and_deletes_losers() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "party.jpg", b"same");
        let b = write(dir.path(), "party copy.jpg", b"same");
        let group = group_of(&[&a, &b], 4);

        let mut resolver =
            GroupResolver::new(ResolverConfig::apply(FileClass::Img, false, true), None);
        resolver.resolve(&group).unwrap();

        // Canonical: base "party", 1 mark from collapsing 2 files.
        let survivor = dir.path().join("party !.jpg");
        assert!(survivor.exists());
        assert!(!a.exists());
        assert!(!b.exists());
        assert_eq!(resolver.files_removed(), 1);
        assert_eq!(resolver.bytes_reclaimed(), 4);
    }

    #[test]
    fn test_simulate_logs_but_mutates_nothing() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "party.jpg", b"same");
        let b = write(dir.path(), "party copy.jpg", b"same");
        let group = group_of(&[&a, &b], 4);

        let mut resolver =
            GroupResolver::new(ResolverConfig::apply(FileClass::Img, true, true), None);
        resolver.resolve(&group).unwrap();

        assert!(a.exists());
        assert!(b.exists());
        assert!(!dir.path().join("party !.jpg").exists());
        // Accounting still runs so the dry run reports the same totals.
        assert_eq!(resolver.files_removed(), 1);
        assert_eq!(resolver.bytes_reclaimed(), 4);
    }

    #[test]
    fn test_missing_loser_is_fatal() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "party.jpg", b"same");
        let ghost = dir.path().join("party copy.jpg");
        let group = group_of(&[&a, &ghost], 4);

        let mut resolver =
            GroupResolver::new(ResolverConfig::apply(FileClass::Img, false, false), None);
        let err = resolver.resolve(&group).unwrap_err();

        assert!(matches!(err, ResolveError::Delete { .. }));
    }

    #[test]
    fn test_survivor_on_loser_path_is_preserved() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "a.mp4", b"same");
        let b = write(dir.path(), "a b +.mp4", b"same");
        let group = group_of(&[&a, &b], 4);

        // High-water policy: carryover 1, current 1 -> total 1, so the
        // canonical name collides with the loser's existing name.
        let mut resolver =
            GroupResolver::new(ResolverConfig::apply(FileClass::Vid, false, false), None);
        resolver.resolve(&group).unwrap();

        assert!(dir.path().join("a b +.mp4").exists());
        assert!(!a.exists());
    }

    #[test]
    fn test_audit_records_written_before_actions() {
        let dir = tempdir().unwrap();
        let corpus = dir.path().join("corpus");
        fs::create_dir(&corpus).unwrap();
        let a = write(&corpus, "x.jpg", b"same");
        let b = write(&corpus, "x copy.jpg", b"same");
        let group = group_of(&[&a, &b], 4);

        let sink = dir.path().join("audit.tsv");
        let audit = AuditWriter::open(&sink).unwrap();
        let mut resolver = GroupResolver::new(
            ResolverConfig::apply(FileClass::Img, false, false),
            Some(audit),
        );
        resolver.resolve(&group).unwrap();

        let content = fs::read_to_string(&sink).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("RENAMED\t"));
        assert!(lines[1].starts_with("DELETED\t"));
        // DELETED records reference the final canonical name.
        assert!(lines[1].contains("x !.jpg"));
    }
}
