//! Append-only audit trail for renames and deletions.
//!
//! Each record is one tab-separated line:
//! `action_kind \t old_path \t new_path \t digest \t YYYY-MM-DD`.
//! Records are flushed as they are written so the trail survives an
//! aborted run.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use thiserror::Error;

/// What happened to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// The survivor was moved to its canonical name.
    Renamed,
    /// A losing duplicate was removed.
    Deleted,
}

impl ActionKind {
    /// Wire representation used in audit records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Renamed => "RENAMED",
            ActionKind::Deleted => "DELETED",
        }
    }
}

/// Errors from the audit sink. Fatal for the run like any other I/O error.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The sink file could not be opened.
    #[error("cannot open audit file {path}: {source}")]
    Open {
        /// The sink path
        path: std::path::PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing a record failed.
    #[error("audit record failed: {0}")]
    Write(#[from] csv::Error),

    /// Flushing the sink failed.
    #[error("audit flush failed: {0}")]
    Flush(#[from] io::Error),
}

/// Tab-separated append-only audit writer.
#[derive(Debug)]
pub struct AuditWriter {
    writer: csv::Writer<std::fs::File>,
}

impl AuditWriter {
    /// Open (or create) the sink at `path` in append mode.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Open`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, AuditError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AuditError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;

        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(file);

        Ok(Self { writer })
    }

    /// Append one record and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] if the record cannot be written or flushed.
    pub fn append(
        &mut self,
        kind: ActionKind,
        old_path: &Path,
        new_path: &Path,
        digest_hex: &str,
    ) -> Result<(), AuditError> {
        let old = old_path.to_string_lossy();
        let new = new_path.to_string_lossy();
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();

        self.writer
            .write_record([kind.as_str(), old.as_ref(), new.as_ref(), digest_hex, date.as_str()])?;
        self.writer.flush()?;
        Ok(())
    }
}
