//! Size-bucket grouping and digest-keyed duplicate groups.
//!
//! # Overview
//!
//! Size bucketing is the first stage of duplicate detection: an exact-size
//! mismatch is a free, sound disqualifier for duplication, so content
//! hashing is deferred until files are size-confirmed. Candidates are
//! sorted by size descending and contiguous equal-size runs become
//! buckets; only buckets with 2+ members are ever hashed.
//!
//! Within a bucket, the classifier inserts `(digest, path)` pairs into a
//! [`MatchSet`] - the single in-flight digest→paths mapping the run holds.
//! The resolver drains it group by group, so nothing survives a bucket.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{digest_to_hex, Candidate, Digest};

/// Sort candidates for bucketing: size descending, path ascending.
///
/// The secondary path order makes bucket membership order - and therefore
/// survivor choice and canonical naming - independent of traversal order.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
}

/// Iterator over contiguous equal-size runs of a sorted candidate slice.
///
/// Two candidates share a bucket iff their sizes are exactly equal and no
/// differently-sized candidate occurs between them in sort order. The
/// final run is yielded like any other.
#[derive(Debug)]
pub struct Buckets<'a> {
    rest: &'a [Candidate],
}

impl<'a> Buckets<'a> {
    /// Create a bucket iterator over candidates sorted by
    /// [`sort_candidates`].
    #[must_use]
    pub fn new(sorted: &'a [Candidate]) -> Self {
        Self { rest: sorted }
    }
}

impl<'a> Iterator for Buckets<'a> {
    type Item = &'a [Candidate];

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.first()?;
        let run_len = self
            .rest
            .iter()
            .take_while(|c| c.size == first.size)
            .count();
        let (bucket, rest) = self.rest.split_at(run_len);
        self.rest = rest;
        Some(bucket)
    }
}

/// A confirmed duplicate group: 2+ paths sharing size and content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// BLAKE3 digest shared by every member
    pub digest: Digest,
    /// Byte size shared by every member
    pub size: u64,
    /// Member paths in discovery order; `paths[0]` is the rename source
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the group is empty (never true for a constructed group).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Bytes freed by deleting every member but the survivor.
    #[must_use]
    pub fn reclaimable(&self) -> u64 {
        self.size * (self.paths.len().saturating_sub(1) as u64)
    }

    /// Digest as a lowercase hex string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }
}

/// The in-flight digest→paths mapping for the bucket being classified.
///
/// Owned by the pipeline and scoped to one bucket: the classifier inserts,
/// the resolver takes actionable groups out, and [`MatchSet::clear`]
/// drops whatever is left (singleton digests) when the bucket ends.
#[derive(Debug, Default)]
pub struct MatchSet {
    /// Digests in first-discovery order, for deterministic group iteration.
    order: Vec<Digest>,
    members: HashMap<Digest, Vec<PathBuf>>,
}

impl MatchSet {
    /// Create an empty match set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified file. Duplicate paths for the same digest are
    /// ignored; insertion order per digest is preserved.
    pub fn insert(&mut self, digest: Digest, path: PathBuf) {
        let entry = self.members.entry(digest).or_insert_with(|| {
            self.order.push(digest);
            Vec::new()
        });
        if !entry.contains(&path) {
            entry.push(path);
        }
    }

    /// Digests in first-discovery order.
    #[must_use]
    pub fn digests(&self) -> Vec<Digest> {
        self.order.clone()
    }

    /// Remove and return the group for `digest` if it is actionable
    /// (2+ members). Non-actionable digests stay until [`MatchSet::clear`].
    pub fn take_actionable(&mut self, digest: Digest, size: u64) -> Option<DuplicateGroup> {
        let actionable = self.members.get(&digest).is_some_and(|p| p.len() > 1);
        if !actionable {
            return None;
        }
        let paths = self.members.remove(&digest)?;
        self.order.retain(|d| *d != digest);
        Some(DuplicateGroup {
            digest,
            size,
            paths,
        })
    }

    /// Number of distinct digests currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Drop everything (singleton digests at bucket end).
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}
