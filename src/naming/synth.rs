//! Canonical name synthesis for a duplicate group.
//!
//! Given the ordered paths of one duplicate group, derive the single name
//! its survivor will carry: pick the rootiest directory and an extension,
//! extract the most common long prefix of the stems as the base, merge in
//! the informative leftovers of each divergent stem, and cap the length so
//! the final name (marks included) stays under the filesystem limit.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::marks::{count_marks, MAX_MARKS};
use super::prefix::most_common_long_prefix;

/// Trailing version suffix on a delta token, hyphen optional ("shot-3", "shot3").
static DELTA_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d{1,2}$").expect("valid regex"));

/// A whole delta that is just an optionally negated 1-2 digit number.
static SIGNED_SHORT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,2}$").expect("valid regex"));

/// Reserved headroom: base plus extension never exceeds this, leaving room
/// for the largest possible mark suffix under the 255-char filename limit.
const NAME_BUDGET: usize = 253 - MAX_MARKS;

/// The canonical name derived for one duplicate group.
///
/// `marks` is the carryover discovered in the group's own names (the
/// largest indicator run found in the base or any delta), not the marks
/// the current group will add; encoding both is [`apply_marks`]'s job.
///
/// [`apply_marks`]: super::marks::apply_marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalName {
    /// Directory the survivor will live in.
    pub directory: PathBuf,
    /// Synthesized base name, length-guarded.
    pub base: String,
    /// Extension including the leading dot (may be empty).
    pub extension: String,
    /// Carryover marks found in the group's names.
    pub marks: usize,
}

impl CanonicalName {
    /// Assemble the final path from an already mark-encoded file name.
    #[must_use]
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }
}

/// Classification of a single delta token against the base-so-far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClass<'t> {
    /// The token is the word "copy" - a duplication convention, not content.
    SkipCopyWord,
    /// The token is nothing but a version/copy counter.
    SkipNumericSuffix,
    /// The token (raw or suffix-stripped) already occurs in the base.
    SkipDuplicateOfBase,
    /// The suffix-stripped token carries new content and is appended.
    Keep(&'t str),
}

/// Classify one cleaned delta token against the base accumulated so far.
pub fn classify_token<'t>(token: &'t str, base: &str) -> TokenClass<'t> {
    if base.contains(token) {
        return TokenClass::SkipDuplicateOfBase;
    }
    let stripped = strip_delta_suffix(token);
    if stripped.is_empty() {
        return TokenClass::SkipNumericSuffix;
    }
    if base.contains(stripped) {
        return TokenClass::SkipDuplicateOfBase;
    }
    if stripped.eq_ignore_ascii_case("copy") {
        return TokenClass::SkipCopyWord;
    }
    TokenClass::Keep(stripped)
}

/// Synthesize the canonical name for a duplicate group.
///
/// `paths` is the group's member list in discovery order (>= 2 entries).
/// The returned base has every divergent stem's informative tokens merged
/// in encounter order, and the carryover mark count is the maximum found
/// across the base and every delta.
#[must_use]
pub fn synthesize(paths: &[PathBuf], indicator: char) -> CanonicalName {
    let directory = select_directory(paths);
    let extension = paths
        .first()
        .and_then(|p| p.extension())
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let stems: Vec<String> = paths
        .iter()
        .map(|p| {
            p.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect();

    let base = most_common_long_prefix(&stems);
    let mut merged = base.clone();
    let mut marks = count_marks(&base, indicator);

    for stem in &stems {
        // Delta = the stem with every occurrence of the base removed.
        let delta = stem.replace(&base, "");
        let delta = delta.trim();

        // Marks hide in the raw delta; measure before cleaning strips them.
        marks = marks.max(count_marks(delta, indicator));

        let cleaned = clean_delta(delta, indicator);
        if cleaned.is_empty() || SIGNED_SHORT_NUMBER_RE.is_match(&cleaned) {
            continue;
        }

        for token in cleaned.split_whitespace() {
            if let TokenClass::Keep(kept) = classify_token(token, &merged) {
                log::trace!("merging delta token {kept:?} into base");
                merged.push(' ');
                merged.push_str(kept);
            }
        }
    }

    let limit = NAME_BUDGET.saturating_sub(extension.chars().count());
    if merged.chars().count() > limit {
        merged = merged.chars().take(limit).collect();
    }

    CanonicalName {
        directory,
        base: merged,
        extension,
        marks,
    }
}

/// Pick the group's directory: lexicographically smallest among the
/// shortest-depth parents represented.
fn select_directory(paths: &[PathBuf]) -> PathBuf {
    paths
        .iter()
        .map(|p| p.parent().unwrap_or_else(|| Path::new("")).to_path_buf())
        .min_by(|a, b| {
            a.components()
                .count()
                .cmp(&b.components().count())
                .then_with(|| a.cmp(b))
        })
        .unwrap_or_default()
}

/// Strip a trailing version counter from a delta token (hyphen optional).
fn strip_delta_suffix(token: &str) -> &str {
    match DELTA_SUFFIX_RE.find(token) {
        Some(m) => &token[..m.start()],
        None => token,
    }
}

/// Scrub a raw delta: drop indicator glyphs, turn everything that is not
/// alphanumeric/underscore/whitespace/hyphen into a space, collapse runs
/// of whitespace.
fn clean_delta(delta: &str, indicator: char) -> String {
    let scrubbed: String = delta
        .chars()
        .filter(|&c| c != indicator)
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    scrubbed.split_whitespace().collect::<Vec<_>>().join(" ")
}
