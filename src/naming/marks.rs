//! Duplicate-indicator mark counting and encoding.
//!
//! A "mark" is one indicator glyph embedded in a filename; a run of `n`
//! marks records that `n` duplicates were collapsed into that file over
//! time. Marks already present in a group's names ("carryover") combine
//! with the marks contributed by the current group according to a
//! [`MarkPolicy`], and totals beyond [`MAX_MARKS`] switch to a bounded
//! numeral notation so run-length strings never grow without limit.

/// Largest mark total rendered as a plain glyph run.
pub const MAX_MARKS: usize = 14;

/// How marks from this run combine with carryover marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkPolicy {
    /// Marks accumulate: `total = current + carryover`.
    Additive,
    /// Marks are a high-water record: `total = max(current, carryover)`.
    HighWater,
}

/// Length of the longest contiguous run of the indicator character in `s`.
///
/// Returns 0 when the indicator does not occur. Used both to detect marks
/// already embedded in an existing name and to detect marks hidden in a
/// delta token.
#[must_use]
pub fn count_marks(s: &str, indicator: char) -> usize {
    let mut longest = 0usize;
    let mut run = 0usize;
    for c in s.chars() {
        if c == indicator {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Fold the group's mark total into a final filename.
///
/// `current = group_len - 1` is the number of files collapsed into the
/// survivor (always >= 1 for an actionable group); it combines with
/// `carryover` per `policy`. Totals over [`MAX_MARKS`] render as
/// `"<base> <ii><total><ii><ext>"` with the indicator doubled on both
/// sides (e.g. `photo !!15!!.jpg`); smaller totals append a space and a
/// glyph run; a zero total leaves the name unchanged.
#[must_use]
pub fn apply_marks(
    base: &str,
    extension: &str,
    group_len: usize,
    carryover: usize,
    policy: MarkPolicy,
    indicator: char,
) -> String {
    let current = group_len.saturating_sub(1);
    let total = match policy {
        MarkPolicy::Additive => current + carryover,
        MarkPolicy::HighWater => current.max(carryover),
    };

    if total > MAX_MARKS {
        format!("{base} {i}{i}{total}{i}{i}{extension}", i = indicator)
    } else if total > 0 {
        let run: String = std::iter::repeat(indicator).take(total).collect();
        format!("{base} {run}{extension}")
    } else {
        format!("{base}{extension}")
    }
}
