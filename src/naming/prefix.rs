//! Most-common-long-prefix extraction.
//!
//! Given the filename stems of a duplicate group, find the cumulative
//! token prefix that recurs most often across stems. Repetition is evidence
//! of a true shared name, so when the winning tally is greater than one the
//! longest winner is preferred; when nothing recurs every guess is equally
//! weak and the shortest candidate is the conservative choice.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Trailing `-N` / `-NN` version suffix on a token ("shot-1", "shot-12").
static HYPHEN_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d{1,2}$").expect("valid regex"));

/// A token that is nothing but 1-2 digits (a copy counter, not content).
static SHORT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}$").expect("valid regex"));

/// Select the most common long prefix among filename stems.
///
/// Each stem is tokenized on whitespace and walked left to right. Tokens
/// equal to the word "copy" (case-insensitive) are skipped, trailing
/// `-<1-2 digit>` suffixes are stripped, and bare 1-2 digit tokens are
/// skipped. Every cumulative space-joined prefix is tallied across all
/// stems and the highest-tally prefix wins.
///
/// Tie-breaks: tally > 1 prefers the longest winner, tally == 1 the
/// shortest; remaining ties break lexicographically so the result is
/// independent of stem order. If no prefix could be tallied at all
/// (every token was skipped), the first stem is returned unchanged.
#[must_use]
pub fn most_common_long_prefix(stems: &[String]) -> String {
    if stems.len() == 1 {
        return stems[0].clone();
    }

    let mut tally: HashMap<String, usize> = HashMap::new();
    for stem in stems {
        let mut prefix = String::new();
        for token in stem.split_whitespace() {
            if token.eq_ignore_ascii_case("copy") {
                continue;
            }
            let token = strip_version_suffix(token);
            if token.is_empty() || SHORT_NUMBER_RE.is_match(token) {
                continue;
            }

            if prefix.is_empty() {
                prefix.push_str(token);
            } else {
                prefix.push(' ');
                prefix.push_str(token);
            }
            *tally.entry(prefix.clone()).or_insert(0) += 1;
        }
    }

    let Some(&best_tally) = tally.values().max() else {
        return stems.first().cloned().unwrap_or_default();
    };

    let mut winners: Vec<&String> = tally
        .iter()
        .filter(|(_, &count)| count == best_tally)
        .map(|(prefix, _)| prefix)
        .collect();

    if best_tally > 1 {
        // The prefix recurs: the longest shared content is the most specific.
        winners.sort_by(|a, b| {
            char_len(b)
                .cmp(&char_len(a))
                .then_with(|| a.cmp(b))
        });
    } else {
        // Nothing recurs: the shortest guess is the least speculative.
        winners.sort_by(|a, b| {
            char_len(a)
                .cmp(&char_len(b))
                .then_with(|| a.cmp(b))
        });
    }

    winners[0].clone()
}

/// Strip a trailing `-N` / `-NN` version suffix from a token.
fn strip_version_suffix(token: &str) -> &str {
    match HYPHEN_SUFFIX_RE.find(token) {
        Some(m) => &token[..m.start()],
        None => token,
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
