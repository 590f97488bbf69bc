//! Canonical-name vs candidate-title matching.

use crate::matching::normalize::comparison_key;

/// Decide whether a candidate title refers to the canonical name.
///
/// Two tiers:
/// (a) the season-stripped canonical name occurring as a contiguous
///     substring of the lower-cased candidate is an immediate match;
/// (b) otherwise the canonical name is split into whitespace tokens longer
///     than one character, and the match succeeds when at least half of
///     them (integer division, minimum one) occur in the candidate.
///
/// Tier (b) tolerates reordering and truncation without an edit-distance
/// computation. A name with tokens entirely absent from the candidate
/// never matches.
pub fn title_matches(canonical: &str, candidate: &str) -> bool {
    let stripped = comparison_key(canonical);
    let candidate = candidate.to_lowercase();

    if candidate.contains(&stripped) {
        return true;
    }

    let tokens: Vec<&str> = stripped
        .split_whitespace()
        .filter(|t| t.chars().count() > 1)
        .collect();
    if tokens.is_empty() {
        return false;
    }

    let matched = tokens.iter().filter(|t| candidate.contains(**t)).count();
    matched >= (tokens.len() / 2).max(1)
}
