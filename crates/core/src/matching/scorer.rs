//! Candidate scoring and selection for torrent-search results.
//!
//! Given the titles a search source returned for one keyword, pick the one
//! most likely to be the complete/collected release in acceptable quality.
//! Scoring is additive so independent signals stack; ties keep the
//! first-seen candidate so repeated runs are reproducible.

use serde::{Deserialize, Serialize};

/// A title string from a search source, with whatever else the source
/// attached to it. Not owned by the catalog; looked up per keyword at
/// match time and discarded after scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateTitle {
    /// Full release title as published.
    pub title: String,
    /// Directly resolvable resource locator (magnet URI or direct link).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    /// Publication timestamp as reported by the source (RFC 2822 style,
    /// kept verbatim).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl CandidateTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            locator: None,
            published: None,
        }
    }

    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    fn has_locator(&self) -> bool {
        self.locator.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// Score one candidate title.
///
/// Signals, all additive:
/// - collection marker (`合集`, `全集`, or a `1-`/`01-` episode range): +100
/// - subtitle-group marker (`简`, `繁`, `字幕`, `中文`): +50
/// - resolution: `1080` +30, else `720` +20 (first wins, not both)
/// - `bd` source marker (covers `bdrip`): +20
/// - a resolvable locator already attached: +10
pub fn score_title(candidate: &CandidateTitle) -> u32 {
    let title = candidate.title.to_lowercase();
    let mut score = 0;

    if title.contains("合集")
        || title.contains("全集")
        || title.contains("1-")
        || title.contains("01-")
    {
        score += 100;
    }

    if title.contains('简')
        || title.contains('繁')
        || title.contains("字幕")
        || title.contains("中文")
    {
        score += 50;
    }

    if title.contains("1080") {
        score += 30;
    } else if title.contains("720") {
        score += 20;
    }

    if title.contains("bd") {
        score += 20;
    }

    if candidate.has_locator() {
        score += 10;
    }

    score
}

/// Select the best candidate from a search-result set.
///
/// The highest additive score wins; equal scores keep the earlier
/// candidate. When nothing scores above zero the first candidate with a
/// locator is returned regardless of score - an unscored single result is
/// still usually correct for obscure titles with little search-result
/// diversity. Returns None for an empty set or when no fallback has a
/// locator.
pub fn select_best(candidates: &[CandidateTitle]) -> Option<&CandidateTitle> {
    let mut best: Option<(&CandidateTitle, u32)> = None;
    for candidate in candidates {
        let score = score_title(candidate);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    match best {
        Some((candidate, score)) if score > 0 => Some(candidate),
        _ => candidates.iter().find(|c| c.has_locator()),
    }
}
