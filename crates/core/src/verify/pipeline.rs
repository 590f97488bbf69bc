//! Per-entry verdict classification over the full catalog.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{CatalogEntry, SearchIndex};
use crate::matching::{extract_season, select_best, title_matches};

/// Terminal classification for one catalog entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ok,
    Mismatch,
    SeasonMismatch,
    NotFound,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Ok => "ok",
            Verdict::Mismatch => "mismatch",
            Verdict::SeasonMismatch => "season_mismatch",
            Verdict::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified catalog entry, with the evidence that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRecord {
    pub anime_name: String,
    pub anime_id: u32,
    pub year: i32,
    /// The matched search title; empty for `not_found`.
    #[serde(default)]
    pub search_title: String,
    pub status: Verdict,
    #[serde(default)]
    pub issue: String,
}

/// Output artifact of one verification run. Fully replaced each run,
/// never merged.
#[derive(Debug, Default)]
pub struct VerificationReport {
    /// Entries that classified `ok`, in catalog order.
    pub verified: Vec<VerifyRecord>,
    /// Everything else, in catalog order.
    pub issues: Vec<VerifyRecord>,
}

impl VerificationReport {
    pub fn total(&self) -> usize {
        self.verified.len() + self.issues.len()
    }

    pub fn count(&self, status: Verdict) -> usize {
        if status == Verdict::Ok {
            return self.verified.len();
        }
        self.issues.iter().filter(|r| r.status == status).count()
    }
}

/// Classify a single catalog entry against its best-scored search hit.
///
/// A pure function of its arguments; entries can be classified in any
/// order or concurrently. Degraded classifications (`not_found`,
/// `mismatch`, `season_mismatch`) are expected outcomes, never errors.
pub fn classify_entry(entry: &CatalogEntry, index: &SearchIndex) -> VerifyRecord {
    let name = entry.display_name();

    let candidates: Vec<_> = index
        .hits_for(entry.id)
        .iter()
        .map(|h| h.to_candidate())
        .collect();

    let Some(best) = select_best(&candidates) else {
        return VerifyRecord {
            anime_name: name.to_string(),
            anime_id: entry.id,
            year: entry.year,
            search_title: String::new(),
            status: Verdict::NotFound,
            issue: "no release found".to_string(),
        };
    };

    let mut record = VerifyRecord {
        anime_name: name.to_string(),
        anime_id: entry.id,
        year: entry.year,
        search_title: best.title.clone(),
        status: Verdict::Ok,
        issue: String::new(),
    };

    let anime_season = extract_season(name);
    let title_season = extract_season(&best.title);

    if anime_season == 0 && title_season > 1 {
        record.status = Verdict::SeasonMismatch;
        record.issue = format!(
            "catalog entry has no season marker (implies season 1), but the release is season {}",
            title_season
        );
        return record;
    }
    if anime_season > 0 && title_season != anime_season {
        record.status = Verdict::SeasonMismatch;
        record.issue = format!(
            "catalog entry is season {}, release is season {}",
            anime_season, title_season
        );
        return record;
    }

    if !title_matches(name, &best.title) {
        record.status = Verdict::Mismatch;
        record.issue = "name does not appear to match the release title".to_string();
        return record;
    }

    record
}

/// Run the verification pass over the whole catalog.
///
/// Both inputs are immutable snapshots passed in by the caller; the
/// pipeline holds no state of its own. Output order equals catalog order.
pub fn run_verification(catalog: &[CatalogEntry], index: &SearchIndex) -> VerificationReport {
    let mut report = VerificationReport::default();
    for entry in catalog {
        let record = classify_entry(entry, index);
        debug!(
            anime_id = record.anime_id,
            status = %record.status,
            "classified catalog entry"
        );
        if record.status == Verdict::Ok {
            report.verified.push(record);
        } else {
            report.issues.push(record);
        }
    }
    report
}
