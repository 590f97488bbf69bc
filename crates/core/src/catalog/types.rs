//! Types for the anime catalog and its search-result companion file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::matching::CandidateTitle;

/// One canonical anime record from the metadata source of record.
///
/// Loaded once per run and treated as an immutable snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique numeric identifier across the catalog.
    pub id: u32,
    /// Primary (usually romanized Japanese) name.
    pub name: String,
    /// Localized name; may be empty.
    #[serde(default)]
    pub name_cn: String,
    /// Release year.
    #[serde(default)]
    pub year: i32,
    /// Air date as published by the catalog source.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    /// Re-hosted cover image URL.
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry {
    /// Display name: localized name when present, primary name otherwise.
    pub fn display_name(&self) -> &str {
        if self.name_cn.is_empty() {
            &self.name
        } else {
            &self.name_cn
        }
    }

    /// Display key used by the durable folder mapping: `"<name> (<year>)"`.
    pub fn display_key(&self) -> String {
        format!("{} ({})", self.display_name(), self.year)
    }
}

/// One row of the search-result input file, keyed by catalog id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub anime_name: String,
    pub anime_id: u32,
    #[serde(default)]
    pub year: i32,
    pub title: String,
    /// Magnet URI or direct link; may be empty when the source had none.
    #[serde(default)]
    pub magnet: String,
    #[serde(default)]
    pub pub_date: String,
    /// Score assigned at search time; informational only, verification
    /// re-scores deterministically and does not trust it.
    #[serde(default)]
    pub score: i64,
}

impl SearchHit {
    /// View this hit as a scorable candidate title.
    pub fn to_candidate(&self) -> CandidateTitle {
        let mut candidate = CandidateTitle::new(self.title.clone());
        if !self.magnet.is_empty() {
            candidate = candidate.with_locator(self.magnet.clone());
        }
        if !self.pub_date.is_empty() {
            candidate.published = Some(self.pub_date.clone());
        }
        candidate
    }
}

/// Search hits indexed by catalog id, insertion-ordered within each id.
///
/// Built once per run before the matching passes, so the O(n) construction
/// cost is paid in one visible place instead of re-scanning the hit slice
/// per catalog entry.
#[derive(Debug, Default)]
pub struct SearchIndex {
    by_id: HashMap<u32, Vec<SearchHit>>,
}

impl SearchIndex {
    pub fn build(hits: impl IntoIterator<Item = SearchHit>) -> Self {
        let mut by_id: HashMap<u32, Vec<SearchHit>> = HashMap::new();
        for hit in hits {
            by_id.entry(hit.anime_id).or_default().push(hit);
        }
        Self { by_id }
    }

    pub fn hits_for(&self, anime_id: u32) -> &[SearchHit] {
        self.by_id.get(&anime_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str, name_cn: &str, year: i32) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            name_cn: name_cn.to_string(),
            year,
            date: String::new(),
            summary: String::new(),
            cover: String::new(),
            score: 0.0,
            tags: vec![],
        }
    }

    fn hit(anime_id: u32, title: &str) -> SearchHit {
        SearchHit {
            anime_name: String::new(),
            anime_id,
            year: 0,
            title: title.to_string(),
            magnet: String::new(),
            pub_date: String::new(),
            score: 0,
        }
    }

    #[test]
    fn test_display_name_prefers_localized() {
        let e = entry(1, "Kimetsu no Yaiba", "鬼灭之刃", 2019);
        assert_eq!(e.display_name(), "鬼灭之刃");
        assert_eq!(e.display_key(), "鬼灭之刃 (2019)");
    }

    #[test]
    fn test_display_name_falls_back_to_primary() {
        let e = entry(2, "Inuyasha", "", 2000);
        assert_eq!(e.display_name(), "Inuyasha");
        assert_eq!(e.display_key(), "Inuyasha (2000)");
    }

    #[test]
    fn test_catalog_entry_lenient_fields() {
        // Only id and name are required; everything else defaults.
        let parsed: CatalogEntry = serde_json::from_str(r#"{"id": 7, "name": "Foo"}"#).unwrap();
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.year, 0);
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_search_index_groups_and_preserves_order() {
        let index = SearchIndex::build(vec![hit(1, "first"), hit(2, "other"), hit(1, "second")]);
        let got: Vec<&str> = index.hits_for(1).iter().map(|h| h.title.as_str()).collect();
        assert_eq!(got, vec!["first", "second"]);
        assert!(index.hits_for(999).is_empty());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_to_candidate_drops_empty_magnet() {
        assert!(hit(1, "t").to_candidate().locator.is_none());
    }
}
