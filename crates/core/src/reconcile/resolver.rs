//! Folder reconciliation against live remote listings.
//!
//! Folder names on cloud remotes drift: transfer tools mangle punctuation,
//! humans rename, providers re-romanize. Reconciliation repairs the stored
//! mapping from a live listing without ever guessing - an ambiguous
//! situation is surfaced, not resolved arbitrarily.

use std::collections::HashMap;

use tracing::debug;

use crate::matching::strict_key;

use super::types::{FolderMapping, ReconcileOutcome, RemoteEntry, RemoteSpec};

/// Index of listing entries by strict normalized name.
///
/// Entries whose names normalize to the empty string (pure-CJK names) are
/// excluded: an empty key matches nothing.
fn strict_index(listing: &[RemoteEntry]) -> HashMap<String, Vec<&RemoteEntry>> {
    let mut index: HashMap<String, Vec<&RemoteEntry>> = HashMap::new();
    for entry in listing.iter().filter(|e| e.is_dir) {
        let key = strict_key(&entry.name);
        if !key.is_empty() {
            index.entry(key).or_default().push(entry);
        }
    }
    index
}

/// Reconcile one stored mapping against the live listing of its remote.
///
/// Resolution order:
/// 1. identity - the stored stable identifier equals a listing entry's
///    identifier; that entry is authoritative regardless of name drift;
/// 2. exact name match - the stored folder name still exists as-is;
/// 3. strict-normalized match - adopted only when exactly one listing
///    entry shares the stored name's non-empty strict key.
///
/// Anything else is `Unresolved` and left for manual review.
pub fn reconcile_mapping(
    mapping: &FolderMapping,
    remote: &RemoteSpec,
    listing: &[RemoteEntry],
) -> ReconcileOutcome {
    // 1. Identity: the provider id survives renames.
    if !mapping.file_id.is_empty() {
        if let Some(entry) = listing
            .iter()
            .filter(|e| e.is_dir && !e.id.is_empty())
            .find(|e| e.id == mapping.file_id)
        {
            if entry.name == mapping.folder_name {
                return ReconcileOutcome::Unchanged;
            }
            debug!(
                anime = %mapping.anime_name,
                old = %mapping.folder_name,
                new = %entry.name,
                "identity match, adopting renamed folder"
            );
            return ReconcileOutcome::Updated(FolderMapping {
                folder_name: entry.name.clone(),
                folder_path: remote.folder_path(&entry.name),
                ..mapping.clone()
            });
        }
    }

    // 2. Exact name.
    if listing
        .iter()
        .any(|e| e.is_dir && e.name == mapping.folder_name)
    {
        return ReconcileOutcome::Unchanged;
    }

    // 3. Unique strict-normalized match.
    let key = strict_key(&mapping.folder_name);
    if key.is_empty() {
        return ReconcileOutcome::Unresolved {
            reason: "folder name has no usable normalized form".to_string(),
        };
    }
    match strict_index(listing).get(&key).map(Vec::as_slice) {
        Some([entry]) => {
            debug!(
                anime = %mapping.anime_name,
                old = %mapping.folder_name,
                new = %entry.name,
                "fuzzy match, adopting folder"
            );
            ReconcileOutcome::Updated(FolderMapping {
                folder_name: entry.name.clone(),
                folder_path: remote.folder_path(&entry.name),
                file_id: if entry.id.is_empty() {
                    mapping.file_id.clone()
                } else {
                    entry.id.clone()
                },
                ..mapping.clone()
            })
        }
        Some(entries) => ReconcileOutcome::Unresolved {
            reason: format!("{} equally plausible folders on the remote", entries.len()),
        },
        None => ReconcileOutcome::Unresolved {
            reason: "no matching folder on the remote".to_string(),
        },
    }
}

/// Match a mapping into a different remote's listing (e.g. after a
/// PikPak-to-OneDrive transfer).
///
/// Stable identifiers do not carry across providers, so resolution is
/// keyed by name only: the transferred folder name first, then the
/// catalog display key the mapping sets share; exact matches before
/// unique strict-key matches. Returns the adopted mapping or None when
/// there is no confident counterpart on the target.
pub fn match_into_remote(
    mapping: &FolderMapping,
    target: &RemoteSpec,
    listing: &[RemoteEntry],
) -> Option<FolderMapping> {
    let keys = [&mapping.folder_name, &mapping.anime_name];

    for name in keys {
        if let Some(entry) = listing.iter().find(|e| e.is_dir && &e.name == name) {
            return Some(FolderMapping {
                folder_name: entry.name.clone(),
                folder_path: target.folder_path(&entry.name),
                ..mapping.clone()
            });
        }
    }

    let index = strict_index(listing);
    for name in keys {
        let key = strict_key(name);
        if key.is_empty() {
            continue;
        }
        if let Some([entry]) = index.get(&key).map(Vec::as_slice) {
            return Some(FolderMapping {
                folder_name: entry.name.clone(),
                folder_path: target.folder_path(&entry.name),
                ..mapping.clone()
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(folder_name: &str, file_id: &str) -> FolderMapping {
        FolderMapping {
            anime_name: "某动画 (2020)".to_string(),
            folder_name: folder_name.to_string(),
            folder_path: format!("pikpak:{folder_name}"),
            file_id: file_id.to_string(),
            episodes: vec![],
        }
    }

    fn remote() -> RemoteSpec {
        RemoteSpec::new("pikpak", "")
    }

    #[test]
    fn test_identity_match_adopts_renamed_folder() {
        let listing = vec![RemoteEntry::dir("Steins;Gate (2011)", "id-1")];
        let outcome = reconcile_mapping(&mapping("Steins Gate (2011)", "id-1"), &remote(), &listing);
        match outcome {
            ReconcileOutcome::Updated(updated) => {
                assert_eq!(updated.folder_name, "Steins;Gate (2011)");
                assert_eq!(updated.folder_path, "pikpak:Steins;Gate (2011)");
                assert_eq!(updated.file_id, "id-1");
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_identity_beats_conflicting_exact_name() {
        // The stored name still exists on the remote, but under a different
        // id; the identity match is authoritative.
        let listing = vec![
            RemoteEntry::dir("Old Name (2020)", "id-other"),
            RemoteEntry::dir("New Name (2020)", "id-1"),
        ];
        let outcome = reconcile_mapping(&mapping("Old Name (2020)", "id-1"), &remote(), &listing);
        match outcome {
            ReconcileOutcome::Updated(updated) => {
                assert_eq!(updated.folder_name, "New Name (2020)");
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_name_is_unchanged() {
        let listing = vec![RemoteEntry::dir("犬夜叉 (2000)", "")];
        let outcome = reconcile_mapping(&mapping("犬夜叉 (2000)", ""), &remote(), &listing);
        assert_eq!(outcome, ReconcileOutcome::Unchanged);
    }

    #[test]
    fn test_unique_fuzzy_match_adopts() {
        let listing = vec![
            RemoteEntry::dir("K-ON!! (2010)", "id-k"),
            RemoteEntry::dir("Other Show (2011)", "id-o"),
        ];
        let outcome = reconcile_mapping(&mapping("K-ON！！ (2010)", ""), &remote(), &listing);
        match outcome {
            ReconcileOutcome::Updated(updated) => {
                assert_eq!(updated.folder_name, "K-ON!! (2010)");
                assert_eq!(updated.file_id, "id-k");
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_fuzzy_match_is_unresolved() {
        let listing = vec![
            RemoteEntry::dir("Show! (2020)", ""),
            RemoteEntry::dir("SHOW (2020)", ""),
        ];
        let outcome = reconcile_mapping(&mapping("show (2020)", ""), &remote(), &listing);
        assert!(matches!(outcome, ReconcileOutcome::Unresolved { .. }));
    }

    #[test]
    fn test_empty_strict_key_is_unresolved() {
        // A pure-CJK stored name must not "fuzzy match" another pure-CJK
        // folder just because both normalize to nothing.
        let listing = vec![RemoteEntry::dir("完全另一部动画", "")];
        let outcome = reconcile_mapping(&mapping("鬼灭之刃", ""), &remote(), &listing);
        assert!(matches!(outcome, ReconcileOutcome::Unresolved { .. }));
    }

    #[test]
    fn test_no_match_is_unresolved() {
        let listing = vec![RemoteEntry::dir("Unrelated (1999)", "")];
        let outcome = reconcile_mapping(&mapping("Missing (2020)", ""), &remote(), &listing);
        assert!(matches!(outcome, ReconcileOutcome::Unresolved { .. }));
    }

    #[test]
    fn test_files_in_listing_are_ignored() {
        let listing = vec![RemoteEntry::file("Missing (2020)")];
        let outcome = reconcile_mapping(&mapping("Missing (2020)", ""), &remote(), &listing);
        assert!(matches!(outcome, ReconcileOutcome::Unresolved { .. }));
    }

    #[test]
    fn test_match_into_remote_exact() {
        let target = RemoteSpec::new("onedrive", "anime");
        let listing = vec![RemoteEntry::dir("犬夜叉 (2000)", "")];
        let adopted = match_into_remote(&mapping("犬夜叉 (2000)", "pik-id"), &target, &listing)
            .expect("should adopt");
        assert_eq!(adopted.folder_path, "onedrive:anime/犬夜叉 (2000)");
        assert_eq!(adopted.folder_name, "犬夜叉 (2000)");
        // Origin id is preserved; it simply stops being used for identity.
        assert_eq!(adopted.file_id, "pik-id");
    }

    #[test]
    fn test_match_into_remote_fuzzy_unique() {
        let target = RemoteSpec::new("onedrive", "anime");
        let listing = vec![RemoteEntry::dir("Re Zero (2016)", "")];
        let adopted =
            match_into_remote(&mapping("Re：Zero (2016)", ""), &target, &listing).expect("adopt");
        assert_eq!(adopted.folder_name, "Re Zero (2016)");
    }

    #[test]
    fn test_match_into_remote_by_display_key() {
        // The target folder was recreated under the catalog display key
        // rather than the transferred folder name.
        let target = RemoteSpec::new("onedrive", "anime");
        let listing = vec![RemoteEntry::dir("某动画 (2020)", "")];
        let adopted = match_into_remote(
            &mapping("[Sub] Some Show S1", ""),
            &target,
            &listing,
        )
        .expect("adopt via display key");
        assert_eq!(adopted.folder_name, "某动画 (2020)");
        assert_eq!(adopted.folder_path, "onedrive:anime/某动画 (2020)");
    }

    #[test]
    fn test_match_into_remote_absent_is_none() {
        let target = RemoteSpec::new("onedrive", "anime");
        assert!(match_into_remote(&mapping("犬夜叉 (2000)", ""), &target, &[]).is_none());
    }
}
