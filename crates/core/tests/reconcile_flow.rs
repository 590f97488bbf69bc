//! Mapping reconciliation flow tests.
//!
//! Exercise the mapping lifecycle against mock remote listings: repair on
//! one remote, adoption onto a second remote, episode scanning, and the
//! durable round trip through the mapping file.

use tempfile::TempDir;

use animatch_core::testing::MockLister;
use animatch_core::{
    episode_files, load_json_array, match_into_remote, reconcile_mapping, save_json_array,
    FolderMapping, ReconcileOutcome, RemoteEntry, RemoteLister, RemoteSpec,
};

fn mapping(anime: &str, folder: &str, path: &str, file_id: &str) -> FolderMapping {
    FolderMapping {
        anime_name: anime.to_string(),
        folder_name: folder.to_string(),
        folder_path: path.to_string(),
        file_id: file_id.to_string(),
        episodes: vec![],
    }
}

#[tokio::test]
async fn test_repair_pass_over_one_remote() {
    let pikpak = RemoteSpec::new("pikpak", "wukazi");
    let lister = MockLister::new().with_listing(
        "pikpak:wukazi",
        vec![
            // Renamed on the provider side; id survived.
            RemoteEntry::dir("Steins;Gate (2011)", "pk-1"),
            // Untouched.
            RemoteEntry::dir("犬夜叉 (2000)", "pk-2"),
            // Punctuation drift, no id stored in the mapping.
            RemoteEntry::dir("K-ON!! (2010)", "pk-3"),
        ],
    );

    let mappings = vec![
        mapping("命运石之门 (2011)", "Steins Gate (2011)", "pikpak:wukazi/Steins Gate (2011)", "pk-1"),
        mapping("犬夜叉 (2000)", "犬夜叉 (2000)", "pikpak:wukazi/犬夜叉 (2000)", "pk-2"),
        mapping("轻音少女 (2010)", "K-ON！！ (2010)", "pikpak:wukazi/K-ON！！ (2010)", ""),
        mapping("迷失映射 (2015)", "Lost Mapping (2015)", "pikpak:wukazi/Lost Mapping (2015)", ""),
    ];

    let listing = lister.list("pikpak:wukazi").await.unwrap();

    let mut updated = 0;
    let mut unresolved = 0;
    let mut repaired = Vec::new();
    for m in &mappings {
        match reconcile_mapping(m, &pikpak, &listing) {
            ReconcileOutcome::Unchanged => repaired.push(m.clone()),
            ReconcileOutcome::Updated(new_mapping) => {
                updated += 1;
                repaired.push(new_mapping);
            }
            ReconcileOutcome::Unresolved { .. } => {
                unresolved += 1;
                repaired.push(m.clone());
            }
        }
    }

    assert_eq!(updated, 2);
    assert_eq!(unresolved, 1);
    assert_eq!(repaired[0].folder_name, "Steins;Gate (2011)");
    assert_eq!(repaired[0].folder_path, "pikpak:wukazi/Steins;Gate (2011)");
    assert_eq!(repaired[2].folder_name, "K-ON!! (2010)");
    assert_eq!(repaired[2].file_id, "pk-3");
    // The unresolved mapping is carried through untouched.
    assert_eq!(repaired[3].folder_name, "Lost Mapping (2015)");
}

#[tokio::test]
async fn test_adoption_onto_second_remote() {
    let onedrive = RemoteSpec::new("onedrive", "anime");
    let lister = MockLister::new().with_listing(
        "onedrive:anime",
        vec![
            RemoteEntry::dir("犬夜叉 (2000)", ""),
            RemoteEntry::dir("Steins Gate (2011)", ""),
        ],
    );
    let listing = lister.list("onedrive:anime").await.unwrap();

    let origin = vec![
        mapping("犬夜叉 (2000)", "犬夜叉 (2000)", "pikpak:wukazi/犬夜叉 (2000)", "pk-2"),
        // Transfer tool dropped the semicolon; unique strict key still maps.
        mapping("命运石之门 (2011)", "Steins;Gate (2011)", "pikpak:wukazi/Steins;Gate (2011)", "pk-1"),
        mapping("未传输 (2020)", "Not Transferred (2020)", "pikpak:wukazi/Not Transferred (2020)", ""),
    ];

    let adopted: Vec<FolderMapping> = origin
        .iter()
        .filter_map(|m| match_into_remote(m, &onedrive, &listing))
        .collect();

    assert_eq!(adopted.len(), 2);
    assert_eq!(adopted[0].folder_path, "onedrive:anime/犬夜叉 (2000)");
    assert_eq!(adopted[1].folder_name, "Steins Gate (2011)");
    assert_eq!(adopted[1].folder_path, "onedrive:anime/Steins Gate (2011)");
}

#[tokio::test]
async fn test_episode_scan_fills_mapping() {
    let lister = MockLister::new().with_listing(
        "onedrive:anime/犬夜叉 (2000)",
        vec![
            RemoteEntry::file("EP02.mkv"),
            RemoteEntry::file("EP01.mkv"),
            RemoteEntry::file("info.nfo"),
        ],
    );

    let mut m = mapping("犬夜叉 (2000)", "犬夜叉 (2000)", "onedrive:anime/犬夜叉 (2000)", "");
    let listing = lister.list(&m.folder_path).await.unwrap();
    m.episodes = episode_files(&listing);

    assert_eq!(m.episodes, vec!["EP01.mkv", "EP02.mkv"]);
}

#[test]
fn test_mapping_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anime_mapping.json");

    let mut with_episodes = mapping(
        "犬夜叉 (2000)",
        "犬夜叉 (2000)",
        "onedrive:anime/犬夜叉 (2000)",
        "od-1",
    );
    with_episodes.episodes = vec!["EP01.mkv".to_string()];
    let mappings = vec![
        with_episodes,
        mapping("命运石之门 (2011)", "Steins;Gate (2011)", "pikpak:wukazi/Steins;Gate (2011)", ""),
    ];

    save_json_array(&path, &mappings).unwrap();
    let reloaded: Vec<FolderMapping> = load_json_array(&path).unwrap();
    assert_eq!(reloaded, mappings);
}

#[tokio::test]
async fn test_unknown_path_is_listing_error() {
    let lister = MockLister::new();
    assert!(lister.list("nowhere:at-all").await.is_err());
}
