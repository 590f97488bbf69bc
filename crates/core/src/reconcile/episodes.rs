//! Episode-file enumeration from per-folder listings.

use super::types::RemoteEntry;

const VIDEO_EXTENSIONS: [&str; 6] = [".mp4", ".mkv", ".avi", ".webm", ".flv", ".mov"];

fn is_video_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Collect the video file names from a folder listing, sorted.
///
/// Sorting gives a stable episode order; sources that pad episode numbers
/// sort correctly, the rest at least sort deterministically.
pub fn episode_files(listing: &[RemoteEntry]) -> Vec<String> {
    let mut episodes: Vec<String> = listing
        .iter()
        .filter(|e| !e.is_dir && is_video_file(&e.name))
        .map(|e| e.name.clone())
        .collect();
    episodes.sort();
    episodes
}
