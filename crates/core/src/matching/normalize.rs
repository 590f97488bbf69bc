//! Name normalization for comparison.
//!
//! Two normalizers with different aggression levels:
//! - [`comparison_key`] for title matching: lower-case, season markers
//!   stripped, trimmed. Keeps CJK text intact.
//! - [`strict_key`] for storage-folder fuzzy matching: ASCII letters and
//!   digits only. Folder names picked up from cloud remotes suffer
//!   OS/transfer mangling (punctuation drift, diacritics, stray spacing)
//!   that titles do not, so everything else is dropped.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static SEASON_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new("[第一二三四五六七八九十0-9]+季").unwrap());

/// Produce a comparison key for title matching.
///
/// Lower-cases, strips season-ordinal substrings (`第二季`, `2季`, ...), and
/// trims surrounding whitespace. Idempotent: normalizing an already
/// normalized name returns it unchanged.
pub fn comparison_key(name: &str) -> String {
    let lower = name.to_lowercase();
    SEASON_MARKER.replace_all(&lower, "").trim().to_string()
}

/// Produce a strict key for storage-folder fuzzy matching.
///
/// Keeps only ASCII lower-case letters and digits; spaces, punctuation and
/// CJK characters are all dropped. A name with no Latin/digit content
/// normalizes to the empty string, which callers must treat as "no usable
/// key" rather than a wildcard.
pub fn strict_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
