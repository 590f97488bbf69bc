//! Season-number extraction from free-text titles.
//!
//! Release titles and catalog names mark seasons in wildly different ways:
//! `第二季`, `Season 2`, `S2`, roman numerals, or just a trailing digit.
//! The extractor applies a strict precedence order and never fails - an
//! unrecognized title simply yields 0 ("no season marker").

use once_cell::sync::Lazy;
use regex_lite::Regex;

static CN_ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new("第([一二三四五六七八九十0-9]+)季").unwrap());
static SEASON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"season\s*(\d+)").unwrap());
static S_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bs(\d+)\b").unwrap());
static TRAILING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

/// Map a Chinese numeral (one through ten) to its integer value.
fn chinese_numeral(s: &str) -> Option<u32> {
    match s {
        "一" => Some(1),
        "二" => Some(2),
        "三" => Some(3),
        "四" => Some(4),
        "五" => Some(5),
        "六" => Some(6),
        "七" => Some(7),
        "八" => Some(8),
        "九" => Some(9),
        "十" => Some(10),
        _ => None,
    }
}

/// Extract the season number implied by a title.
///
/// Returns 0 when no season marker is detected. 0 is "unspecified", which
/// downstream comparison treats as season-1-equivalent but not identical to
/// an explicit season-1 marker.
///
/// Rules, in strict precedence order (first match wins):
/// 1. `第<N>季` with `<N>` a Chinese numeral (one through ten) or Arabic digits
/// 2. `season <N>`
/// 3. a standalone `s<N>` token
/// 4. roman numerals: `iii` is 3, `ii` without `iii` is 2 (higher values are
///    not detected)
/// 5. a trailing integer, accepted only in 2..=10 so that years and episode
///    counts are not absorbed
pub fn extract_season(title: &str) -> u32 {
    let lower = title.to_lowercase();

    if let Some(caps) = CN_ORDINAL.captures(&lower) {
        let raw = &caps[1];
        if let Some(n) = chinese_numeral(raw) {
            return n;
        }
        if let Ok(n) = raw.parse::<u32>() {
            return n;
        }
        // Compound numerals like 十一 are not mapped; fall through.
    }

    if let Some(caps) = SEASON_WORD.captures(&lower) {
        if let Ok(n) = caps[1].parse::<u32>() {
            return n;
        }
    }

    if let Some(caps) = S_TOKEN.captures(&lower) {
        if let Ok(n) = caps[1].parse::<u32>() {
            return n;
        }
    }

    if lower.contains("iii") {
        return 3;
    }
    if lower.contains("ii") {
        return 2;
    }

    if let Some(caps) = TRAILING_NUMBER.captures(lower.trim()) {
        if let Ok(n) = caps[1].parse::<u32>() {
            if (2..=10).contains(&n) {
                return n;
            }
        }
    }

    0
}
