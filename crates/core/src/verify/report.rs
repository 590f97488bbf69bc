//! Human-readable rendering of a verification run.

use super::pipeline::{VerificationReport, Verdict, VerifyRecord};

/// Statuses in the order they appear in the report.
const ISSUE_ORDER: [Verdict; 3] = [Verdict::SeasonMismatch, Verdict::Mismatch, Verdict::NotFound];

/// Truncate to `n` characters, appending an ellipsis when shortened.
fn truncate(s: &str, n: usize) -> String {
    if s.chars().count() <= n {
        return s.to_string();
    }
    let mut out: String = s.chars().take(n).collect();
    out.push_str("...");
    out
}

fn push_record(out: &mut String, record: &VerifyRecord) {
    out.push_str(&format!("- {} ({})\n", record.anime_name, record.year));
    out.push_str(&format!("  issue: {}\n", record.issue));
    if !record.search_title.is_empty() {
        out.push_str(&format!("  title: {}\n", truncate(&record.search_title, 60)));
    }
}

/// Render the text report: overall counts, then issues grouped by status.
pub fn render_report(report: &VerificationReport) -> String {
    let mut out = String::new();
    out.push_str("=== verification report ===\n");
    out.push_str(&format!("total:           {}\n", report.total()));
    out.push_str(&format!("ok:              {}\n", report.count(Verdict::Ok)));
    for status in ISSUE_ORDER {
        out.push_str(&format!("{:<16} {}\n", format!("{}:", status), report.count(status)));
    }

    for status in ISSUE_ORDER {
        let group: Vec<&VerifyRecord> = report
            .issues
            .iter()
            .filter(|r| r.status == status)
            .collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("\n=== {} ({}) ===\n", status, group.len()));
        for record in group {
            push_record(&mut out, record);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: Verdict, title: &str) -> VerifyRecord {
        VerifyRecord {
            anime_name: name.to_string(),
            anime_id: 1,
            year: 2020,
            search_title: title.to_string(),
            status,
            issue: "some issue".to_string(),
        }
    }

    #[test]
    fn test_report_groups_by_status_with_counts() {
        let report = VerificationReport {
            verified: vec![record("good", Verdict::Ok, "good title")],
            issues: vec![
                record("wrong season", Verdict::SeasonMismatch, "s2 title"),
                record("missing", Verdict::NotFound, ""),
                record("also wrong season", Verdict::SeasonMismatch, "s3 title"),
            ],
        };
        let text = render_report(&report);
        let counts_line = |label: &str| {
            text.lines()
                .find(|l| l.starts_with(label))
                .unwrap_or_else(|| panic!("missing {label} line"))
                .to_string()
        };
        assert!(counts_line("total:").ends_with('4'));
        assert!(counts_line("ok:").ends_with('1'));
        assert!(text.contains("=== season_mismatch (2) ==="));
        assert!(text.contains("=== not_found (1) ==="));
        assert!(!text.contains("=== mismatch"));
        // not_found entries carry no search title line
        let not_found_section = text.split("=== not_found").nth(1).unwrap();
        assert!(!not_found_section.contains("title:"));
    }

    #[test]
    fn test_truncate_is_char_aware() {
        let long = "鬼".repeat(80);
        let short = truncate(&long, 60);
        assert_eq!(short.chars().count(), 63);
        assert!(short.ends_with("..."));
        assert_eq!(truncate("short", 60), "short");
    }
}
