//! Verification pipeline - classify every catalog entry against its
//! matched search result.
//!
//! Terminal states per entry: `ok`, `mismatch`, `season_mismatch`,
//! `not_found`. Non-`ok` states are first-class outcomes, reported rather
//! than raised; one bad record never aborts the run.

mod pipeline;
mod report;

pub use pipeline::{
    classify_entry, run_verification, VerificationReport, Verdict, VerifyRecord,
};
pub use report::render_report;
