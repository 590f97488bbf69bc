//! Matching intelligence: season extraction, name normalization, title
//! matching and candidate scoring.
//!
//! Everything in this module is a pure function over strings - no I/O, no
//! shared state - so the verification pipeline can evaluate catalog
//! entries in any order or in parallel.

mod normalize;
mod scorer;
mod season;
mod title;

pub use normalize::{comparison_key, strict_key};
pub use scorer::{score_title, select_best, CandidateTitle};
pub use season::extract_season;
pub use title::title_matches;
