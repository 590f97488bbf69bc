//! The anime catalog: canonical records plus the per-run search-result
//! snapshot they are verified against.

mod types;

pub use types::{CatalogEntry, SearchHit, SearchIndex};
