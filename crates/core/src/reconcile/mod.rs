//! Folder reconciliation - keeping the durable catalog-to-folder mapping
//! honest against live storage listings, one remote at a time.

mod episodes;
mod resolver;
mod types;

pub use episodes::episode_files;
pub use resolver::{match_into_remote, reconcile_mapping};
pub use types::{FolderMapping, ReconcileOutcome, RemoteEntry, RemoteSpec};
