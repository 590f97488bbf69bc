//! Storage-listing boundary.
//!
//! The reconciler only consumes `{name, is_dir, id, mod_time}` tuples; how
//! they are obtained is behind the [`RemoteLister`] trait. The one shipped
//! implementation shells out to rclone, which already speaks every cloud
//! provider this system cares about.

mod rclone;

use async_trait::async_trait;
use thiserror::Error;

use crate::reconcile::RemoteEntry;

pub use rclone::RcloneLister;

/// Errors from listing a storage remote.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("listing {path} timed out after {seconds}s")]
    Timeout { path: String, seconds: u64 },

    #[error("listing {path} failed ({status}): {stderr}")]
    Failed {
        path: String,
        status: String,
        stderr: String,
    },

    #[error("unparseable listing for {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// A directory-listing capability for one or more storage remotes.
#[async_trait]
pub trait RemoteLister: Send + Sync {
    /// Implementation name for logging.
    fn name(&self) -> &str;

    /// List the entries directly under `path` (rclone-style
    /// `"<remote-id>:<path>"`). Returns files and directories; callers
    /// filter on `is_dir`.
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError>;
}
