//! rclone-backed remote listing.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::reconcile::RemoteEntry;

use super::{RemoteError, RemoteLister};

/// Lists remotes by running `rclone lsjson <path>`.
pub struct RcloneLister {
    binary: String,
    timeout_secs: u64,
}

impl RcloneLister {
    pub fn new(binary: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            binary: binary.into(),
            timeout_secs,
        }
    }
}

impl Default for RcloneLister {
    fn default() -> Self {
        Self::new("rclone", 120)
    }
}

#[async_trait]
impl RemoteLister for RcloneLister {
    fn name(&self) -> &str {
        "rclone"
    }

    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        debug!(path, "listing remote via rclone");

        let mut child = Command::new(&self.binary)
            .arg("lsjson")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RemoteError::Spawn {
                command: format!("{} lsjson {}", self.binary, path),
                source,
            })?;

        let output = match timeout(
            Duration::from_secs(self.timeout_secs),
            child.wait_with_output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(RemoteError::Spawn {
                    command: format!("{} lsjson {}", self.binary, path),
                    source,
                })
            }
            // kill_on_drop reaps the stuck process when the future drops.
            Err(_) => {
                return Err(RemoteError::Timeout {
                    path: path.to_string(),
                    seconds: self.timeout_secs,
                })
            }
        };

        if !output.status.success() {
            return Err(RemoteError::Failed {
                path: path.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|source| RemoteError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let lister = RcloneLister::new("definitely-not-a-real-binary", 5);
        let result = lister.list("remote:path").await;
        assert!(matches!(result, Err(RemoteError::Spawn { .. })));
    }

    #[test]
    fn test_name() {
        assert_eq!(RcloneLister::default().name(), "rclone");
    }
}
