//! aria2-based download backend.
//!
//! Each task is one `aria2c` invocation downloading into a folder named
//! after the task. The invocation is tuned for unattended batch use: no
//! seeding, stall detection, bounded tracker timeouts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::types::{sanitize_name, DownloadBackend, DownloadError, DownloadTask};

/// Configuration for the aria2 backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aria2Config {
    /// aria2c binary to invoke.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Directory download folders are created under.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Proxy for both tracker and peer traffic, if any.
    #[serde(default)]
    pub proxy: Option<String>,
    /// Seconds without progress before aria2 gives up on a torrent.
    #[serde(default = "default_stall_secs")]
    pub stall_secs: u32,
    /// Extra arguments appended verbatim.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_binary() -> String {
    "aria2c".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_stall_secs() -> u32 {
    180
}

impl Default for Aria2Config {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            download_dir: default_download_dir(),
            proxy: None,
            stall_secs: default_stall_secs(),
            extra_args: Vec::new(),
        }
    }
}

/// Download backend that spawns one aria2c process per task.
pub struct Aria2Backend {
    config: Aria2Config,
    /// Per-task wall-clock budget; the process is killed when exceeded.
    task_timeout: Duration,
}

impl Aria2Backend {
    pub fn new(config: Aria2Config, task_timeout: Duration) -> Self {
        Self {
            config,
            task_timeout,
        }
    }

    fn build_args(&self, task: &DownloadTask, dir: &PathBuf) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(proxy) = &self.config.proxy {
            args.push(format!("--all-proxy={proxy}"));
        }
        args.push(format!("--dir={}", dir.display()));
        args.push("--seed-time=0".to_string());
        args.push(format!("--bt-stop-timeout={}", self.config.stall_secs));
        args.push("--bt-tracker-connect-timeout=10".to_string());
        args.push("--bt-tracker-timeout=10".to_string());
        args.push("--max-tries=3".to_string());
        args.push("--retry-wait=5".to_string());
        args.push("--timeout=60".to_string());
        args.push("--connect-timeout=30".to_string());
        args.push("--follow-torrent=mem".to_string());
        args.extend(self.config.extra_args.iter().cloned());
        args.push(task.magnet.clone());
        args
    }
}

#[async_trait]
impl DownloadBackend for Aria2Backend {
    fn name(&self) -> &str {
        "aria2"
    }

    async fn submit(&self, task: &DownloadTask) -> Result<(), DownloadError> {
        let dir = self.config.download_dir.join(sanitize_name(&task.name));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| DownloadError::Spawn {
                command: format!("mkdir {}", dir.display()),
                source,
            })?;

        let args = self.build_args(task, &dir);
        debug!(task = %task.name, "spawning aria2c");

        let child = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DownloadError::Spawn {
                command: self.config.binary.clone(),
                source,
            })?;

        match timeout(self.task_timeout, child.wait_with_output()).await {
            Ok(Ok(output)) if output.status.success() => Ok(()),
            Ok(Ok(output)) => Err(DownloadError::Failed {
                status: output.status.to_string(),
            }),
            Ok(Err(source)) => Err(DownloadError::Spawn {
                command: self.config.binary.clone(),
                source,
            }),
            // Dropping the future kills the stuck process (kill_on_drop).
            Err(_) => Err(DownloadError::Timeout {
                seconds: self.task_timeout.as_secs(),
            }),
        }
    }
}
