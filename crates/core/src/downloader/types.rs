//! Task types and the on-disk task-list format.
//!
//! Task lists are plain text: a `# <name>` header line followed by the
//! task's magnet line. The same format is used for the failure list, with
//! an extra `# reason:` line, so a failure file can be fed straight back
//! in as a retry list.

use async_trait::async_trait;
use thiserror::Error;

/// One download task: a magnet to hand to the external backend.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTask {
    /// Display name; becomes the target folder name.
    pub name: String,
    pub magnet: String,
}

/// A task the backend could not complete.
#[derive(Debug, Clone)]
pub struct TaskFailure {
    pub name: String,
    pub magnet: String,
    pub reason: String,
}

/// Errors from submitting one task to a download backend.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("task timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("backend exited with {status}")]
    Failed { status: String },
}

/// An external download backend that accepts one task at a time.
#[async_trait]
pub trait DownloadBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Submit a single task and wait for it to finish or fail.
    async fn submit(&self, task: &DownloadTask) -> Result<(), DownloadError>;
}

/// Parse a task list from its text format.
///
/// Lines starting with `# ` set the current task name (later `#` comment
/// lines such as failure reasons simply override it until the next magnet
/// line); `magnet:` lines emit a task under the most recent name. Anything
/// else is ignored.
pub fn parse_task_list(text: &str) -> Vec<DownloadTask> {
    let mut tasks = Vec::new();
    let mut current_name: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix("# ") {
            if !name.starts_with("reason:") {
                current_name = Some(name.to_string());
            }
        } else if line.starts_with("magnet:") {
            if let Some(name) = &current_name {
                tasks.push(DownloadTask {
                    name: name.clone(),
                    magnet: line.to_string(),
                });
            }
        }
    }
    tasks
}

/// Render a failure list in the task-list text format.
pub fn render_failures(failures: &[TaskFailure]) -> String {
    let mut out = String::new();
    for failure in failures {
        out.push_str(&format!(
            "# {}\n# reason: {}\n{}\n\n",
            failure.name, failure.reason, failure.magnet
        ));
    }
    out
}

/// Replace characters that are not legal in folder names.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}
