//! Bounded concurrent task submission.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use super::types::{DownloadBackend, DownloadTask, TaskFailure};

/// Summary of one submission batch.
#[derive(Debug, Default)]
pub struct SubmitSummary {
    /// Tasks that completed successfully.
    pub succeeded: usize,
    /// Failures in task-list order.
    pub failures: Vec<TaskFailure>,
}

/// Submits tasks to a [`DownloadBackend`] with a fixed concurrency bound.
///
/// Each task is independently time-boxed by the backend; a failed or
/// timed-out task is recorded and never aborts the batch.
pub struct DownloadSubmitter<B> {
    backend: Arc<B>,
    max_concurrent: usize,
}

impl<B: DownloadBackend> DownloadSubmitter<B> {
    pub fn new(backend: B, max_concurrent: usize) -> Self {
        Self {
            backend: Arc::new(backend),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Submit every task, at most `max_concurrent` in flight at a time.
    pub async fn submit_all(&self, tasks: &[DownloadTask]) -> SubmitSummary {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let total = tasks.len();

        let results = join_all(tasks.iter().enumerate().map(|(index, task)| {
            let backend = Arc::clone(&self.backend);
            let semaphore = Arc::clone(&semaphore);
            async move {
                // The semaphore is never closed, so acquire cannot fail.
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                info!(
                    task = %task.name,
                    backend = backend.name(),
                    "submitting ({}/{})",
                    index + 1,
                    total
                );
                match backend.submit(task).await {
                    Ok(()) => {
                        info!(task = %task.name, "completed");
                        None
                    }
                    Err(e) => {
                        warn!(task = %task.name, error = %e, "failed");
                        Some(TaskFailure {
                            name: task.name.clone(),
                            magnet: task.magnet.clone(),
                            reason: e.to_string(),
                        })
                    }
                }
            }
        }))
        .await;

        let failures: Vec<TaskFailure> = results.into_iter().flatten().collect();
        SubmitSummary {
            succeeded: total - failures.len(),
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDownloadBackend;
    use std::time::Duration;

    fn task(name: &str) -> DownloadTask {
        DownloadTask {
            name: name.to_string(),
            magnet: format!("magnet:?xt=urn:btih:{name}"),
        }
    }

    #[tokio::test]
    async fn test_all_tasks_complete() {
        let backend = MockDownloadBackend::new();
        let submitter = DownloadSubmitter::new(backend, 3);
        let tasks: Vec<DownloadTask> = (0..6).map(|i| task(&format!("t{i}"))).collect();

        let summary = submitter.submit_all(&tasks).await;
        assert_eq!(summary.succeeded, 6);
        assert!(summary.failures.is_empty());
    }

    #[tokio::test]
    async fn test_concurrency_bound_is_respected() {
        let backend = MockDownloadBackend::new().with_delay(Duration::from_millis(30));
        let peak = backend.peak_in_flight_handle();
        let submitter = DownloadSubmitter::new(backend, 3);
        let tasks: Vec<DownloadTask> = (0..9).map(|i| task(&format!("t{i}"))).collect();

        submitter.submit_all(&tasks).await;
        let peak = peak.load(std::sync::atomic::Ordering::SeqCst);
        assert!(peak <= 3, "peak concurrency was {peak}");
        assert!(peak >= 1);
    }

    #[tokio::test]
    async fn test_failures_recorded_in_order_without_aborting() {
        let backend = MockDownloadBackend::new().failing_on(&["t1", "t3"]);
        let submitter = DownloadSubmitter::new(backend, 2);
        let tasks: Vec<DownloadTask> = (0..5).map(|i| task(&format!("t{i}"))).collect();

        let summary = submitter.submit_all(&tasks).await;
        assert_eq!(summary.succeeded, 3);
        let failed: Vec<&str> = summary.failures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(failed, vec!["t1", "t3"]);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let backend = MockDownloadBackend::new();
        let submitter = DownloadSubmitter::new(backend, 0);
        let summary = submitter.submit_all(&[task("only")]).await;
        assert_eq!(summary.succeeded, 1);
    }
}
