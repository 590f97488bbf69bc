//! Mock download backend for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::downloader::{DownloadBackend, DownloadError, DownloadTask};

/// Mock implementation of [`DownloadBackend`].
///
/// Records submissions, tracks peak in-flight concurrency, and fails on
/// configured task names.
pub struct MockDownloadBackend {
    delay: Duration,
    fail_names: HashSet<String>,
    submitted: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockDownloadBackend {
    pub fn new() -> Self {
        Self {
            delay: Duration::ZERO,
            fail_names: HashSet::new(),
            submitted: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Hold each submission open for `delay` so concurrency is observable.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail submissions whose task name is in `names`.
    pub fn failing_on(mut self, names: &[&str]) -> Self {
        self.fail_names = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Handle to the peak-concurrency counter, usable after the backend is
    /// moved into a submitter.
    pub fn peak_in_flight_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.peak_in_flight)
    }

    /// Names submitted so far, in completion order.
    pub async fn submitted(&self) -> Vec<String> {
        self.submitted.lock().await.clone()
    }
}

impl Default for MockDownloadBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DownloadBackend for MockDownloadBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit(&self, task: &DownloadTask) -> Result<(), DownloadError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.submitted.lock().await.push(task.name.clone());

        if self.fail_names.contains(&task.name) {
            return Err(DownloadError::Failed {
                status: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}
