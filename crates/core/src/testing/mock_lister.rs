//! Mock remote lister for testing.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::reconcile::RemoteEntry;
use crate::remote::{RemoteError, RemoteLister};

/// Mock implementation of [`RemoteLister`] serving preset listings.
#[derive(Default)]
pub struct MockLister {
    listings: HashMap<String, Vec<RemoteEntry>>,
}

impl MockLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `entries` for the exact path `path`.
    pub fn with_listing(mut self, path: &str, entries: Vec<RemoteEntry>) -> Self {
        self.listings.insert(path.to_string(), entries);
        self
    }
}

#[async_trait]
impl RemoteLister for MockLister {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        match self.listings.get(path) {
            Some(entries) => Ok(entries.clone()),
            None => Err(RemoteError::Failed {
                path: path.to_string(),
                status: "not found".to_string(),
                stderr: "no such path configured on mock".to_string(),
            }),
        }
    }
}
