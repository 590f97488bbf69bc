//! Mock implementations for testing.
//!
//! Shared by the crate's own unit tests and the integration tests under
//! `tests/`, so the download and listing seams can be exercised without
//! real infrastructure.

mod mock_backend;
mod mock_lister;

pub use mock_backend::MockDownloadBackend;
pub use mock_lister::MockLister;
