//! Download-task submission to external backends.
//!
//! The matching core decides *what* to fetch; this module hands the
//! resulting magnet tasks to an external downloader with a fixed
//! concurrency bound and a per-task timeout, recording failures instead of
//! hanging or aborting the batch.

mod aria2;
mod submitter;
mod types;

pub use aria2::{Aria2Backend, Aria2Config};
pub use submitter::{DownloadSubmitter, SubmitSummary};
pub use types::{
    parse_task_list, render_failures, sanitize_name, DownloadBackend, DownloadError,
    DownloadTask, TaskFailure,
};
