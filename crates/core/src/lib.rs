pub mod catalog;
pub mod config;
pub mod downloader;
pub mod matching;
pub mod reconcile;
pub mod remote;
pub mod store;
pub mod testing;
pub mod verify;

pub use catalog::{CatalogEntry, SearchHit, SearchIndex};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DataConfig,
    DownloaderConfig,
};
pub use downloader::{
    parse_task_list, render_failures, Aria2Backend, Aria2Config, DownloadBackend, DownloadError,
    DownloadSubmitter, DownloadTask, SubmitSummary, TaskFailure,
};
pub use matching::{
    comparison_key, extract_season, score_title, select_best, strict_key, title_matches,
    CandidateTitle,
};
pub use reconcile::{
    episode_files, match_into_remote, reconcile_mapping, FolderMapping, ReconcileOutcome,
    RemoteEntry, RemoteSpec,
};
pub use remote::{RcloneLister, RemoteError, RemoteLister};
pub use store::{load_json_array, save_json_array, save_text, StoreError};
pub use verify::{
    classify_entry, render_report, run_verification, VerificationReport, Verdict, VerifyRecord,
};
