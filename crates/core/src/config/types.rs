use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::downloader::Aria2Config;
use crate::reconcile::RemoteSpec;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    /// Configured storage remotes, in priority order.
    #[serde(default)]
    pub remotes: Vec<RemoteSpec>,
    #[serde(default)]
    pub downloader: DownloaderConfig,
}

impl Config {
    /// Find a configured remote by id.
    pub fn remote(&self, id: &str) -> Option<&RemoteSpec> {
        self.remotes.iter().find(|r| r.id == id)
    }
}

/// Locations of the flat-file data artifacts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Directory all data files live under.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,
    #[serde(default = "default_search_results_file")]
    pub search_results_file: String,
    #[serde(default = "default_mapping_file")]
    pub mapping_file: String,
    #[serde(default = "default_issues_file")]
    pub issues_file: String,
    #[serde(default = "default_report_file")]
    pub report_file: String,
    #[serde(default = "default_task_file")]
    pub task_file: String,
    #[serde(default = "default_failed_file")]
    pub failed_file: String,
}

impl DataConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.dir.join(&self.catalog_file)
    }

    pub fn search_results_path(&self) -> PathBuf {
        self.dir.join(&self.search_results_file)
    }

    pub fn mapping_path(&self) -> PathBuf {
        self.dir.join(&self.mapping_file)
    }

    /// Mapping file for a mapping set adopted onto another remote.
    pub fn mapping_path_for(&self, remote_id: &str) -> PathBuf {
        let name = match self.mapping_file.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}_{remote_id}.{ext}"),
            None => format!("{}_{remote_id}", self.mapping_file),
        };
        self.dir.join(name)
    }

    pub fn issues_path(&self) -> PathBuf {
        self.dir.join(&self.issues_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(&self.report_file)
    }

    pub fn task_path(&self) -> PathBuf {
        self.dir.join(&self.task_file)
    }

    pub fn failed_path(&self) -> PathBuf {
        self.dir.join(&self.failed_file)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            catalog_file: default_catalog_file(),
            search_results_file: default_search_results_file(),
            mapping_file: default_mapping_file(),
            issues_file: default_issues_file(),
            report_file: default_report_file(),
            task_file: default_task_file(),
            failed_file: default_failed_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_catalog_file() -> String {
    "anime_db.json".to_string()
}

fn default_search_results_file() -> String {
    "search_results.json".to_string()
}

fn default_mapping_file() -> String {
    "anime_mapping.json".to_string()
}

fn default_issues_file() -> String {
    "verify_issues.json".to_string()
}

fn default_report_file() -> String {
    "verify_report.txt".to_string()
}

fn default_task_file() -> String {
    "download_tasks.txt".to_string()
}

fn default_failed_file() -> String {
    "download_failed.txt".to_string()
}

/// Download submission configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloaderConfig {
    /// Simultaneous submissions.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Per-task wall-clock budget in seconds; the external process is
    /// killed when exceeded.
    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,
    #[serde(default)]
    pub aria2: Aria2Config,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            task_timeout_secs: default_task_timeout_secs(),
            aria2: Aria2Config::default(),
        }
    }
}

fn default_max_concurrent() -> usize {
    3
}

fn default_task_timeout_secs() -> u64 {
    300
}
