//! Types for the durable catalog-to-folder mapping and remote listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable link between a catalog entry and its storage folder.
///
/// `anime_name` is the catalog display key (`"<name> (<year>)"`);
/// `folder_path` is `"<remote-id>:<relative path>"`. The mapping set is
/// rewritten whole-file; there is no partial update on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderMapping {
    pub anime_name: String,
    pub folder_name: String,
    pub folder_path: String,
    /// Provider-issued stable folder identifier; survives renames. Empty
    /// when the provider does not issue one.
    #[serde(default)]
    pub file_id: String,
    /// Enumerated episode file names, sorted. Filled by the episode scan.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<String>,
}

/// One entry of a storage listing, in the shape `rclone lsjson` emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IsDir", default)]
    pub is_dir: bool,
    /// Stable identifier; not every provider issues one.
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "ModTime", default)]
    pub mod_time: Option<DateTime<Utc>>,
}

impl RemoteEntry {
    pub fn dir(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            is_dir: true,
            id: id.to_string(),
            mod_time: None,
        }
    }

    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_dir: false,
            id: String::new(),
            mod_time: None,
        }
    }
}

/// A configured storage remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSpec {
    /// Remote identifier, e.g. `pikpak` or `onedrive`.
    pub id: String,
    /// Root folder on the remote under which library folders live; may be
    /// empty when folders sit at the remote root.
    #[serde(default)]
    pub root: String,
}

impl RemoteSpec {
    pub fn new(id: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
        }
    }

    /// Path prefix identifying this remote in `folder_path` values.
    pub fn prefix(&self) -> String {
        format!("{}:", self.id)
    }

    /// Full `folder_path` value for a folder name on this remote.
    pub fn folder_path(&self, folder_name: &str) -> String {
        if self.root.is_empty() {
            format!("{}:{}", self.id, folder_name)
        } else {
            format!("{}:{}/{}", self.id, self.root, folder_name)
        }
    }

    /// The rclone-style path of the library root (`"<id>:<root>"`).
    pub fn root_path(&self) -> String {
        format!("{}:{}", self.id, self.root)
    }
}

/// Outcome of reconciling one mapping against one remote listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// The stored mapping already matches the listing.
    Unchanged,
    /// The mapping was corrected; persist the replacement.
    Updated(FolderMapping),
    /// No confident match; surfaced for manual review, never guessed.
    Unresolved { reason: String },
}
