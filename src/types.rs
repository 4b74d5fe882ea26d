//! # Wire Types
//!
//! JSON shapes WebHDFS answers with: `FileStatuses` listings, `boolean`
//! results and `RemoteException` error bodies.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// One object returned by `LISTSTATUS`.
///
/// An empty `name` means the entry describes the queried path itself, which
/// happens when the listed path is a file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DirectoryEntry {
    #[serde(rename = "pathSuffix")]
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(default)]
    pub length: u64,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "modificationTime", default)]
    pub modification_time: i64,
    #[serde(rename = "accessTime", default)]
    pub access_time: Option<i64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub replication: Option<u32>,
    #[serde(rename = "blockSize", default)]
    pub block_size: Option<u64>,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Name to show for this entry when `queried` was the listed path.
    pub fn display_name(&self, queried: &str) -> String {
        if self.name.is_empty() {
            basename(queried).to_string()
        } else {
            self.name.clone()
        }
    }
}

/// Last `/`-separated segment of a remote path, ignoring trailing separators.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct ListStatusResponse {
    #[serde(rename = "FileStatuses", default)]
    pub file_statuses: FileStatuses,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileStatuses {
    #[serde(rename = "FileStatus", default)]
    pub file_status: Vec<DirectoryEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BooleanResponse {
    pub boolean: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteExceptionResponse {
    #[serde(rename = "RemoteException")]
    pub remote_exception: RemoteException,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteException {
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
