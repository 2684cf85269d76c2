//! Storage descriptors.
//!
//! Descriptors are live snapshots of the filesystem, built fresh on every call and never
//! persisted. For every descriptor, `url` is the configured URL prefix followed by the path
//! relative to the storage root, joined with `/`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file inside the storage tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFile {
    pub name: String,
    pub absolute_path: PathBuf,
    pub url: String,
}

/// A folder inside the storage tree, without any enumeration of its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFolder {
    pub name: String,
    pub absolute_path: PathBuf,
    pub url: String,
}

/// A folder together with a depth-1 listing of its contents.
///
/// `files` and `sub_folders` are sorted by name. Sub folders are shallow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFolder {
    pub name: String,
    pub absolute_path: PathBuf,
    pub url: String,
    pub files: Vec<StorageFile>,
    pub sub_folders: Vec<StorageFolder>,
}

impl ResolvedFolder {
    /// Returns `true` when the folder had no files and no sub folders.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.sub_folders.is_empty()
    }
}

/// Which branch of the conflict policy a folder creation went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateOutcome {
    /// The directory did not exist and was created.
    Created,
    /// The directory already existed and was left as is.
    Reused,
    /// The directory already existed, was removed and created again.
    Replaced,
}

/// Result of a folder creation. Never carries a listing of the folder's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedFolder {
    pub folder: StorageFolder,
    pub outcome: CreateOutcome,
}
