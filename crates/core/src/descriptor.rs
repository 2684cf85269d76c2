//! Descriptor construction.
//!
//! [`DescriptorBuilder`] turns absolute paths under the storage root into
//! [`StorageFolder`], [`ResolvedFolder`] and [`StorageFile`] values. URLs are the configured
//! prefix followed by the root-relative path, always joined with `/` whatever the host
//! separator is.

use crate::config::StorageConfig;
use crate::{StorageError, StorageResult};
use std::fs;
use std::path::Path;
use study_types::{ResolvedFolder, StorageFile, StorageFolder};

#[derive(Debug, Clone, Copy)]
pub struct DescriptorBuilder<'a> {
    config: &'a StorageConfig,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(config: &'a StorageConfig) -> Self {
        Self { config }
    }

    /// Computes the externally addressable URL of a path under the storage root.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::OutsideRoot` if `path` is not below the storage root.
    pub fn url_for(&self, path: &Path) -> StorageResult<String> {
        let relative = path
            .strip_prefix(self.config.root_path())
            .map_err(|_| StorageError::OutsideRoot(path.to_path_buf()))?;

        let mut url = self.config.root_url_prefix().to_string();
        for component in relative.components() {
            url.push('/');
            url.push_str(&component.as_os_str().to_string_lossy());
        }
        if url.is_empty() {
            url.push('/');
        }
        Ok(url)
    }

    pub fn file(&self, path: &Path) -> StorageResult<StorageFile> {
        Ok(StorageFile {
            name: entry_name(path),
            absolute_path: path.to_path_buf(),
            url: self.url_for(path)?,
        })
    }

    /// Shallow descriptor; the folder's contents are not read.
    pub fn folder(&self, path: &Path) -> StorageResult<StorageFolder> {
        Ok(StorageFolder {
            name: entry_name(path),
            absolute_path: path.to_path_buf(),
            url: self.url_for(path)?,
        })
    }

    /// Descriptor with a depth-1 listing of regular files and sub folders.
    ///
    /// Entries are sorted by name. Symlinks are classified by their target; dangling links and
    /// special files are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be read.
    pub fn resolved_folder(&self, path: &Path) -> StorageResult<ResolvedFolder> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        let mut sub_folders = Vec::new();

        for entry in fs::read_dir(path).map_err(io_err)? {
            let entry_path = entry.map_err(io_err)?.path();

            let metadata = match fs::metadata(&entry_path) {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry {}: {}", entry_path.display(), e);
                    continue;
                }
            };

            if metadata.is_file() {
                files.push(self.file(&entry_path)?);
            } else if metadata.is_dir() {
                sub_folders.push(self.folder(&entry_path)?);
            }
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        sub_folders.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(ResolvedFolder {
            name: entry_name(path),
            absolute_path: path.to_path_buf(),
            url: self.url_for(path)?,
            files,
            sub_folders,
        })
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
