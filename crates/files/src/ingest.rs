//! Directory-scoped file ingestion.
//!
//! [`FileIngestor`] is bound to one destination directory. Construction validates the
//! directory; [`FileIngestor::ingest`] copies a source file into it under the source's own
//! base name.

use crate::FilesError;
use std::fs;
use std::path::{Path, PathBuf};
use study_types::NonEmptyText;

/// A file that has been copied into a destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedFile {
    /// Base name shared by the source and the stored copy
    pub file_name: NonEmptyText,

    /// Absolute path of the stored copy
    pub path: PathBuf,

    /// Number of bytes copied
    pub size_bytes: u64,
}

/// Copies files into a single destination directory.
#[derive(Debug)]
pub struct FileIngestor {
    destination: PathBuf,
}

impl FileIngestor {
    /// Creates a new `FileIngestor` for an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::DirectoryNotFound` if `destination` does not exist or is not a
    /// directory.
    pub fn new(destination: &Path) -> Result<Self, FilesError> {
        if !destination.is_dir() {
            return Err(FilesError::DirectoryNotFound(format!(
                "{} does not exist or is not a directory",
                destination.display()
            )));
        }

        Ok(Self {
            destination: destination.to_path_buf(),
        })
    }

    /// Returns the path a source file would be stored at, without copying anything.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidSource` if the source has no usable base name.
    pub fn target_path(&self, source_path: &Path) -> Result<PathBuf, FilesError> {
        let file_name = source_file_name(source_path)?;
        Ok(self.destination.join(file_name.as_str()))
    }

    /// Copies `source_path` into the destination directory.
    ///
    /// An existing file with the same name is overwritten byte for byte.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - the source is missing, is not a regular file, or has no base name (`InvalidSource`)
    /// - the source already is the stored file (`InvalidSource`)
    /// - the copy fails (`Io`, with the path and original error kind preserved)
    pub fn ingest(&self, source_path: &Path) -> Result<IngestedFile, FilesError> {
        let file_name = source_file_name(source_path)?;

        if !source_path.is_file() {
            return Err(FilesError::InvalidSource(format!(
                "{} does not exist or is not a regular file",
                source_path.display()
            )));
        }

        let path = self.destination.join(file_name.as_str());

        // fs::copy truncates the target before reading the source
        if is_same_file(source_path, &path)? {
            return Err(FilesError::InvalidSource(format!(
                "{} is already stored at {}",
                source_path.display(),
                path.display()
            )));
        }

        let size_bytes = fs::copy(source_path, &path).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to copy {} to {}: {}",
                    source_path.display(),
                    path.display(),
                    e
                ),
            ))
        })?;

        Ok(IngestedFile {
            file_name,
            path,
            size_bytes,
        })
    }
}

fn is_same_file(source_path: &Path, target: &Path) -> Result<bool, FilesError> {
    if !target.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(source_path)? == fs::canonicalize(target)?)
}

/// Extracts the base name of a source file.
///
/// # Errors
///
/// Returns `FilesError::InvalidSource` when the path ends in `..`, is a root, or its base
/// name is not valid UTF-8 or is blank.
pub fn source_file_name(source_path: &Path) -> Result<NonEmptyText, FilesError> {
    let raw = source_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            FilesError::InvalidSource(format!(
                "{} has no usable file name",
                source_path.display()
            ))
        })?;

    NonEmptyText::new(raw).map_err(|_| {
        FilesError::InvalidSource(format!("{} has a blank file name", source_path.display()))
    })
}
