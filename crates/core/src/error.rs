use std::fmt;
use std::path::PathBuf;
use study_types::EntityKind;

/// Filesystem mutation attempted on a storage folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Delete,
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteAction::Create => f.write_str("create"),
            WriteAction::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The entity's folder, or the folder of one of its ancestors, is absent.
    #[error("{kind} folder not found for {code}: {}", .path.display())]
    NotFound {
        kind: EntityKind,
        code: String,
        path: PathBuf,
    },
    /// The creation target exists and the conflict policy forbids reuse and overwrite.
    #[error("{kind} folder already exists: {}", .path.display())]
    Duplicate { kind: EntityKind, path: PathBuf },
    #[error("failed to {action} {kind} folder {}: {source}", .path.display())]
    Write {
        kind: EntityKind,
        action: WriteAction,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file ingestion failed: {0}")]
    Files(#[from] study_files::FilesError),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A descriptor was requested for a path not below the canonical storage root. Service
    /// operations only build paths from the root, so this surfaces from direct
    /// [`DescriptorBuilder`](crate::descriptor::DescriptorBuilder) use.
    #[error("path is outside the storage root: {}", .0.display())]
    OutsideRoot(PathBuf),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StorageError {
    /// Returns `true` for [`StorageError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
