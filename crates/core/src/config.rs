//! Storage runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! [`crate::StudyStorageService`]. Nothing in this crate reads environment variables; the
//! helpers below take the raw values (`Option<String>`) so binaries decide where they come from.

use crate::constants::{DEFAULT_ROOT_URL_PREFIX, ENV_OVERWRITE_EXISTING, ENV_USE_EXISTING};
use crate::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What folder creation does when the target directory already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPolicy {
    pub use_existing: bool,
    pub overwrite_existing: bool,
}

/// The branch of [`ConflictPolicy`] applied to an existing target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExistingFolderAction {
    Reuse,
    Replace,
    Reject,
}

impl ConflictPolicy {
    pub fn new(use_existing: bool, overwrite_existing: bool) -> Self {
        Self {
            use_existing,
            overwrite_existing,
        }
    }

    /// `use_existing` is checked first; when both flags are set, overwrite is never reached.
    pub fn existing_action(&self) -> ExistingFolderAction {
        if self.use_existing {
            ExistingFolderAction::Reuse
        } else if self.overwrite_existing {
            ExistingFolderAction::Replace
        } else {
            ExistingFolderAction::Reject
        }
    }
}

/// Storage configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    root_path: PathBuf,
    root_url_prefix: String,
    policy: ConflictPolicy,
}

impl StorageConfig {
    /// Create a new `StorageConfig`.
    ///
    /// The root path is canonicalised so that every path handed out by the service shares
    /// one prefix. Trailing `/` characters are stripped from the URL prefix.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidConfig` if:
    /// - `root_path` is not absolute,
    /// - `root_path` does not exist or is not a directory,
    /// - canonicalisation fails.
    pub fn new(
        root_path: PathBuf,
        root_url_prefix: impl AsRef<str>,
        policy: ConflictPolicy,
    ) -> StorageResult<Self> {
        if !root_path.is_absolute() {
            return Err(StorageError::InvalidConfig(format!(
                "storage root must be an absolute path: {}",
                root_path.display()
            )));
        }

        if !root_path.is_dir() {
            return Err(StorageError::InvalidConfig(format!(
                "storage root does not exist or is not a directory: {}",
                root_path.display()
            )));
        }

        let root_path = root_path.canonicalize().map_err(|e| {
            StorageError::InvalidConfig(format!(
                "cannot canonicalise storage root {}: {}",
                root_path.display(),
                e
            ))
        })?;

        Ok(Self {
            root_path,
            root_url_prefix: normalise_url_prefix(root_url_prefix.as_ref()),
            policy,
        })
    }

    /// Create a `StorageConfig` with the default URL prefix and conflict policy.
    pub fn with_defaults(root_path: PathBuf) -> StorageResult<Self> {
        Self::new(root_path, DEFAULT_ROOT_URL_PREFIX, ConflictPolicy::default())
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn root_url_prefix(&self) -> &str {
        &self.root_url_prefix
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }
}

fn normalise_url_prefix(prefix: &str) -> String {
    prefix.trim().trim_end_matches('/').to_string()
}

/// Resolve the URL prefix from an optional raw value.
///
/// `None` or blank values fall back to [`DEFAULT_ROOT_URL_PREFIX`].
pub fn url_prefix_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ROOT_URL_PREFIX.to_string())
}

/// Parse a boolean flag from an optional raw value.
///
/// Accepts `true/false`, `1/0`, `yes/no` and `on/off` in any case. `None` or blank values
/// yield `Ok(None)`.
///
/// # Errors
///
/// Returns `StorageError::InvalidConfig` naming `name` for any other value.
pub fn flag_from_env_value(name: &str, value: Option<String>) -> StorageResult<Option<bool>> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(None),
        Some("true" | "1" | "yes" | "on") => Ok(Some(true)),
        Some("false" | "0" | "no" | "off") => Ok(Some(false)),
        Some(other) => Err(StorageError::InvalidConfig(format!(
            "{name} must be a boolean, got {other:?}"
        ))),
    }
}

/// Build a [`ConflictPolicy`] from the raw `use_existing` and `overwrite_existing` values.
///
/// Missing values default to `false`.
pub fn policy_from_env_values(
    use_existing: Option<String>,
    overwrite_existing: Option<String>,
) -> StorageResult<ConflictPolicy> {
    let use_existing = flag_from_env_value(ENV_USE_EXISTING, use_existing)?.unwrap_or(false);
    let overwrite_existing =
        flag_from_env_value(ENV_OVERWRITE_EXISTING, overwrite_existing)?.unwrap_or(false);

    Ok(ConflictPolicy::new(use_existing, overwrite_existing))
}
