//! Constants used throughout the study storage core.
//!
//! Naming, URL and environment constants live here so the layout of the storage tree is
//! defined in one place.

/// Default prefix for externally addressable URLs.
pub const DEFAULT_ROOT_URL_PREFIX: &str = "/static";

/// Separator between an entity's code and name in its canonical folder name.
pub const FOLDER_NAME_SEPARATOR: &str = " - ";

/// Replacement for characters that are unsafe in folder names.
pub const FOLDER_NAME_REPLACEMENT: char = '_';

/// Characters rejected by common host filesystems (path separators included).
pub const RESERVED_FOLDER_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Environment variable holding the storage root.
pub const ENV_STORAGE_ROOT: &str = "STUDY_STORAGE_ROOT";

/// Environment variable holding the URL prefix.
pub const ENV_URL_PREFIX: &str = "STUDY_STORAGE_URL_PREFIX";

/// Environment variable enabling reuse of existing folders.
pub const ENV_USE_EXISTING: &str = "STUDY_STORAGE_USE_EXISTING";

/// Environment variable enabling replacement of existing folders.
pub const ENV_OVERWRITE_EXISTING: &str = "STUDY_STORAGE_OVERWRITE_EXISTING";
