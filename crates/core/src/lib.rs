//! # Study Storage Core
//!
//! Storage folder management for the research-study tracker.
//!
//! This crate maps the Program → Study → Assay hierarchy onto a directory tree under a single
//! storage root:
//!
//! ```text
//! <storage root>/
//! └── CPA - Cancer Program A/            # program: "<code> - <name>"
//!     └── CPA-10001 - Kinase Screen/     # study
//!         ├── protocol.pdf
//!         └── CPA-10001-001 - Western Blot/   # assay
//! ```
//!
//! - [`naming`]: canonical folder names
//! - [`resolver`]: locating folders through the ancestor chain
//! - [`folders`]: creating folders under the conflict policy
//! - [`descriptor`]: folder/file descriptors with external URLs
//! - [`StudyStorageService`]: the facade tying these together, plus file ingestion
//!
//! **No API concerns**: HTTP routing, authentication and persistence of the domain entities
//! belong to other layers.

pub mod chain;
pub mod config;
pub mod constants;
pub mod descriptor;
pub mod error;
pub mod folders;
mod ingest;
pub mod locks;
pub mod naming;
pub mod resolver;
pub mod service;

pub use config::{ConflictPolicy, StorageConfig};
pub use constants::DEFAULT_ROOT_URL_PREFIX;
pub use error::{StorageError, StorageResult, WriteAction};
pub use service::StudyStorageService;
pub use study_types::{
    Assay, CreateOutcome, CreatedFolder, EntityKind, NonEmptyText, Program, ResolvedFolder,
    StorageFile, StorageFolder, Study,
};
