//! Study storage service.
//!
//! [`StudyStorageService`] is the entry point for callers. It owns the startup configuration
//! and the path lock table and delegates to the resolver, the folder lifecycle manager and
//! file ingestion.

use crate::chain::AncestorChain;
use crate::config::StorageConfig;
use crate::descriptor::DescriptorBuilder;
use crate::folders::FolderLifecycleManager;
use crate::ingest::save_file;
use crate::locks::PathLocks;
use crate::resolver::PathResolver;
use crate::StorageResult;
use std::path::Path;
use std::sync::Arc;
use study_types::{Assay, CreatedFolder, Program, ResolvedFolder, StorageFile, Study};

/// Folder management for the Program → Study → Assay storage tree.
///
/// Clones share the configuration and the lock table, so a single service can be handed to
/// many threads.
#[derive(Clone, Debug)]
pub struct StudyStorageService {
    cfg: Arc<StorageConfig>,
    locks: Arc<PathLocks>,
}

impl StudyStorageService {
    /// Creates a new instance of StudyStorageService.
    pub fn new(cfg: Arc<StorageConfig>) -> Self {
        Self {
            cfg,
            locks: Arc::new(PathLocks::new()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.cfg
    }

    fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(&self.cfg)
    }

    fn folders(&self) -> FolderLifecycleManager<'_> {
        FolderLifecycleManager::new(&self.cfg, &self.locks)
    }

    /// Lists the storage root (the program folders and any loose files).
    pub fn root_folder(&self) -> StorageResult<ResolvedFolder> {
        DescriptorBuilder::new(&self.cfg).resolved_folder(self.cfg.root_path())
    }

    /// Resolves a program's folder with a depth-1 listing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` naming the program if its folder is absent.
    pub fn resolve_program_folder(&self, program: &Program) -> StorageResult<ResolvedFolder> {
        tracing::info!("fetching storage folder for program: {}", program.code);
        self.resolver().resolve_program_folder(program)
    }

    /// Resolves a study's folder with a depth-1 listing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` naming the program when the program folder is absent,
    /// otherwise naming the study.
    pub fn resolve_study_folder(&self, study: &Study) -> StorageResult<ResolvedFolder> {
        tracing::info!("fetching storage folder for study: {}", study.code);
        self.resolver().resolve_study_folder(study)
    }

    /// Resolves an assay's folder with a depth-1 listing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` naming the outermost absent level.
    pub fn resolve_assay_folder(&self, assay: &Assay) -> StorageResult<ResolvedFolder> {
        tracing::info!("fetching storage folder for assay: {}", assay.code);
        self.resolver().resolve_assay_folder(assay)
    }

    /// Creates a program's folder directly under the storage root.
    pub fn create_program_folder(&self, program: &Program) -> StorageResult<CreatedFolder> {
        tracing::info!("creating storage folder for program: {}", program.code);
        self.folders().create_program_folder(program)
    }

    /// Creates a study's folder inside its (existing) program folder.
    pub fn create_study_folder(&self, study: &Study) -> StorageResult<CreatedFolder> {
        tracing::info!("creating storage folder for study: {}", study.code);
        self.folders().create_study_folder(study)
    }

    /// Creates an assay's folder inside its (existing) study folder.
    pub fn create_assay_folder(&self, assay: &Assay) -> StorageResult<CreatedFolder> {
        tracing::info!("creating storage folder for assay: {}", assay.code);
        self.folders().create_assay_folder(assay)
    }

    /// Copies `source` into the study's folder under its own base name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if:
    /// - the study folder or an ancestor is absent (`NotFound`),
    /// - the source is unusable or the copy fails (`Files`).
    pub fn save_study_file(&self, source: &Path, study: &Study) -> StorageResult<StorageFile> {
        tracing::info!(
            "saving file {} to storage folder for study {}",
            source.display(),
            study.code
        );
        save_file(&self.cfg, &self.locks, source, &AncestorChain::for_study(study))
    }

    /// Copies `source` into the assay's folder under its own base name.
    pub fn save_assay_file(&self, source: &Path, assay: &Assay) -> StorageResult<StorageFile> {
        tracing::info!(
            "saving file {} to storage folder for assay {}",
            source.display(),
            assay.code
        );
        save_file(&self.cfg, &self.locks, source, &AncestorChain::for_assay(assay))
    }
}
