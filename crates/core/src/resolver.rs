//! Folder resolution.
//!
//! [`PathResolver`] walks an [`AncestorChain`] from the storage root downwards. Each level
//! must already exist as a directory; the walk stops at the first level that does not and
//! reports that level's entity. Resolution never touches the filesystem beyond reading it.

use crate::chain::{AncestorChain, ChainLink};
use crate::config::StorageConfig;
use crate::descriptor::DescriptorBuilder;
use crate::{StorageError, StorageResult};
use std::path::PathBuf;
use study_types::{Assay, Program, ResolvedFolder, Study};

#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    config: &'a StorageConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(config: &'a StorageConfig) -> Self {
        Self { config }
    }

    /// Locates the directory at the end of `links`, starting from the storage root.
    ///
    /// An empty iterator yields the storage root itself.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for the first link whose directory is absent.
    pub fn locate<'l>(
        &self,
        links: impl IntoIterator<Item = &'l ChainLink>,
    ) -> StorageResult<PathBuf> {
        links
            .into_iter()
            .try_fold(self.config.root_path().to_path_buf(), |parent, link| {
                let path = parent.join(&link.folder_name);
                tracing::debug!("locating {} folder {}", link.kind, path.display());
                if path.is_dir() {
                    Ok(path)
                } else {
                    Err(StorageError::NotFound {
                        kind: link.kind,
                        code: link.code.clone(),
                        path,
                    })
                }
            })
    }

    /// Locates the folder of the chain's target entity.
    pub fn locate_chain(&self, chain: &AncestorChain) -> StorageResult<PathBuf> {
        self.locate(chain.links())
    }

    /// Locates the folder that will contain the chain's target entity.
    pub fn locate_parent(&self, chain: &AncestorChain) -> StorageResult<PathBuf> {
        self.locate(chain.ancestors())
    }

    pub fn resolve(&self, chain: &AncestorChain) -> StorageResult<ResolvedFolder> {
        let path = self.locate_chain(chain)?;
        DescriptorBuilder::new(self.config).resolved_folder(&path)
    }

    pub fn resolve_program_folder(&self, program: &Program) -> StorageResult<ResolvedFolder> {
        self.resolve(&AncestorChain::for_program(program))
    }

    pub fn resolve_study_folder(&self, study: &Study) -> StorageResult<ResolvedFolder> {
        self.resolve(&AncestorChain::for_study(study))
    }

    pub fn resolve_assay_folder(&self, assay: &Assay) -> StorageResult<ResolvedFolder> {
        self.resolve(&AncestorChain::for_assay(assay))
    }
}
