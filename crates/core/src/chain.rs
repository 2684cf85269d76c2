//! Ancestor chains.
//!
//! An [`AncestorChain`] lists the folders leading to an entity, outermost first:
//! program, then study, then assay. It contains **no I/O logic**; resolving a chain against the
//! filesystem is the job of [`crate::resolver::PathResolver`].

use crate::naming::{assay_folder_name, program_folder_name, study_folder_name};
use std::path::PathBuf;
use study_types::{Assay, EntityKind, Program, Study};

/// One level of the storage hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    pub kind: EntityKind,
    pub code: String,
    pub folder_name: String,
}

impl ChainLink {
    fn program(program: &Program) -> Self {
        Self {
            kind: EntityKind::Program,
            code: program.code.to_string(),
            folder_name: program_folder_name(program),
        }
    }

    fn study(study: &Study) -> Self {
        Self {
            kind: EntityKind::Study,
            code: study.code.to_string(),
            folder_name: study_folder_name(study),
        }
    }

    fn assay(assay: &Assay) -> Self {
        Self {
            kind: EntityKind::Assay,
            code: assay.code.to_string(),
            folder_name: assay_folder_name(assay),
        }
    }
}

/// The ordered folders from the storage root down to a target entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorChain {
    ancestors: Vec<ChainLink>,
    target: ChainLink,
}

impl AncestorChain {
    pub fn for_program(program: &Program) -> Self {
        Self {
            ancestors: Vec::new(),
            target: ChainLink::program(program),
        }
    }

    pub fn for_study(study: &Study) -> Self {
        Self::for_program(&study.program).descend(ChainLink::study(study))
    }

    pub fn for_assay(assay: &Assay) -> Self {
        Self::for_study(&assay.study).descend(ChainLink::assay(assay))
    }

    fn descend(mut self, link: ChainLink) -> Self {
        self.ancestors.push(self.target);
        self.target = link;
        self
    }

    /// Links above the target, outermost first. Empty for a program.
    pub fn ancestors(&self) -> &[ChainLink] {
        &self.ancestors
    }

    pub fn target(&self) -> &ChainLink {
        &self.target
    }

    /// All links including the target, outermost first.
    pub fn links(&self) -> impl Iterator<Item = &ChainLink> {
        self.ancestors.iter().chain(std::iter::once(&self.target))
    }

    /// Path of the target folder relative to the storage root.
    pub fn relative_path(&self) -> PathBuf {
        self.links().map(|link| link.folder_name.as_str()).collect()
    }
}
