//! Domain entities consumed by the storage core.
//!
//! These are owned by the domain layer. The storage core only reads `code`, `name` and the
//! parent reference of each entity; it never mutates or persists them.

use crate::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three levels of the storage hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Program,
    Study,
    Assay,
}

impl EntityKind {
    /// Lowercase label used in log lines and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Program => "program",
            EntityKind::Study => "study",
            EntityKind::Assay => "assay",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A research program; the top level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub code: NonEmptyText,
    pub name: NonEmptyText,
}

impl Program {
    pub fn new(code: NonEmptyText, name: NonEmptyText) -> Self {
        Self { code, name }
    }
}

/// A study, owned by a [`Program`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    pub code: NonEmptyText,
    pub name: NonEmptyText,
    pub program: Program,
}

impl Study {
    pub fn new(code: NonEmptyText, name: NonEmptyText, program: Program) -> Self {
        Self {
            code,
            name,
            program,
        }
    }
}

/// An assay, owned by a [`Study`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assay {
    pub code: NonEmptyText,
    pub name: NonEmptyText,
    pub study: Study,
}

impl Assay {
    pub fn new(code: NonEmptyText, name: NonEmptyText, study: Study) -> Self {
        Self { code, name, study }
    }
}
