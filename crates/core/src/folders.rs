//! Folder creation under the conflict policy.
//!
//! Creating a folder never creates its ancestors: the parent chain is resolved first and a
//! missing ancestor fails with `NotFound`. The target is then created with the exclusive
//! `create_dir` primitive; `AlreadyExists` from that call selects the existing-folder branch
//! of [`ConflictPolicy`](crate::config::ConflictPolicy):
//!
//! | policy | existing target |
//! |--------|-----------------|
//! | `use_existing` | reused untouched |
//! | `overwrite_existing` | removed and created again, **empty targets only** |
//! | neither | `Duplicate` |
//!
//! Replacement uses a single-entry directory removal. A non-empty target fails with a
//! `Write` error and keeps its contents.

use crate::chain::{AncestorChain, ChainLink};
use crate::config::{ExistingFolderAction, StorageConfig};
use crate::descriptor::DescriptorBuilder;
use crate::error::WriteAction;
use crate::locks::PathLocks;
use crate::resolver::PathResolver;
use crate::{StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use study_types::{Assay, CreateOutcome, CreatedFolder, Program, Study};

#[derive(Debug, Clone, Copy)]
pub struct FolderLifecycleManager<'a> {
    config: &'a StorageConfig,
    locks: &'a PathLocks,
}

impl<'a> FolderLifecycleManager<'a> {
    pub fn new(config: &'a StorageConfig, locks: &'a PathLocks) -> Self {
        Self { config, locks }
    }

    pub fn create_program_folder(&self, program: &Program) -> StorageResult<CreatedFolder> {
        self.create(&AncestorChain::for_program(program))
    }

    pub fn create_study_folder(&self, study: &Study) -> StorageResult<CreatedFolder> {
        self.create(&AncestorChain::for_study(study))
    }

    pub fn create_assay_folder(&self, assay: &Assay) -> StorageResult<CreatedFolder> {
        self.create(&AncestorChain::for_assay(assay))
    }

    /// Creates the folder of the chain's target entity.
    ///
    /// The returned descriptor is shallow: the folder's contents are never listed, even when
    /// an existing folder is reused.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if:
    /// - an ancestor folder is absent (`NotFound`),
    /// - the target exists and the policy rejects it (`Duplicate`),
    /// - creating or removing the directory fails (`Write`).
    pub fn create(&self, chain: &AncestorChain) -> StorageResult<CreatedFolder> {
        let target = chain.target();
        let parent = PathResolver::new(self.config).locate_parent(chain)?;
        let path = parent.join(&target.folder_name);

        let _guard = self.locks.lock(&path);

        let outcome = match fs::create_dir(&path) {
            Ok(()) => CreateOutcome::Created,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => self.apply_policy(target, &path)?,
            Err(e) => return Err(write_error(target, WriteAction::Create, &path, e)),
        };

        tracing::info!(
            "{} folder {} for {}: {}",
            target.kind,
            outcome_label(outcome),
            target.code,
            path.display()
        );

        Ok(CreatedFolder {
            folder: DescriptorBuilder::new(self.config).folder(&path)?,
            outcome,
        })
    }

    fn apply_policy(&self, target: &ChainLink, path: &Path) -> StorageResult<CreateOutcome> {
        match self.config.policy().existing_action() {
            ExistingFolderAction::Reuse if path.is_dir() => Ok(CreateOutcome::Reused),
            ExistingFolderAction::Reuse | ExistingFolderAction::Reject => {
                Err(StorageError::Duplicate {
                    kind: target.kind,
                    path: path.to_path_buf(),
                })
            }
            ExistingFolderAction::Replace => {
                tracing::warn!("overwriting existing {} folder {}", target.kind, path.display());
                fs::remove_dir(path)
                    .map_err(|e| write_error(target, WriteAction::Delete, path, e))?;
                fs::create_dir(path)
                    .map_err(|e| write_error(target, WriteAction::Create, path, e))?;
                Ok(CreateOutcome::Replaced)
            }
        }
    }
}

fn write_error(
    target: &ChainLink,
    action: WriteAction,
    path: &Path,
    source: std::io::Error,
) -> StorageError {
    StorageError::Write {
        kind: target.kind,
        action,
        path: path.to_path_buf(),
        source,
    }
}

fn outcome_label(outcome: CreateOutcome) -> &'static str {
    match outcome {
        CreateOutcome::Created => "created",
        CreateOutcome::Reused => "reused",
        CreateOutcome::Replaced => "replaced",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConflictPolicy;
    use study_types::{EntityKind, NonEmptyText};
    use tempfile::TempDir;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).unwrap()
    }

    fn program() -> Program {
        Program::new(text("CPA"), text("Cancer Program A"))
    }

    fn study() -> Study {
        Study::new(text("CPA-10001"), text("Kinase Screen"), program())
    }

    fn config(temp: &TempDir, policy: ConflictPolicy) -> StorageConfig {
        StorageConfig::new(temp.path().to_path_buf(), "/static", policy).unwrap()
    }

    #[test]
    fn test_create_program_folder() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::default());
        let locks = PathLocks::new();

        let created = FolderLifecycleManager::new(&cfg, &locks)
            .create_program_folder(&program())
            .unwrap();

        let expected = cfg.root_path().join("CPA - Cancer Program A");
        assert_eq!(created.outcome, CreateOutcome::Created);
        assert_eq!(created.folder.absolute_path, expected);
        assert_eq!(created.folder.name, "CPA - Cancer Program A");
        assert_eq!(created.folder.url, "/static/CPA - Cancer Program A");
        assert!(expected.is_dir());
        assert_eq!(locks.held_count(), 0);
    }

    #[test]
    fn test_create_study_requires_program() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::new(true, true));
        let locks = PathLocks::new();

        let err = FolderLifecycleManager::new(&cfg, &locks)
            .create_study_folder(&study())
            .unwrap_err();

        assert!(matches!(
            err,
            StorageError::NotFound {
                kind: EntityKind::Program,
                ..
            }
        ));
        // Ancestors are never created
        assert!(!cfg.root_path().join("CPA - Cancer Program A").exists());
    }

    #[test]
    fn test_duplicate_leaves_folder_untouched() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::default());
        let locks = PathLocks::new();
        let manager = FolderLifecycleManager::new(&cfg, &locks);

        let created = manager.create_program_folder(&program()).unwrap();
        fs::write(created.folder.absolute_path.join("keep.txt"), "keep").unwrap();

        let err = manager.create_program_folder(&program()).unwrap_err();
        match err {
            StorageError::Duplicate { kind, path } => {
                assert_eq!(kind, EntityKind::Program);
                assert_eq!(path, created.folder.absolute_path);
            }
            other => panic!("expected Duplicate, got {other:?}"),
        }
        assert_eq!(
            fs::read_to_string(created.folder.absolute_path.join("keep.txt")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn test_use_existing_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::new(true, false));
        let locks = PathLocks::new();
        let manager = FolderLifecycleManager::new(&cfg, &locks);

        let first = manager.create_program_folder(&program()).unwrap();
        fs::write(first.folder.absolute_path.join("data.csv"), "a,b").unwrap();

        let second = manager.create_program_folder(&program()).unwrap();
        assert_eq!(second.outcome, CreateOutcome::Reused);
        assert_eq!(second.folder, first.folder);
        assert_eq!(
            fs::read_to_string(first.folder.absolute_path.join("data.csv")).unwrap(),
            "a,b"
        );
    }

    #[test]
    fn test_use_existing_wins_over_overwrite() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::new(true, true));
        let locks = PathLocks::new();
        let manager = FolderLifecycleManager::new(&cfg, &locks);

        let first = manager.create_program_folder(&program()).unwrap();
        fs::write(first.folder.absolute_path.join("data.csv"), "a,b").unwrap();

        let second = manager.create_program_folder(&program()).unwrap();
        assert_eq!(second.outcome, CreateOutcome::Reused);
        assert!(first.folder.absolute_path.join("data.csv").exists());
    }

    #[test]
    fn test_overwrite_empty_folder() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::new(false, true));
        let locks = PathLocks::new();
        let manager = FolderLifecycleManager::new(&cfg, &locks);

        manager.create_program_folder(&program()).unwrap();
        let second = manager.create_program_folder(&program()).unwrap();

        assert_eq!(second.outcome, CreateOutcome::Replaced);
        assert!(second.folder.absolute_path.is_dir());
    }

    #[test]
    fn test_overwrite_non_empty_folder_fails_and_keeps_data() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::new(false, true));
        let locks = PathLocks::new();
        let manager = FolderLifecycleManager::new(&cfg, &locks);

        let first = manager.create_program_folder(&program()).unwrap();
        let data = first.folder.absolute_path.join("data.csv");
        fs::write(&data, "a,b").unwrap();

        let err = manager.create_program_folder(&program()).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Write {
                action: WriteAction::Delete,
                ..
            }
        ));
        assert_eq!(fs::read_to_string(&data).unwrap(), "a,b");
    }

    #[test]
    fn test_use_existing_refuses_non_directory() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::new(true, false));
        let locks = PathLocks::new();
        fs::write(cfg.root_path().join("CPA - Cancer Program A"), "file").unwrap();

        let err = FolderLifecycleManager::new(&cfg, &locks)
            .create_program_folder(&program())
            .unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { .. }));
    }

    #[test]
    fn test_create_assay_under_existing_study() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::default());
        let locks = PathLocks::new();
        let manager = FolderLifecycleManager::new(&cfg, &locks);

        manager.create_program_folder(&program()).unwrap();
        manager.create_study_folder(&study()).unwrap();
        let assay = Assay::new(text("CPA-10001-001"), text("Western Blot"), study());
        let created = manager.create_assay_folder(&assay).unwrap();

        assert_eq!(
            created.folder.absolute_path,
            cfg.root_path()
                .join("CPA - Cancer Program A")
                .join("CPA-10001 - Kinase Screen")
                .join("CPA-10001-001 - Western Blot")
        );
        assert_eq!(
            created.folder.url,
            "/static/CPA - Cancer Program A/CPA-10001 - Kinase Screen/CPA-10001-001 - Western Blot"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_create_in_read_only_parent_is_write_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::default());
        let locks = PathLocks::new();
        let manager = FolderLifecycleManager::new(&cfg, &locks);
        manager.create_program_folder(&program()).unwrap();

        let program_dir = cfg.root_path().join("CPA - Cancer Program A");
        fs::set_permissions(&program_dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits do not bind root; nothing to assert there
        let writable = fs::create_dir(program_dir.join("writable-check")).is_ok();
        if writable {
            fs::remove_dir(program_dir.join("writable-check")).unwrap();
            fs::set_permissions(&program_dir, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = manager.create_study_folder(&study());
        fs::set_permissions(&program_dir, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(StorageError::Write {
                kind,
                action,
                path,
                ..
            }) => {
                assert_eq!(kind, EntityKind::Study);
                assert_eq!(action, WriteAction::Create);
                assert_eq!(path, program_dir.join("CPA-10001 - Kinase Screen"));
            }
            other => panic!("expected create write error, got {other:?}"),
        }
        assert!(!program_dir.join("CPA-10001 - Kinase Screen").exists());
    }

    #[test]
    fn test_create_with_overlong_name_is_write_error() {
        let temp = TempDir::new().unwrap();
        let cfg = config(&temp, ConflictPolicy::default());
        let locks = PathLocks::new();
        let manager = FolderLifecycleManager::new(&cfg, &locks);

        let program = Program::new(text("CPA"), text(&"x".repeat(300)));
        let err = manager.create_program_folder(&program).unwrap_err();

        assert!(matches!(
            err,
            StorageError::Write {
                kind: EntityKind::Program,
                action: WriteAction::Create,
                ..
            }
        ));
    }
}
