//! File ingestion into study and assay folders.
//!
//! The target folder is located through the full ancestor chain (it is never created), then
//! the copy itself is delegated to [`study_files::FileIngestor`] while the destination path is
//! held in the lock table.

use crate::chain::AncestorChain;
use crate::config::StorageConfig;
use crate::descriptor::DescriptorBuilder;
use crate::locks::PathLocks;
use crate::resolver::PathResolver;
use crate::StorageResult;
use std::path::Path;
use study_files::FileIngestor;
use study_types::StorageFile;

pub(crate) fn save_file(
    config: &StorageConfig,
    locks: &PathLocks,
    source: &Path,
    chain: &AncestorChain,
) -> StorageResult<StorageFile> {
    let folder = PathResolver::new(config).locate_chain(chain)?;
    let ingestor = FileIngestor::new(&folder)?;

    let destination = ingestor.target_path(source)?;
    let _guard = locks.lock(&destination);
    let ingested = ingestor.ingest(source)?;

    tracing::info!(
        "saved {} ({} bytes) to {} folder {}",
        ingested.file_name,
        ingested.size_bytes,
        chain.target().kind,
        chain.target().code
    );

    DescriptorBuilder::new(config).file(&ingested.path)
}
