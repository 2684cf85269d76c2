//! Study File Ingestion
//!
//! This crate copies externally supplied files (for example, uploads staged by a request
//! handler) into a folder of the study storage tree.
//!
//! ## Ingestion Model
//!
//! - The destination folder must already exist; it is never created here
//! - The stored file keeps the source file's base name
//! - An existing file with the same name is overwritten (last writer wins, no versioning)
//! - Locating the destination folder is the caller's job (see `study-storage-core`)
//!
//! ## Example Usage
//!
//! ```no_run
//! use study_files::FileIngestor;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ingestor = FileIngestor::new(Path::new("/data/CPA - Cancer Program A"))?;
//! let ingested = ingestor.ingest(Path::new("/tmp/upload/results.csv"))?;
//! println!("stored {} bytes at {}", ingested.size_bytes, ingested.path.display());
//! # Ok(())
//! # }
//! ```

mod ingest;

pub use ingest::{source_file_name, FileIngestor, IngestedFile};

/// Errors that can occur during file ingestion
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Destination directory does not exist or is not a directory
    #[error("Destination directory not found: {0}")]
    DirectoryNotFound(String),

    /// Source path is missing, not a regular file, or has no usable base name
    #[error("Invalid source file: {0}")]
    InvalidSource(String),

    /// I/O error occurred while copying
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
