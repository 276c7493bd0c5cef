use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;

/// Crate-wide error taxonomy.
///
/// Collector-side per-file failures are recovered locally (the file is
/// skipped and ingestion continues); every variant below aborts the whole
/// operation it occurs in.
#[derive(Error, Debug)]
pub enum Error {
    /// No valid entries were collected, so there is nothing to build from.
    #[error("no valid image entries to build from")]
    EmptyInput,

    /// The extraction target does not resolve to a readable container.
    #[error("container not found: {path}")]
    MissingArchive { path: PathBuf },

    /// Structural mismatch inside a container: bad magic or version, a name
    /// table whose size is not a multiple of the row width, a missing
    /// indexed block, or a checksum/codec failure.
    #[error("corrupt container: {reason}")]
    CorruptArchive { reason: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptArchive { reason: reason.into() }
    }
}
