//! Error types for pre-flight failures.
//!
//! Per-node filesystem failures during a build are not errors at this level;
//! they are recorded as [`crate::build::Action::Failed`] outcomes.

use std::io;
use std::path::PathBuf;

/// Errors that stop a run before any filesystem change is made.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The structure source is missing, binary, or cannot be decoded.
    #[error("{}: file is unreadable or binary", .0.display())]
    UnreadableSource(PathBuf),

    /// The structure source parsed to zero nodes.
    #[error("{}: no valid nodes found in file", .0.display())]
    NoNodes(PathBuf),

    /// Discovery found no candidate structure file.
    #[error("{}: no structure file found", .0.display())]
    NoStructureFile(PathBuf),

    /// A root argument does not point at a directory.
    #[error("{}: Not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
