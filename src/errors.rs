//! Typed error definitions for fdb_symlink.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! The allocator itself returns `io::Error` untouched; these variants are used one
//! layer up (publish helper, CLI) where the failure needs a name and an exit code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymlinkError {
    #[error("Link directory not found: {0}")]
    DirMissing(PathBuf),

    #[error("Link directory is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Every temp symlink name tried in {dir} was already taken")]
    Exhausted {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create temp symlink in {dir}: {source}")]
    Create {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to install {temp} over {dest}: {source}")]
    Install {
        temp: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SymlinkError {
    /// Stable numeric code for structured logs and process exit status.
    pub fn code(&self) -> u8 {
        match self {
            SymlinkError::DirMissing(_) => 2,
            SymlinkError::NotADirectory(_) => 3,
            SymlinkError::Exhausted { .. } => 4,
            SymlinkError::Create { .. } => 5,
            SymlinkError::Install { .. } => 6,
            SymlinkError::InvalidConfig(_) => 7,
        }
    }

    /// Classify an allocator failure: collisions all the way down, or a plain OS error.
    pub fn from_allocate(dir: impl Into<PathBuf>, source: io::Error) -> Self {
        let dir = dir.into();
        if source.kind() == io::ErrorKind::AlreadyExists {
            SymlinkError::Exhausted { dir, source }
        } else {
            SymlinkError::Create { dir, source }
        }
    }
}
