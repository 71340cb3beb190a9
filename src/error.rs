//! Error kinds shared by generation and installation.
//!
//! Command handlers wrap these in `anyhow` with context; the library keeps
//! them typed so tests (and callers) can match on the failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("provide a class name as argument")]
    MissingArgument,

    #[error("'{0}' is not a valid class name")]
    InvalidClassName(String),

    #[error("invalid template specification: {0}")]
    InvalidTemplateSpec(String),

    #[error("path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("'{}' already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl ScaffoldError {
    /// Classify an I/O failure on `path`, keeping permission problems distinct.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            io::ErrorKind::NotFound => Self::PathNotFound(path),
            _ => Self::Io { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
