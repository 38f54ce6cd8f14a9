//! Error types for netrc-rs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or parsing a netrc file.
#[derive(Error, Debug)]
pub enum Error {
    /// The default netrc location could not be resolved because no home
    /// directory is available.
    #[error("could not locate .netrc: no home directory")]
    HomeNotFound,

    /// Netrc file not found.
    #[error("netrc file not found: {0}")]
    FileNotFound(PathBuf),

    /// Failed to read a netrc file.
    #[error("failed to read netrc file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The default netrc file is owned by another user.
    #[error("{path} file owner ({owner}) does not match current user ({user})")]
    WrongOwner {
        path: PathBuf,
        owner: String,
        user: String,
    },

    /// The default netrc file is readable or writable by group or other.
    #[error("{path} access too permissive: access permissions must restrict access to only the owner")]
    Permissions { path: PathBuf },

    /// Syntax error in the netrc file.
    #[error("{message} ({path}, line {line})")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Result type alias for netrc-rs operations.
pub type Result<T> = std::result::Result<T, Error>;
