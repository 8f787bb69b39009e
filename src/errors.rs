// src/errors.rs

//! Crate-wide error types.
//!
//! [`RetransError`] covers everything that ends the session (a missing or
//! unreadable source file, a watch that cannot be established, a broken
//! config file).
//! [`SpawnError`] is the non-fatal failure of a single invocation; it travels
//! inside an [`InvocationResult`](crate::types::InvocationResult) instead of
//! being propagated with `?`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetransError {
    #[error("Source file \"{}\" not found.", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Source \"{}\" is not a regular file.", .0.display())]
    SourceNotAFile(PathBuf),

    #[error("Source file \"{}\" is not readable: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The external executable could not be run to completion.
///
/// A process that starts and exits nonzero is *not* a `SpawnError`; that is a
/// normal [`ProcessOutput`](crate::types::ProcessOutput).
#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed while waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invocation task aborted: {0}")]
    Aborted(String),
}

pub type Result<T> = std::result::Result<T, RetransError>;
