//! Error types
//!
//! Neither type is fatal to a run: source errors degrade the index, delete
//! errors are reported inline by the disposition loop.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// An external inventory source could not be queried
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name} is not available on this system")]
    Unavailable { source_name: &'static str },

    #[error("{command} exited with status {status}")]
    CommandFailed { command: String, status: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A folder could not be removed
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("{path} is protected from deletion")]
    Protected { path: PathBuf },

    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
