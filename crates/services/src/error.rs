//! Shared error types for the services crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{SessionStateError, SummaryError};

/// Errors emitted while loading a problem set. All of them are fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("couldn't open CSV file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't parse CSV file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(
        "couldn't parse CSV file {}: row {row} has {fields} field(s), expected at least 2",
        .path.display()
    )]
    MalformedRow {
        path: PathBuf,
        row: usize,
        fields: usize,
    },
}

/// Errors emitted by the session coordinator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error("console write failed: {0}")]
    Console(#[from] io::Error),
}
