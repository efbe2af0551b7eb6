//!
//! Contains the Result and Error types for ArduPilot log decoding operations.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal decoding errors. Recoverable per-message problems are not errors at all —
/// they are [`crate::warning::Warning`]s collected alongside the decoded output; see
/// the module documentation for the split between the two.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("log file IO error")]
    FileError(#[from] std::io::Error),

    #[error("format definition has an invalid wire layout: {0}")]
    InvalidWireFormat(String),

    #[error("worker failed while decoding segment [{start}, {end}): {message}")]
    WorkerFailure {
        start: usize,
        end: usize,
        message: String,
    },
}
