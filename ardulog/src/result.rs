//!
//! Unified error type for the `ardulog` facade crate, consolidating the decode and
//! parallel-orchestration sub-crate errors into a single surface.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("decode error: {0}")]
    Decode(#[from] ardulog_decode::result::Error),

    #[error("parallel orchestration error: {0}")]
    Parallel(#[from] ardulog_parallel::Error),
}
