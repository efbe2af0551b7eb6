use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors from the parallel coordinator. Per-message problems never surface
/// here — they are [`ardulog_decode::Warning`]s collected alongside the decoded
/// output.
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be opened or read. Fatal; aborts the run.
    #[error("failed to read log file: {0}")]
    IOFailure(#[from] std::io::Error),

    /// A worker panicked or otherwise failed to complete its segment. Fatal; aborts
    /// the run (no partial-result mode is specified).
    #[error("worker for segment [{start}, {end}) failed: {message}")]
    WorkerFailure { start: usize, end: usize, message: String },
}
