//! Error types for spindle-player

use thiserror::Error;

/// Result type for player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Player error taxonomy
///
/// Covers the collaborator seams only; the playlist core itself reports
/// guarded no-ops through boolean results and never errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audio sink failure (load, device)
    #[error("Audio sink error: {0}")]
    Audio(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input (bad index, unparsable command argument)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
