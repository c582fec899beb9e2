//! Error handling for osc-pilot

use crate::command_executor::TransportError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure (timeout, connection, HTTP status, malformed JSON)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Command issued while the camera is in the wrong capture mode.
    /// Detected locally, no network call is made.
    #[error("Wrong capture mode: {0}")]
    WrongMode(String),
}
