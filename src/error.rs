//! Error types for the hand pose bridge.
//!
//! The pose pipeline itself is total and never fails; these errors only
//! surface at the plumbing edges (configuration, detector input, protocol
//! decoding and I/O).

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File or stream I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Detector frame could not be parsed
    #[error("Frame format error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Protocol line could not be decoded
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
