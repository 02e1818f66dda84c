#![forbid(unsafe_code)]

use dryrun_core::codec::CodecError;
use dryrun_core::{ConfigError, TraceError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Trace(#[from] TraceError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("verification failed for {algorithm}: {reason}")]
    Verification { algorithm: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code: 2 for bad input, 3 for bad config, 4 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Trace(err) if err.is_input_error() => 2,
            Self::Config(_) | Self::Trace(TraceError::InvalidConfig { .. }) => 3,
            Self::Trace(_)
            | Self::Codec(_)
            | Self::Verification { .. }
            | Self::Io(_)
            | Self::Json(_) => 4,
        }
    }
}
