//! Error types shared across Pinchmouse crates.

use std::path::PathBuf;

/// Top-level error type for Pinchmouse operations.
#[derive(Debug, thiserror::Error)]
pub enum PinchmouseError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Trace error: {message}")]
    Trace { message: String },

    #[error("Pointer output error: {message}")]
    Output { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PinchmouseError.
pub type PinchmouseResult<T> = Result<T, PinchmouseError>;

impl PinchmouseError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace {
            message: msg.into(),
        }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output {
            message: msg.into(),
        }
    }
}
