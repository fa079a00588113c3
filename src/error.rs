// Error types for lookbook

use crate::composition::{GenerationError, WorkflowError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for lookbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the configuration layer and the command-line front end
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Cannot read {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backend setup error: {0}")]
    Backend(#[from] GenerationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image output error: {0}")]
    ImageOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::ImageOutput(err.to_string())
    }
}
