// Generation backends

mod gemini;

pub use gemini::{GeminiConfig, GeminiService};

use super::types::{ImageReference, InlineImage};
use async_trait::async_trait;

/// A hosted model that fuses several images into one under a text instruction
#[async_trait]
pub trait CompositeGenerationService: Send + Sync {
    /// Generate one image from the ordered inputs and the instruction
    async fn generate(
        &self,
        images: &[InlineImage],
        prompt: &str,
    ) -> Result<ImageReference, GenerationError>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
