// Composition workflow - six images, one style, one color, two generated ads

pub mod controller;
pub mod intake;
pub mod prompts;
pub mod selection;
pub mod service;
pub mod slots;
pub mod types;

pub use controller::{Session, WorkflowController};
pub use intake::{DroppedItem, decode_item};
pub use prompts::{PromptPair, build_prompts};
pub use selection::SelectionStore;
pub use service::{CompositeGenerationService, GenerationError};
pub use slots::{ImageSlotStore, is_ready};
pub use types::*;

/// Shown to the user whenever a submission fails at the backend
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate images. Please check the logs for details.";

/// Input problems the user can correct locally
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload all six images.")]
    MissingImages(Vec<SlotId>),

    #[error("'{name}' is not an image ({media_type}). Please drop an image file.")]
    NotAnImage { name: String, media_type: String },
}

/// Outcome of a failed submission
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cause stays available through `source()` for diagnostics only
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    Generation(#[source] GenerationError),
}
