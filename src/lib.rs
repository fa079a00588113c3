// lookbook - fashion ad composition with a hosted multimodal model
// Six source images plus a style and an accent color become two generated ads

pub mod composition;
pub mod config;
pub mod error;
pub mod output;

pub use error::{Error, Result};
