pub mod eyedance;
mod headers;
mod retry;
mod size;
mod validate;

use crate::error::Result;
use crate::models::{GenerationRequest, GenerationResult, ModelList};
use async_trait::async_trait;

pub use eyedance::EyeDanceProvider;

/// Common surface for image generation backends.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate a batch of images; all-or-nothing.
    async fn generate_images(&self, request: GenerationRequest) -> Result<GenerationResult>;

    /// The fixed set of models this backend accepts.
    fn list_models(&self) -> ModelList;
}
