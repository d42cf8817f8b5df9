use async_trait::async_trait;

use super::ApiError;

/// A remote text-generation model.
///
/// Implemented by [`super::WatsonxModel`]; tests substitute their own.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for display and logging.
    fn model_id(&self) -> &str;

    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}
