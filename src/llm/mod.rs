use async_trait::async_trait;

use crate::core::upstream::UpstreamError;

pub mod gemini;

pub use gemini::GeminiClient;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Single-turn generation. Returns the model's text, which may be empty.
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;

    fn name(&self) -> &str;
}
