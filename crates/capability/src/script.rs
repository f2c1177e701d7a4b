use async_trait::async_trait;

use crate::error::CapabilityError;

/// Text-to-text generation used by the podcast pipeline: condense a
/// document into a summary, then rewrite the summary as a spoken-style
/// monologue. Single request/response, no streaming.
#[async_trait]
pub trait ScriptModel: Send + Sync {
    /// Produce a concise summary of `text`. Callers bound the input size
    /// before calling; the model receives the text as-is.
    async fn summarize(&self, text: &str) -> Result<String, CapabilityError>;

    /// Transform a summary into a short, engaging monologue suitable for
    /// speech synthesis.
    async fn monologue(&self, summary: &str) -> Result<String, CapabilityError>;
}
