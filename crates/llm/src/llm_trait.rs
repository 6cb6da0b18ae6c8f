use async_trait::async_trait;
use studygen_common::Result;

/// Common trait for generative-text backends
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the first generated text part.
    ///
    /// Non-success statuses and network failures are `Transport` errors; a
    /// success payload without text is `MalformedResponse`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
