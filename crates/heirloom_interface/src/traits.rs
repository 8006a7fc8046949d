//! Capabilities provided by external services.

use async_trait::async_trait;
use heirloom_core::{Generation, GenerationRequest, Transcription};
use heirloom_error::HeirloomResult;

/// A generative text backend.
///
/// One call per request: implementations must not retry internally. Any
/// transport, authentication, or quota failure surfaces as a
/// `GenerationError`.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Generate text for a finished prompt within the request's token budget.
    async fn generate(&self, request: &GenerationRequest) -> HeirloomResult<Generation>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4").
    fn model_name(&self) -> &str;
}

/// Turns an audio reference into a transcript.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the recording at `audio_url`.
    async fn transcribe(&self, audio_url: &str) -> HeirloomResult<Transcription>;
}
