//! Request and response shapes for the generative text backend.

use serde::{Deserialize, Serialize};

/// A single-shot generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Finished prompt
    pub prompt: String,
    /// Token budget for the reply
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Create a request.
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// Text returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Generated text
    pub text: String,
    /// Tokens billed for the call
    pub tokens_used: u64,
}
