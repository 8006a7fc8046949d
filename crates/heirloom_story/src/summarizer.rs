//! Short summaries of single fragments.

use heirloom_core::GenerationRequest;
use heirloom_error::HeirloomResult;
use heirloom_interface::GenerativeClient;
use tracing::instrument;

/// Default summary length in characters.
pub const DEFAULT_SUMMARY_LENGTH: usize = 200;

/// Asks the backend to condense one fragment.
///
/// The length is a request to the model; the reply is only trimmed.
#[derive(Debug, Clone)]
pub struct InputSummarizer {
    max_tokens: u32,
}

impl InputSummarizer {
    /// Create a summarizer with the given call budget.
    pub fn new(max_tokens: u32) -> Self {
        Self { max_tokens }
    }

    /// The summary prompt for a fragment.
    pub fn build_prompt(text: &str, max_length: usize) -> String {
        format!(
            "Summarize the following story input in {} characters or less.\n\
             Focus on the key events, people, and emotions.\n\
             \n\
             Input:\n\
             {}\n\
             \n\
             Summary:",
            max_length, text
        )
    }

    /// Summarize `text` in roughly `max_length` characters.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure.
    #[instrument(skip(self, client, text), fields(text_length = text.len()))]
    pub async fn summarize<G>(&self, client: &G, text: &str, max_length: usize) -> HeirloomResult<String>
    where
        G: GenerativeClient + ?Sized,
    {
        let request = GenerationRequest::new(Self::build_prompt(text, max_length), self.max_tokens);
        let reply = client.generate(&request).await?;
        Ok(reply.text.trim().to_string())
    }
}

impl Default for InputSummarizer {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_states_length_and_input() {
        let prompt = InputSummarizer::build_prompt("We moved to Ohio in 1972.", 120);
        assert!(prompt.starts_with("Summarize the following story input in 120 characters or less."));
        assert!(prompt.contains("Input:\nWe moved to Ohio in 1972.\n\nSummary:"));
    }
}
