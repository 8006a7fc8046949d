//! Short title generation.

use heirloom_core::GenerationRequest;
use heirloom_error::HeirloomResult;
use heirloom_interface::GenerativeClient;
use tracing::instrument;

/// Quote characters stripped from both ends of a title reply.
const DOUBLE_QUOTES: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

/// Asks the backend for a title of at most eight words.
///
/// Only an excerpt of the story is sent. The reply is cleaned of
/// surrounding whitespace and quotation marks, and is otherwise used as is:
/// the eight-word limit is a request to the model, not something enforced.
#[derive(Debug, Clone)]
pub struct TitleGenerator {
    max_tokens: u32,
    excerpt_chars: usize,
}

impl TitleGenerator {
    /// Create a generator with the given call budget and excerpt length.
    pub fn new(max_tokens: u32, excerpt_chars: usize) -> Self {
        Self {
            max_tokens,
            excerpt_chars,
        }
    }

    /// The title prompt, embedding the first `excerpt_chars` characters of
    /// the story.
    pub fn build_prompt(&self, story_text: &str) -> String {
        let excerpt: String = story_text.chars().take(self.excerpt_chars).collect();
        format!(
            "Generate a short, meaningful title (max 8 words) for this family story:\n\n{}\n\nTitle:",
            excerpt
        )
    }

    /// Request a title for `story_text`.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure.
    #[instrument(skip(self, client, story_text), fields(story_length = story_text.len()))]
    pub async fn generate<G>(&self, client: &G, story_text: &str) -> HeirloomResult<String>
    where
        G: GenerativeClient + ?Sized,
    {
        let request = GenerationRequest::new(self.build_prompt(story_text), self.max_tokens);
        let reply = client.generate(&request).await?;
        Ok(Self::clean(&reply.text))
    }

    /// Trim whitespace and enclosing quotation marks from a title reply.
    ///
    /// Straight and curly double quotes are removed from either end. Single
    /// quotes are removed only when they enclose the whole title, so an
    /// apostrophe survives. An empty reply stays empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use heirloom_story::TitleGenerator;
    ///
    /// assert_eq!(TitleGenerator::clean("  \"A Summer to Remember\"  "), "A Summer to Remember");
    /// assert_eq!(TitleGenerator::clean("Grandpa's Boat"), "Grandpa's Boat");
    /// ```
    pub fn clean(reply: &str) -> String {
        let mut title = reply.trim().trim_matches(DOUBLE_QUOTES.as_slice()).trim();
        if title.len() >= 2 && title.starts_with('\'') && title.ends_with('\'') {
            title = title[1..title.len() - 1].trim();
        }
        title.to_string()
    }
}

impl Default for TitleGenerator {
    fn default() -> Self {
        Self::new(20, 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_whitespace_and_quotes() {
        assert_eq!(TitleGenerator::clean("  \"A Summer to Remember\"  "), "A Summer to Remember");
        assert_eq!(TitleGenerator::clean("\u{201C}Curly Quotes\u{201D}\n"), "Curly Quotes");
        assert_eq!(TitleGenerator::clean("'Single Quoted'"), "Single Quoted");
    }

    #[test]
    fn test_inner_apostrophes_survive() {
        assert_eq!(TitleGenerator::clean("Mom's Kitchen"), "Mom's Kitchen");
        assert_eq!(TitleGenerator::clean("'Tis the Season"), "'Tis the Season");
    }

    #[test]
    fn test_empty_reply_is_empty_title() {
        assert_eq!(TitleGenerator::clean(""), "");
        assert_eq!(TitleGenerator::clean("  \"\"  "), "");
    }

    #[test]
    fn test_long_reply_is_not_shortened() {
        let reply = "One Two Three Four Five Six Seven Eight Nine Ten";
        assert_eq!(TitleGenerator::clean(reply), reply);
    }

    #[test]
    fn test_prompt_uses_excerpt() {
        let generator = TitleGenerator::new(20, 10);
        let prompt = generator.build_prompt("0123456789ABCDEF");
        assert!(prompt.contains("\n\n0123456789\n\nTitle:"));
        assert!(!prompt.contains("ABC"));
    }
}
