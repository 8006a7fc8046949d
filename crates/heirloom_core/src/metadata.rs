//! Structured metadata extracted from a generated story.

use serde::{Deserialize, Serialize};

/// Themes, people, period, and summary derived from a story.
///
/// Best-effort enrichment: empty `themes` or `people` mean "unknown", not
/// "verified absent".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoryMetadata {
    /// Key themes, at most five
    pub themes: Vec<String>,
    /// Names of people mentioned
    pub people: Vec<String>,
    /// Era or life stage, e.g. "1960s" or "early career"
    pub time_period: Option<String>,
    /// One-sentence summary
    pub summary: String,
}

impl StoryMetadata {
    /// The record substituted when the backend's reply cannot be parsed:
    /// no themes, no people, no period, and the first `summary_chars`
    /// characters of the story as summary.
    ///
    /// # Examples
    ///
    /// ```
    /// use heirloom_core::StoryMetadata;
    ///
    /// let fallback = StoryMetadata::fallback("Once upon a time", 4);
    /// assert_eq!(fallback.summary, "Once");
    /// assert!(fallback.themes.is_empty());
    /// assert!(fallback.time_period.is_none());
    /// ```
    pub fn fallback(story_text: &str, summary_chars: usize) -> Self {
        Self {
            themes: Vec::new(),
            people: Vec::new(),
            time_period: None,
            summary: story_text.chars().take(summary_chars).collect(),
        }
    }
}
