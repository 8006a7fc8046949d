//! Structured metadata extraction with a silent fallback.

use crate::extraction::{extract_json, parse_json};
use heirloom_core::{GenerationRequest, StoryMetadata};
use heirloom_error::HeirloomResult;
use heirloom_interface::{GenerativeClient, TelemetrySink};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Shape the backend is asked to reply with. Every key is required;
/// `time_period` may be `null`.
#[derive(Debug, Deserialize)]
struct MetadataReply {
    themes: Vec<String>,
    people: Vec<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    time_period: Option<String>,
    summary: String,
}

/// Asks the backend for themes, people, period, and summary of a story.
///
/// A reply that cannot be read as the expected JSON object never fails the
/// pipeline: [`MetadataExtractor::extract`] substitutes
/// [`StoryMetadata::fallback`] and reports the problem to telemetry.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    max_tokens: u32,
    summary_fallback_chars: usize,
    max_themes: usize,
}

impl MetadataExtractor {
    /// Create an extractor with the given call budget and limits.
    pub fn new(max_tokens: u32, summary_fallback_chars: usize, max_themes: usize) -> Self {
        Self {
            max_tokens,
            summary_fallback_chars,
            max_themes,
        }
    }

    /// The analysis prompt for a story.
    pub fn build_prompt(story_text: &str) -> String {
        format!(
            "Analyze this story and extract:\n\
             1. Key themes (list 3-5 themes)\n\
             2. People mentioned (list names)\n\
             3. Time period (e.g., \"1960s\", \"childhood\", \"early career\")\n\
             4. A one-sentence summary\n\
             \n\
             Story:\n\
             {}\n\
             \n\
             Respond in JSON format:\n\
             {{\"themes\": [], \"people\": [], \"time_period\": \"\", \"summary\": \"\"}}",
            story_text
        )
    }

    /// Request metadata for `story_text`.
    ///
    /// # Errors
    ///
    /// Fails only when the backend call itself fails. Parse problems are
    /// absorbed into the fallback record.
    #[instrument(skip(self, client, telemetry, story_text), fields(story_length = story_text.len()))]
    pub async fn extract<G>(
        &self,
        client: &G,
        telemetry: &dyn TelemetrySink,
        story_text: &str,
    ) -> HeirloomResult<StoryMetadata>
    where
        G: GenerativeClient + ?Sized,
    {
        let request = GenerationRequest::new(Self::build_prompt(story_text), self.max_tokens);
        let reply = client.generate(&request).await?;
        Ok(self.resolve(&reply.text, story_text, telemetry))
    }

    /// Interpret a reply, substituting the fallback on any parse problem.
    pub fn resolve(
        &self,
        reply: &str,
        story_text: &str,
        telemetry: &dyn TelemetrySink,
    ) -> StoryMetadata {
        match self.parse_reply(reply) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(error = %e, "Metadata reply unusable, using fallback");
                if let Err(sink_error) = telemetry.log_error("metadata_parse", &e.to_string()) {
                    warn!(error = %sink_error, "Telemetry sink rejected metadata_parse event");
                }
                StoryMetadata::fallback(story_text, self.summary_fallback_chars)
            }
        }
    }

    /// Strictly parse a reply into metadata.
    ///
    /// The whole reply is tried as JSON first; failing that, the object is
    /// located inside a code fence or surrounding prose. Values are kept as
    /// returned, except that themes beyond the limit are dropped.
    ///
    /// # Errors
    ///
    /// Returns a `JsonError` when no object is found or a key is missing or
    /// mistyped.
    pub fn parse_reply(&self, reply: &str) -> HeirloomResult<StoryMetadata> {
        let parsed: MetadataReply = match serde_json::from_str(reply.trim()) {
            Ok(parsed) => parsed,
            Err(_) => parse_json(&extract_json(reply)?)?,
        };

        let mut themes = parsed.themes;
        if themes.len() > self.max_themes {
            debug!(returned = themes.len(), kept = self.max_themes, "Truncating themes");
            themes.truncate(self.max_themes);
        }

        Ok(StoryMetadata {
            themes,
            people: parsed.people,
            time_period: parsed.time_period,
            summary: parsed.summary,
        })
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new(300, 200, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heirloom_interface::NoopTelemetry;

    #[test]
    fn test_well_formed_reply_is_kept_exactly() {
        let reply = r#"{"themes": ["family", "farm life"], "people": ["Max", "Grandma Rose"], "time_period": "1960s", "summary": "A childhood on a farm."}"#;
        let metadata = MetadataExtractor::default().parse_reply(reply).unwrap();
        assert_eq!(metadata.themes, vec!["family", "farm life"]);
        assert_eq!(metadata.people, vec!["Max", "Grandma Rose"]);
        assert_eq!(metadata.time_period.as_deref(), Some("1960s"));
        assert_eq!(metadata.summary, "A childhood on a farm.");
    }

    #[test]
    fn test_null_time_period_is_accepted() {
        let reply = r#"{"themes": [], "people": [], "time_period": null, "summary": "s"}"#;
        let metadata = MetadataExtractor::default().parse_reply(reply).unwrap();
        assert_eq!(metadata.time_period, None);
    }

    #[test]
    fn test_missing_key_is_a_parse_failure() {
        let reply = r#"{"themes": [], "people": [], "summary": "s"}"#;
        assert!(MetadataExtractor::default().parse_reply(reply).is_err());
    }

    #[test]
    fn test_fenced_reply_is_recovered() {
        let reply = "```json\n{\"themes\": [\"war\"], \"people\": [], \"time_period\": \"1940s\", \"summary\": \"s\"}\n```";
        let metadata = MetadataExtractor::default().parse_reply(reply).unwrap();
        assert_eq!(metadata.themes, vec!["war"]);
    }

    #[test]
    fn test_themes_truncated_to_limit() {
        let reply = r#"{"themes": ["a","b","c","d","e","f","g"], "people": [], "time_period": "", "summary": ""}"#;
        let metadata = MetadataExtractor::default().parse_reply(reply).unwrap();
        assert_eq!(metadata.themes, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(metadata.time_period.as_deref(), Some(""));
    }

    #[test]
    fn test_prose_reply_falls_back() {
        let story = "x".repeat(450);
        let metadata = MetadataExtractor::default().resolve(
            "The story is about family.",
            &story,
            &NoopTelemetry,
        );
        assert!(metadata.themes.is_empty());
        assert!(metadata.people.is_empty());
        assert_eq!(metadata.time_period, None);
        assert_eq!(metadata.summary, "x".repeat(200));
    }

    #[test]
    fn test_fallback_counts_characters_not_bytes() {
        let story = "é".repeat(300);
        let metadata = MetadataExtractor::default().resolve("nope", &story, &NoopTelemetry);
        assert_eq!(metadata.summary.chars().count(), 200);
    }

    #[test]
    fn test_short_story_fallback_is_whole_story() {
        let metadata = MetadataExtractor::default().resolve("", "short", &NoopTelemetry);
        assert_eq!(metadata.summary, "short");
    }

    #[test]
    fn test_prompt_embeds_story() {
        let prompt = MetadataExtractor::build_prompt("We had a dog named Max.");
        assert!(prompt.contains("Story:\nWe had a dog named Max.\n"));
        assert!(prompt.ends_with(r#"{"themes": [], "people": [], "time_period": "", "summary": ""}"#));
    }
}
