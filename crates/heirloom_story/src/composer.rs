//! Prompt composition for narrative generation.

use heirloom_core::StoryStyle;

/// Framing shared by every narrative prompt.
const FRAMING: &str = "You are helping someone preserve their life stories for their family.";

/// Tone guidance appended after the style instruction.
const VOICE_GUIDANCE: &str = "Make it personal, warm, and preserve the authentic voice of the storyteller.\n\
Include specific details, emotions, and lessons learned.";

/// Builds the narrative prompt from fragments, branch context, and style.
///
/// Pure and deterministic: identical inputs always produce byte-identical
/// prompts.
///
/// # Examples
///
/// ```
/// use heirloom_core::StoryStyle;
/// use heirloom_story::PromptComposer;
///
/// let prompt = PromptComposer::compose(
///     &["I grew up on a farm.", "We had a dog named Max."],
///     "",
///     StoryStyle::Narrative,
/// );
///
/// assert!(prompt.contains("I grew up on a farm.\n\nWe had a dog named Max."));
/// assert!(!prompt.contains("Memory Branch"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    /// Compose the narrative prompt.
    ///
    /// Fragments appear in the given order, separated by one blank line.
    /// An empty `branch_context` omits the context section entirely.
    pub fn compose<S: AsRef<str>>(fragments: &[S], branch_context: &str, style: StoryStyle) -> String {
        let memories = fragments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut prompt = String::with_capacity(memories.len() + 512);
        prompt.push_str(FRAMING);
        prompt.push_str("\n\n");

        let context = branch_context.trim();
        if !context.is_empty() {
            prompt.push_str(context);
            prompt.push_str("\n\n");
        }

        prompt.push_str("Based on the following memories and stories, ");
        prompt.push_str(Self::instruction(style));
        prompt.push('\n');
        prompt.push_str(VOICE_GUIDANCE);
        prompt.push_str("\n\nRaw Memories:\n");
        prompt.push_str(&memories);
        prompt.push_str("\n\nGenerated Story:");
        prompt
    }

    /// Compose with a free-form style tag; unknown tags use the narrative
    /// instruction.
    pub fn compose_tagged<S: AsRef<str>>(fragments: &[S], branch_context: &str, tag: &str) -> String {
        Self::compose(fragments, branch_context, StoryStyle::from_tag(tag))
    }

    /// The instruction sentence for a style.
    pub fn instruction(style: StoryStyle) -> &'static str {
        match style {
            StoryStyle::Narrative => {
                "write a cohesive, engaging narrative story that flows naturally."
            }
            StoryStyle::BulletPoints => {
                "create a structured bullet-point summary of key events and moments."
            }
            StoryStyle::Timeline => "organize the content as a chronological timeline.",
            StoryStyle::Letter => "write this as a heartfelt letter to family members.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_branch_context_precedes_instruction() {
        let prompt = PromptComposer::compose(
            &["I grew up on a farm."],
            "Memory Branch: Childhood (childhood)",
            StoryStyle::Narrative,
        );
        let context = prompt.find("Memory Branch: Childhood").unwrap();
        let instruction = prompt.find("Based on the following").unwrap();
        assert!(context < instruction);
    }

    #[test]
    fn test_fragments_keep_order_and_are_verbatim() {
        let fragments = ["second comes first", "  first comes second  "];
        let prompt = PromptComposer::compose(&fragments, "", StoryStyle::Letter);
        assert!(prompt.contains("second comes first\n\n  first comes second  \n\nGenerated Story:"));
    }

    #[test]
    fn test_each_style_has_distinct_instruction() {
        let prompts: Vec<String> = StoryStyle::iter()
            .map(|style| PromptComposer::compose(&["x"], "", style))
            .collect();
        for (i, a) in prompts.iter().enumerate() {
            for b in &prompts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_tag_matches_narrative() {
        let fragments = ["We had a dog named Max."];
        assert_eq!(
            PromptComposer::compose_tagged(&fragments, "", "unknown_tag"),
            PromptComposer::compose(&fragments, "", StoryStyle::Narrative)
        );
    }

    #[test]
    fn test_deterministic() {
        let fragments = ["a", "b"];
        let first = PromptComposer::compose(&fragments, "ctx", StoryStyle::Timeline);
        let second = PromptComposer::compose(&fragments, "ctx", StoryStyle::Timeline);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prompt_ends_with_cue() {
        let prompt = PromptComposer::compose(&["a"], "", StoryStyle::BulletPoints);
        assert!(prompt.ends_with("Raw Memories:\na\n\nGenerated Story:"));
        assert!(prompt.contains("bullet-point summary"));
    }
}
