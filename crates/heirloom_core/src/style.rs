//! Narrative shapes a story can be generated in.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Selects the instruction template used for generation.
///
/// Parsing is lenient: an unrecognized tag resolves to
/// [`StoryStyle::Narrative`] so generation never fails on style alone.
///
/// # Examples
///
/// ```
/// use heirloom_core::StoryStyle;
///
/// assert_eq!(StoryStyle::from_tag("timeline"), StoryStyle::Timeline);
/// assert_eq!(StoryStyle::from_tag("haiku"), StoryStyle::Narrative);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StoryStyle {
    /// Flowing prose
    #[default]
    Narrative,
    /// Structured bullet summary
    BulletPoints,
    /// Chronological timeline
    Timeline,
    /// Letter addressed to family
    Letter,
}

impl StoryStyle {
    /// Resolve a style tag, falling back to `Narrative` for unknown tags.
    pub fn from_tag(tag: &str) -> Self {
        Self::from_str(tag.trim()).unwrap_or_else(|_| {
            tracing::debug!(tag, "Unknown story style, using narrative");
            Self::Narrative
        })
    }
}
