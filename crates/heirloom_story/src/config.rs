//! Explicit settings for the story pipeline.

use derive_getters::Getters;
use heirloom_error::{ConfigError, HeirloomResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Token budgets, truncation limits, and the optional deadline for one
/// pipeline run.
///
/// Passed to the assembler at construction; the pipeline never reads
/// process state.
///
/// # Examples
///
/// ```
/// use heirloom_story::{PipelineConfig, PipelineConfigBuilder};
///
/// let config = PipelineConfigBuilder::default()
///     .timeout_secs(Some(90))
///     .build()
///     .unwrap();
///
/// assert_eq!(*config.narrative_max_tokens(), 2000);
/// assert_eq!(config.timeout().unwrap().as_secs(), 90);
/// assert_eq!(PipelineConfig::default().timeout(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(default)]
pub struct PipelineConfig {
    /// Budget for the narrative call
    #[serde(default = "default_narrative_max_tokens")]
    narrative_max_tokens: u32,

    /// Budget for the metadata call
    #[serde(default = "default_metadata_max_tokens")]
    metadata_max_tokens: u32,

    /// Budget for the title call
    #[serde(default = "default_title_max_tokens")]
    title_max_tokens: u32,

    /// Budget for the input summary call
    #[serde(default = "default_summary_max_tokens")]
    summary_max_tokens: u32,

    /// Characters of story kept as summary when metadata parsing fails
    #[serde(default = "default_summary_fallback_chars")]
    summary_fallback_chars: usize,

    /// Characters of story shown to the title prompt
    #[serde(default = "default_title_excerpt_chars")]
    title_excerpt_chars: usize,

    /// Maximum themes kept from the metadata reply
    #[serde(default = "default_max_themes")]
    max_themes: usize,

    /// Deadline for the whole generation chain (seconds)
    #[serde(default)]
    timeout_secs: Option<u64>,
}

fn default_narrative_max_tokens() -> u32 {
    2000
}

fn default_metadata_max_tokens() -> u32 {
    300
}

fn default_title_max_tokens() -> u32 {
    20
}

fn default_summary_max_tokens() -> u32 {
    100
}

fn default_summary_fallback_chars() -> usize {
    200
}

fn default_title_excerpt_chars() -> usize {
    500
}

fn default_max_themes() -> usize {
    5
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            narrative_max_tokens: default_narrative_max_tokens(),
            metadata_max_tokens: default_metadata_max_tokens(),
            title_max_tokens: default_title_max_tokens(),
            summary_max_tokens: default_summary_max_tokens(),
            summary_fallback_chars: default_summary_fallback_chars(),
            title_excerpt_chars: default_title_excerpt_chars(),
            max_themes: default_max_themes(),
            timeout_secs: None,
        }
    }
}

impl PipelineConfig {
    /// Deadline wrapping the narrative, metadata, and title calls.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Reject budgets the backend would refuse.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first zero budget or deadline.
    pub fn validate(&self) -> HeirloomResult<()> {
        let budgets = [
            ("narrative_max_tokens", self.narrative_max_tokens),
            ("metadata_max_tokens", self.metadata_max_tokens),
            ("title_max_tokens", self.title_max_tokens),
            ("summary_max_tokens", self.summary_max_tokens),
        ];
        if let Some((name, _)) = budgets.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::new(format!("{} must be positive", name)).into());
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::new("timeout_secs must be positive when set").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_budgets() {
        let config = PipelineConfig::default();
        assert_eq!(*config.narrative_max_tokens(), 2000);
        assert_eq!(*config.metadata_max_tokens(), 300);
        assert_eq!(*config.title_max_tokens(), 20);
        assert_eq!(*config.summary_fallback_chars(), 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"title_max_tokens": 32, "timeout_secs": 60}"#).unwrap();
        assert_eq!(*config.title_max_tokens(), 32);
        assert_eq!(*config.metadata_max_tokens(), 300);
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let config = PipelineConfigBuilder::default()
            .metadata_max_tokens(0u32)
            .build()
            .unwrap();
        let err = config.validate().unwrap_err();
        assert!(format!("{}", err).contains("metadata_max_tokens"));
    }
}
