//! Settings for the chat-completions client.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Connection and sampling settings for an OpenAI-compatible backend.
///
/// Every field has a default, so a TOML section only needs the values it
/// overrides:
///
/// ```toml
/// [openai]
/// model = "gpt-4o"
/// temperature = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct OpenAiConfig {
    /// API root, without the trailing `/chat/completions`
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,

    /// System message sent with every prompt
    #[serde(default = "default_system_prompt")]
    system_prompt: String,

    /// Per-request HTTP timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Bearer token; never serialized back out
    #[serde(default, skip_serializing)]
    api_key: Option<String>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_system_prompt() -> String {
    "You are a compassionate storyteller helping preserve family memories.".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}
