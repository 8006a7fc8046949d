//! Layered configuration for the Heirloom binary.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from heirloom.toml)
//! - `~/.config/heirloom/heirloom.toml`
//! - `./heirloom.toml`
//! - `HEIRLOOM__<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use heirloom_error::{ConfigError, HeirloomError, HeirloomResult};
use heirloom_models::OpenAiConfig;
use heirloom_story::PipelineConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../heirloom.toml");

/// Output shape for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `heirloom_story=debug`
    #[serde(default = "default_level")]
    level: String,

    /// Line format
    #[serde(default)]
    format: LogFormat,

    /// Emit pipeline telemetry as tracing events
    #[serde(default)]
    telemetry: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            telemetry: false,
        }
    }
}

/// Top-level Heirloom configuration.
///
/// # Example
///
/// ```no_run
/// use heirloom::HeirloomConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HeirloomConfig::load()?;
/// println!("Model: {}", config.openai().model());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct HeirloomConfig {
    /// Token budgets and limits for story assembly
    #[serde(default)]
    pipeline: PipelineConfig,

    /// Generative backend connection
    #[serde(default)]
    openai: OpenAiConfig,

    /// Log output
    #[serde(default)]
    logging: LoggingConfig,
}

impl HeirloomConfig {
    /// Load with precedence: environment > current dir > home dir > bundled
    /// defaults.
    ///
    /// Missing user files are skipped.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a present file is malformed or the merged
    /// result fails validation.
    #[instrument]
    pub fn load() -> HeirloomResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/heirloom/heirloom.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("heirloom").required(false))
            .add_source(Environment::with_prefix("HEIRLOOM").separator("__"));

        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with a single TOML document.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the document is malformed or fails
    /// validation.
    pub fn from_toml_str(toml: &str) -> HeirloomResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with one file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file is missing, malformed, or fails
    /// validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> HeirloomResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Replace the API key, typically with one read from the environment.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if api_key.is_some() {
            self.openai = self.openai.with_api_key(api_key);
        }
        self
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> HeirloomResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                HeirloomError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HeirloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.pipeline.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_parse() {
        let config = HeirloomConfig::from_toml_str("").unwrap();
        assert_eq!(*config.pipeline().narrative_max_tokens(), 2000);
        assert_eq!(config.openai().model(), "gpt-4");
        assert_eq!(config.logging().format(), &LogFormat::Text);
        assert!(config.openai().api_key().is_none());
    }

    #[test]
    fn test_api_key_only_replaced_when_present() {
        let config = HeirloomConfig::default().with_api_key(Some("sk-test".into()));
        assert_eq!(config.openai().api_key().as_deref(), Some("sk-test"));
        let config = config.with_api_key(None);
        assert_eq!(config.openai().api_key().as_deref(), Some("sk-test"));
    }
}
