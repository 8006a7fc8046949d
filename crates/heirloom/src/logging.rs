//! Subscriber setup for the binary.

use crate::config::{LogFormat, LoggingConfig};
use heirloom_error::{ConfigError, HeirloomResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level; `verbose` forces
/// `debug` for the workspace crates.
///
/// # Errors
///
/// Returns a `ConfigError` for an unparseable filter directive or when a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> HeirloomResult<()> {
    let directive = if verbose {
        format!("{},heirloom=debug,heirloom_story=debug,heirloom_models=debug", config.level())
    } else {
        config.level().clone()
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .map_err(|e| ConfigError::new(format!("Invalid log filter '{}': {}", directive, e)))?;

    let fmt_layer = match config.format() {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    Ok(())
}
