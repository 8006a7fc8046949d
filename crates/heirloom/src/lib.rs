//! Heirloom: turn recorded memories into family stories.
//!
//! This facade re-exports the workspace crates and adds what a deployment
//! needs around the pipeline: a layered TOML configuration and logging
//! initialization.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use heirloom::{AssembleRequest, HeirloomConfig, InMemoryFragmentRepository, OpenAiClient, StoryAssembler};
//!
//! # async fn example() -> heirloom::HeirloomResult<()> {
//! let config = HeirloomConfig::load()?;
//! let client = OpenAiClient::new(config.openai().clone())?;
//! let assembler = StoryAssembler::new(client, InMemoryFragmentRepository::new(), config.pipeline().clone());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod logging;
#[cfg(feature = "observability")]
mod observability;

pub use config::{HeirloomConfig, LogFormat, LoggingConfig};
pub use logging::init_logging;
#[cfg(feature = "observability")]
pub use observability::{ObservabilityConfig, init_observability, shutdown_observability};

// Re-export workspace crates
pub use heirloom_core::*;
pub use heirloom_error::*;
pub use heirloom_interface::*;
pub use heirloom_models::*;
pub use heirloom_story::*;
