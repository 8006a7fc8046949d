//! Command-line interface module.
//!
//! Fragments are loaded into an in-memory repository for the duration of a
//! single command; nothing persists between runs.

mod commands;
mod generate;
mod show_config;
mod summarize;

pub use commands::{Cli, Commands};
pub use generate::{GenerateOptions, run_generate};
pub use show_config::show_config;
pub use summarize::run_summarize;

use heirloom::{HeirloomConfig, HeirloomResult, OpenAiClient, StoryAssembler, TelemetrySink};
use heirloom::{InMemoryFragmentRepository, NoopTelemetry, TracingTelemetry};
use std::sync::Arc;

/// Build an assembler over a fresh in-memory repository.
fn build_assembler(
    config: &HeirloomConfig,
) -> HeirloomResult<StoryAssembler<OpenAiClient, InMemoryFragmentRepository>> {
    let client = OpenAiClient::new(config.openai().clone())?;
    let telemetry: Arc<dyn TelemetrySink> = if *config.logging().telemetry() {
        Arc::new(TracingTelemetry)
    } else {
        Arc::new(NoopTelemetry)
    };
    Ok(StoryAssembler::new(
        client,
        InMemoryFragmentRepository::new(),
        config.pipeline().clone(),
    )
    .with_telemetry(telemetry))
}
