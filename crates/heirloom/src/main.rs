//! Heirloom CLI binary.
//!
//! - Generate a story from memory files
//! - Summarize a single memory
//! - Show the effective configuration

use clap::Parser;
use heirloom::HeirloomConfig;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, GenerateOptions, run_generate, run_summarize, show_config};

    // Best effort: a missing .env is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HeirloomConfig::from_file(path)?,
        None => HeirloomConfig::load()?,
    }
    .with_api_key(std::env::var("OPENAI_API_KEY").ok());

    #[cfg(feature = "observability")]
    let provider = heirloom::init_observability(
        heirloom::ObservabilityConfig::default(),
        config.logging(),
    )?;
    #[cfg(not(feature = "observability"))]
    heirloom::init_logging(config.logging(), cli.verbose)?;

    let outcome = match cli.command {
        Commands::Generate {
            files,
            name,
            style,
            branch_title,
            branch_type,
        } => {
            run_generate(
                &config,
                GenerateOptions {
                    files,
                    name,
                    style,
                    branch_title,
                    branch_type,
                },
            )
            .await
        }
        Commands::Summarize { file, max_length } => {
            run_summarize(&config, &file, max_length).await
        }
        Commands::Config => show_config(&config),
    };

    #[cfg(feature = "observability")]
    heirloom::shutdown_observability(provider);

    outcome
}
