//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Heirloom - turn recorded memories into family stories
#[derive(Parser, Debug)]
#[command(name = "heirloom")]
#[command(about = "Turn recorded memories into family stories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story from memory files, one fragment per file
    Generate {
        /// Text files holding the memories, in story order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Storyteller's name
        #[arg(long, default_value = "Storyteller")]
        name: String,

        /// Story style: narrative, bullet_points, timeline, or letter
        #[arg(long, default_value = "narrative")]
        style: String,

        /// Title of the memory branch the story belongs to
        #[arg(long)]
        branch_title: Option<String>,

        /// Branch category, e.g. childhood or career
        #[arg(long, default_value = "general", requires = "branch_title")]
        branch_type: String,
    },

    /// Summarize a single memory file
    Summarize {
        /// Text file holding the memory
        file: PathBuf,

        /// Requested summary length in characters
        #[arg(long, default_value_t = 200)]
        max_length: usize,
    },

    /// Print the effective configuration
    Config,
}
