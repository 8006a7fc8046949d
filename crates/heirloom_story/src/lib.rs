//! Story-generation pipeline for Heirloom.
//!
//! Turns a set of raw fragments plus branch context into a persisted
//! [`Story`](heirloom_core::Story): a narrative from the generative backend,
//! structured metadata extracted from it, and a short title.
//!
//! # Pipeline
//!
//! 1. Resolve the requested fragments, keeping only those the user owns that
//!    carry text. Resolve the optional branch and parent story.
//! 2. Compose the prompt for the requested style.
//! 3. Generate the narrative, then metadata, then the title, strictly in
//!    sequence.
//! 4. Persist the story and emit telemetry.
//!
//! Precondition failures are raised before any model call. A malformed
//! metadata reply is never an error: the extractor substitutes a fallback
//! record.
//!
//! # Example
//!
//! ```rust,ignore
//! use heirloom_story::{AssembleRequest, InMemoryFragmentRepository, PipelineConfig, StoryAssembler};
//! use heirloom_models::{OpenAiClient, OpenAiConfig};
//!
//! # async fn example() -> heirloom_error::HeirloomResult<()> {
//! let client = OpenAiClient::new(OpenAiConfig::default().with_api_key(Some(key)))?;
//! let repository = InMemoryFragmentRepository::new();
//! let assembler = StoryAssembler::new(client, repository, PipelineConfig::default());
//!
//! let story = assembler
//!     .assemble(&AssembleRequest::new(user_id, vec![first, second]).with_style_tag("letter"))
//!     .await?;
//! println!("{}", story.title);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod composer;
mod config;
mod extraction;
mod in_memory_repository;
mod metadata;
mod summarizer;
mod telemetry;
mod title;
mod voice;

pub use assembler::{AssembleRequest, StoryAssembler};
pub use composer::PromptComposer;
pub use config::{PipelineConfig, PipelineConfigBuilder, PipelineConfigBuilderError};
pub use extraction::{extract_json, parse_json};
pub use in_memory_repository::InMemoryFragmentRepository;
pub use metadata::MetadataExtractor;
pub use summarizer::InputSummarizer;
pub use telemetry::{ChannelTelemetry, TracingTelemetry};
pub use title::TitleGenerator;
pub use voice::{VoiceIngestor, VoiceRecording};
