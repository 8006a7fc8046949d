//! Core data types for the Heirloom story-generation pipeline.
//!
//! This crate holds the records every other crate speaks in: the raw
//! fragments a storyteller submits, the memory branches that group them, the
//! stories synthesized from them, and the request/response shapes exchanged
//! with the generative backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod branch;
mod generation;
mod ids;
mod input;
mod metadata;
mod story;
mod style;
mod telemetry;
mod transcription;
mod user;

pub use branch::{BranchType, MemoryBranch, NewBranch};
pub use generation::{Generation, GenerationRequest};
pub use ids::{BranchId, InputId, StoryId, UserId};
pub use input::{InputKind, NewRawInput, RawInput};
pub use metadata::StoryMetadata;
pub use story::{NewStory, NewStoryBuilder, NewStoryBuilderError, Story, StoryUpdate};
pub use style::StoryStyle;
pub use telemetry::{TelemetryEvent, TelemetryMap};
pub use transcription::Transcription;
pub use user::{NewUser, User};
