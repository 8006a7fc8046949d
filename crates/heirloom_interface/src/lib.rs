//! Trait definitions for the Heirloom story-generation pipeline.
//!
//! The pipeline talks to everything outside itself through these seams: the
//! generative backend, the fragment store, the telemetry sink, and the
//! speech-to-text capability.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod repository;
mod telemetry;
mod traits;

pub use repository::{FragmentRepository, Page};
pub use telemetry::{NoopTelemetry, TelemetrySink};
pub use traits::{GenerativeClient, Transcriber};
