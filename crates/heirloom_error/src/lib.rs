//! Error types for the Heirloom workspace.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with the source location that raised it
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! All of them convert into [`HeirloomError`], so `?` works across crate
//! boundaries.
//!
//! # Examples
//!
//! ```
//! use heirloom_error::{HeirloomResult, StoryError, StoryErrorKind};
//!
//! fn resolve_branch() -> HeirloomResult<()> {
//!     Err(StoryError::new(StoryErrorKind::BranchNotFound(7)))?
//! }
//!
//! let err = resolve_branch().unwrap_err();
//! assert!(err.is_branch_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod json;
mod repository;
mod story;
mod telemetry;
mod transcription;

pub use config::ConfigError;
pub use error::{HeirloomError, HeirloomErrorKind, HeirloomResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use repository::{RepositoryError, RepositoryErrorKind};
pub use story::{StoryError, StoryErrorKind};
pub use telemetry::TelemetryError;
pub use transcription::TranscriptionError;
