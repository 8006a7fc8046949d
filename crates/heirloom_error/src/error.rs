//! Top-level error wrapper types.

use crate::{
    ConfigError, GenerationError, JsonError, RepositoryError, StoryError, StoryErrorKind,
    TelemetryError, TranscriptionError,
};

/// Every error condition in the workspace.
///
/// # Examples
///
/// ```
/// use heirloom_error::{HeirloomError, JsonError};
///
/// let err: HeirloomError = JsonError::new("unexpected end of input").into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeirloomErrorKind {
    /// Story pipeline precondition failure
    #[from(StoryError)]
    Story(StoryError),
    /// Generative backend failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Fragment repository failure
    #[from(RepositoryError)]
    Repository(RepositoryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Telemetry sink failure
    #[from(TelemetryError)]
    Telemetry(TelemetryError),
    /// Speech-to-text failure
    #[from(TranscriptionError)]
    Transcription(TranscriptionError),
}

/// Heirloom error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Heirloom Error: {}", _0)]
pub struct HeirloomError(Box<HeirloomErrorKind>);

impl HeirloomError {
    /// Create a new error from a kind.
    pub fn new(kind: HeirloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeirloomErrorKind {
        &self.0
    }

    /// Whether this error is a failure of the generative backend.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self.kind(), HeirloomErrorKind::Generation(_))
    }

    /// Whether this error reports that no usable fragments remained.
    pub fn is_no_usable_input(&self) -> bool {
        matches!(
            self.story_kind(),
            Some(StoryErrorKind::NoUsableInput { .. })
        )
    }

    /// Whether this error reports an unresolved memory branch.
    pub fn is_branch_not_found(&self) -> bool {
        matches!(self.story_kind(), Some(StoryErrorKind::BranchNotFound(_)))
    }

    /// The story pipeline kind, if this is a pipeline precondition failure.
    pub fn story_kind(&self) -> Option<&StoryErrorKind> {
        match self.kind() {
            HeirloomErrorKind::Story(err) => Some(&err.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to HeirloomErrorKind
impl<T> From<T> for HeirloomError
where
    T: Into<HeirloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Heirloom operations.
pub type HeirloomResult<T> = std::result::Result<T, HeirloomError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenerationErrorKind, RepositoryErrorKind};

    #[test]
    fn test_story_kind_predicates() {
        let err: HeirloomError = StoryError::new(StoryErrorKind::NoUsableInput {
            user_id: 1,
            requested: 2,
        })
        .into();
        assert!(err.is_no_usable_input());
        assert!(!err.is_branch_not_found());
        assert!(!err.is_generation_failure());
    }

    #[test]
    fn test_generation_failure_predicate() {
        let err: HeirloomError =
            GenerationError::new(GenerationErrorKind::Timeout { seconds: 30 }).into();
        assert!(err.is_generation_failure());
        assert!(err.story_kind().is_none());
        assert!(format!("{}", err).contains("30 seconds"));
    }

    #[test]
    fn test_location_is_recorded() {
        let err = RepositoryError::not_found("story", 9);
        assert_eq!(
            err.kind,
            RepositoryErrorKind::NotFound {
                entity: "story",
                id: 9
            }
        );
        assert!(err.file.ends_with("error.rs"));
    }
}
