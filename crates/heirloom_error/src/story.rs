//! Story pipeline error types.

/// Specific error conditions raised by the story pipeline before any model call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryErrorKind {
    /// None of the requested fragments belong to the user and carry text
    #[display("No usable input for user {}: {} fragment(s) requested, none owned with text", user_id, requested)]
    NoUsableInput {
        /// Requesting user
        user_id: i64,
        /// Number of distinct fragment ids the caller supplied
        requested: usize,
    },
    /// The supplied memory branch does not resolve
    #[display("Memory branch {} not found", _0)]
    BranchNotFound(i64),
    /// The story to regenerate from does not resolve
    #[display("Parent story {} not found", _0)]
    ParentStoryNotFound(i64),
    /// The raw input to summarize does not resolve
    #[display("Input {} not found", _0)]
    InputNotFound(i64),
    /// The raw input to summarize has no text
    #[display("Input {} is empty", _0)]
    EmptyInput(i64),
}

/// Error type for story pipeline operations.
///
/// # Examples
///
/// ```
/// use heirloom_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::BranchNotFound(3));
/// assert!(format!("{}", err).contains("branch 3"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
