//! Fragment repository error types.

/// Kinds of repository errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RepositoryErrorKind {
    /// Entity lookup failed
    #[display("{} {} not found", entity, id)]
    NotFound {
        /// Entity name (e.g. "story")
        entity: &'static str,
        /// Identifier that did not resolve
        id: i64,
    },
    /// Write rejected because it conflicts with existing data
    #[display("Conflict: {}", _0)]
    Conflict(String),
    /// Backend failure
    #[display("Repository backend error: {}", _0)]
    Backend(String),
}

/// Repository error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Repository Error: {} at line {} in {}", kind, line, file)]
pub struct RepositoryError {
    /// The kind of error that occurred
    pub kind: RepositoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RepositoryError {
    /// Create a new repository error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RepositoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`RepositoryErrorKind::NotFound`] error.
    #[track_caller]
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::new(RepositoryErrorKind::NotFound { entity, id })
    }
}
