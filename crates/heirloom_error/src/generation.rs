//! Generative backend error types.

/// Failure conditions of the generative text backend.
///
/// Every kind counts as a generation failure: the request that triggered it
/// fails as a whole and nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Transport-level failure (connection, TLS, body read)
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Backend rejected the credentials
    #[display("Authentication failed: {}", _0)]
    Auth(String),
    /// Backend refused the request for quota or rate reasons
    #[display("Rate limit or quota exceeded: {}", _0)]
    RateLimit(String),
    /// Backend returned a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
    /// Backend response could not be decoded
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// Backend returned no choices
    #[display("Backend returned no content")]
    EmptyResponse,
    /// The whole generation chain exceeded its deadline
    #[display("Generation timed out after {} seconds", seconds)]
    Timeout {
        /// Deadline that elapsed
        seconds: u64,
    },
    /// Client misconfiguration (missing key, bad URL)
    #[display("Invalid client configuration: {}", _0)]
    Configuration(String),
}

/// Generation failure with location tracking.
///
/// # Examples
///
/// ```
/// use heirloom_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::RateLimit("quota".into()));
/// assert!(format!("{}", err).contains("quota"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
