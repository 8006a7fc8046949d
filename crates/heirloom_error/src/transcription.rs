//! Transcription error types.

/// Failure of the speech-to-text capability.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transcription Error: {} at line {} in {}", message, line, file)]
pub struct TranscriptionError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TranscriptionError {
    /// Create a new TranscriptionError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
