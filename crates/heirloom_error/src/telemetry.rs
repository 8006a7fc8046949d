//! Telemetry sink error types.

/// Raised by a telemetry sink that could not accept an event.
///
/// The pipeline never propagates this; it is logged and dropped.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Telemetry Error: {} at line {} in {}", message, line, file)]
pub struct TelemetryError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TelemetryError {
    /// Create a new TelemetryError at the current location.
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
