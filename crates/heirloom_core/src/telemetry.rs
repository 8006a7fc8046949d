//! Structured telemetry events.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named values attached to a telemetry event.
pub type TelemetryMap = BTreeMap<String, serde_json::Value>;

/// One event emitted to a telemetry sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Run parameters
    Parameters(TelemetryMap),
    /// A text artifact
    Text {
        /// Artifact body
        text: String,
        /// Artifact kind, e.g. "raw_input" or "generated_story"
        tag: String,
    },
    /// Numeric results
    Metrics(TelemetryMap),
    /// A non-fatal problem worth recording
    Error {
        /// Problem kind
        tag: String,
        /// Description
        message: String,
    },
}
