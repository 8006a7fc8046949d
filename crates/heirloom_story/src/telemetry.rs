//! Telemetry sinks beyond the no-op default.

use heirloom_core::{TelemetryEvent, TelemetryMap};
use heirloom_error::{HeirloomResult, TelemetryError};
use heirloom_interface::TelemetrySink;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Writes telemetry as structured `tracing` events under the
/// `heirloom::telemetry` target.
///
/// Text artifacts are logged by length at `info` and in full at `debug`, so
/// fragment text only reaches the output when explicitly enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn log_parameters(&self, parameters: &TelemetryMap) -> HeirloomResult<()> {
        let rendered = serde_json::to_string(parameters)
            .map_err(|e| TelemetryError::new(format!("Unserializable parameters: {}", e)))?;
        info!(target: "heirloom::telemetry", parameters = %rendered, "Run parameters");
        Ok(())
    }

    fn log_text(&self, text: &str, tag: &str) -> HeirloomResult<()> {
        info!(target: "heirloom::telemetry", tag, length = text.chars().count(), "Text artifact");
        debug!(target: "heirloom::telemetry", tag, text, "Text artifact body");
        Ok(())
    }

    fn log_metrics(&self, metrics: &TelemetryMap) -> HeirloomResult<()> {
        let rendered = serde_json::to_string(metrics)
            .map_err(|e| TelemetryError::new(format!("Unserializable metrics: {}", e)))?;
        info!(target: "heirloom::telemetry", metrics = %rendered, "Run metrics");
        Ok(())
    }

    fn log_error(&self, tag: &str, message: &str) -> HeirloomResult<()> {
        info!(target: "heirloom::telemetry", tag, message, "Recorded error");
        Ok(())
    }
}

/// Forwards telemetry as [`TelemetryEvent`]s over a bounded channel.
///
/// Never blocks the pipeline: a full or closed channel is reported as a
/// `TelemetryError`, which the assembler logs and ignores.
///
/// # Examples
///
/// ```
/// use heirloom_core::TelemetryEvent;
/// use heirloom_interface::TelemetrySink;
/// use heirloom_story::ChannelTelemetry;
///
/// let (sink, mut events) = ChannelTelemetry::channel(8);
/// sink.log_text("hello", "raw_input").unwrap();
///
/// match events.try_recv().unwrap() {
///     TelemetryEvent::Text { tag, .. } => assert_eq!(tag, "raw_input"),
///     other => panic!("unexpected event: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ChannelTelemetry {
    sender: mpsc::Sender<TelemetryEvent>,
}

impl ChannelTelemetry {
    /// Wrap an existing sender.
    pub fn new(sender: mpsc::Sender<TelemetryEvent>) -> Self {
        Self { sender }
    }

    /// Create a sink and the receiver draining it.
    ///
    /// A capacity of zero is raised to one.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<TelemetryEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self::new(sender), receiver)
    }

    fn send(&self, event: TelemetryEvent) -> HeirloomResult<()> {
        self.sender.try_send(event).map_err(|e| {
            let reason = match e {
                mpsc::error::TrySendError::Full(_) => "channel full",
                mpsc::error::TrySendError::Closed(_) => "channel closed",
            };
            TelemetryError::new(format!("Telemetry event dropped: {}", reason)).into()
        })
    }
}

impl TelemetrySink for ChannelTelemetry {
    fn log_parameters(&self, parameters: &TelemetryMap) -> HeirloomResult<()> {
        self.send(TelemetryEvent::Parameters(parameters.clone()))
    }

    fn log_text(&self, text: &str, tag: &str) -> HeirloomResult<()> {
        self.send(TelemetryEvent::Text {
            text: text.to_string(),
            tag: tag.to_string(),
        })
    }

    fn log_metrics(&self, metrics: &TelemetryMap) -> HeirloomResult<()> {
        self.send(TelemetryEvent::Metrics(metrics.clone()))
    }

    fn log_error(&self, tag: &str, message: &str) -> HeirloomResult<()> {
        self.send(TelemetryEvent::Error {
            tag: tag.to_string(),
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_channel_reports_error() {
        let (sink, _events) = ChannelTelemetry::channel(1);
        sink.log_error("a", "first").unwrap();
        let err = sink.log_error("b", "second").unwrap_err();
        assert!(format!("{}", err).contains("channel full"));
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let (sink, mut events) = ChannelTelemetry::channel(0);
        sink.log_error("a", "first").unwrap();
        assert!(sink.log_error("b", "second").is_err());
        assert!(events.try_recv().is_ok());
    }

    #[test]
    fn test_closed_channel_reports_error() {
        let (sink, events) = ChannelTelemetry::channel(4);
        drop(events);
        assert!(sink.log_metrics(&TelemetryMap::new()).is_err());
    }

    #[test]
    fn test_tracing_sink_accepts_everything() {
        let sink = TracingTelemetry;
        let mut map = TelemetryMap::new();
        map.insert("story_length".to_string(), serde_json::json!(42));
        assert!(sink.log_parameters(&map).is_ok());
        assert!(sink.log_text("body", "generated_story").is_ok());
        assert!(sink.log_metrics(&map).is_ok());
        assert!(sink.log_error("generation", "boom").is_ok());
    }
}
