//! Telemetry sink capability.

use heirloom_core::TelemetryMap;
use heirloom_error::HeirloomResult;

/// Receives structured parameters, text artifacts, and metrics.
///
/// Implementations must not block. Callers treat every error as
/// non-fatal: a degraded sink changes observability, never outcomes.
pub trait TelemetrySink: Send + Sync {
    /// Record run parameters.
    fn log_parameters(&self, parameters: &TelemetryMap) -> HeirloomResult<()>;

    /// Record a text artifact under `tag`.
    fn log_text(&self, text: &str, tag: &str) -> HeirloomResult<()>;

    /// Record numeric results.
    fn log_metrics(&self, metrics: &TelemetryMap) -> HeirloomResult<()>;

    /// Record a non-fatal problem.
    fn log_error(&self, tag: &str, message: &str) -> HeirloomResult<()>;
}

/// Sink that discards everything. The default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn log_parameters(&self, _parameters: &TelemetryMap) -> HeirloomResult<()> {
        Ok(())
    }

    fn log_text(&self, _text: &str, _tag: &str) -> HeirloomResult<()> {
        Ok(())
    }

    fn log_metrics(&self, _metrics: &TelemetryMap) -> HeirloomResult<()> {
        Ok(())
    }

    fn log_error(&self, _tag: &str, _message: &str) -> HeirloomResult<()> {
        Ok(())
    }
}
