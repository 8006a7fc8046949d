//! Speech-to-text results.

use serde::{Deserialize, Serialize};

/// A transcribed recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcript text
    pub text: String,
    /// Confidence reported by the transcriber, nominally 0-100
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Recording length in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// Spoken language code
    #[serde(default)]
    pub language: Option<String>,
}

impl Transcription {
    /// Confidence clamped into the 0-100 range stored on a fragment.
    pub fn confidence_score(&self) -> u8 {
        self.confidence
            .map(|c| c.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        let mut t = Transcription {
            text: "hello".into(),
            confidence: Some(142.0),
            duration: None,
            language: None,
        };
        assert_eq!(t.confidence_score(), 100);
        t.confidence = Some(-3.0);
        assert_eq!(t.confidence_score(), 0);
        t.confidence = Some(94.6);
        assert_eq!(t.confidence_score(), 95);
        t.confidence = None;
        assert_eq!(t.confidence_score(), 0);
    }
}
