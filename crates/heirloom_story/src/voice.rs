//! Voice recordings become fragments through a transcriber.

use heirloom_core::{BranchId, InputKind, NewRawInput, RawInput, UserId};
use heirloom_error::HeirloomResult;
use heirloom_interface::{FragmentRepository, Transcriber};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Language recorded when the transcriber does not report one.
const DEFAULT_LANGUAGE: &str = "en";

/// A finished call recording awaiting transcription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRecording {
    /// Speaker
    pub user_id: UserId,
    /// Telephony call identifier
    pub call_id: String,
    /// Where the audio can be fetched
    pub audio_url: String,
    /// Optional branch to file the fragment under
    #[serde(default)]
    pub branch_id: Option<BranchId>,
}

/// Transcribes recordings and stores them as voice fragments.
pub struct VoiceIngestor<T, R> {
    transcriber: T,
    repository: R,
}

impl<T, R> VoiceIngestor<T, R>
where
    T: Transcriber,
    R: FragmentRepository,
{
    /// Create an ingestor.
    pub fn new(transcriber: T, repository: R) -> Self {
        Self {
            transcriber,
            repository,
        }
    }

    /// Transcribe `recording` and persist the result.
    ///
    /// The stored fragment carries the transcript, the confidence clamped to
    /// 0-100, and `{duration, language}` metadata.
    ///
    /// # Errors
    ///
    /// Fails if transcription fails or the repository rejects the fragment.
    /// Nothing is stored on failure.
    #[instrument(skip(self, recording), fields(user_id = %recording.user_id, call_id = %recording.call_id))]
    pub async fn ingest(&self, recording: VoiceRecording) -> HeirloomResult<RawInput> {
        let transcription = self.transcriber.transcribe(&recording.audio_url).await?;

        let metadata = serde_json::json!({
            "duration": transcription.duration,
            "language": transcription.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
        });

        let input = NewRawInput {
            user_id: recording.user_id,
            branch_id: recording.branch_id,
            kind: InputKind::Voice,
            confidence: Some(transcription.confidence_score()),
            text: Some(transcription.text),
            call_id: Some(recording.call_id),
            audio_url: Some(recording.audio_url),
            metadata: Some(metadata),
        };

        let stored = self.repository.create_input(input).await?;
        info!(input_id = %stored.id, confidence = ?stored.confidence, "Stored voice fragment");
        Ok(stored)
    }
}
