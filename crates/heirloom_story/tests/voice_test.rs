//! Tests for voice ingestion.

mod common;

use async_trait::async_trait;
use common::{seed_branch, seed_user};
use heirloom_core::{BranchType, InputKind, Transcription};
use heirloom_error::{HeirloomResult, TranscriptionError};
use heirloom_interface::{FragmentRepository, Page, Transcriber};
use heirloom_story::{InMemoryFragmentRepository, VoiceIngestor, VoiceRecording};

struct FixedTranscriber {
    transcription: Option<Transcription>,
}

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, audio_url: &str) -> HeirloomResult<Transcription> {
        self.transcription
            .clone()
            .ok_or_else(|| TranscriptionError::new(format!("cannot fetch {}", audio_url)).into())
    }
}

#[tokio::test]
async fn test_ingest_stores_voice_fragment() {
    let repo = InMemoryFragmentRepository::new();
    let user = seed_user(&repo, "Ada").await;
    let branch = seed_branch(&repo, &user, BranchType::Childhood, "Childhood").await;

    let ingestor = VoiceIngestor::new(
        FixedTranscriber {
            transcription: Some(Transcription {
                text: "I remember the old barn.".to_string(),
                confidence: Some(131.0),
                duration: Some(42.5),
                language: None,
            }),
        },
        repo.clone(),
    );

    let stored = ingestor
        .ingest(VoiceRecording {
            user_id: user.id,
            call_id: "CA123".to_string(),
            audio_url: "https://audio.example.com/CA123.wav".to_string(),
            branch_id: Some(branch.id),
        })
        .await
        .unwrap();

    assert_eq!(stored.kind, InputKind::Voice);
    assert_eq!(stored.usable_text(), Some("I remember the old barn."));
    assert_eq!(stored.confidence, Some(100));
    assert_eq!(stored.call_id.as_deref(), Some("CA123"));
    assert_eq!(stored.branch_id, Some(branch.id));

    let metadata = stored.metadata.unwrap();
    assert_eq!(metadata["language"], "en");
    assert_eq!(metadata["duration"], 42.5);
}

#[tokio::test]
async fn test_failed_transcription_stores_nothing() {
    let repo = InMemoryFragmentRepository::new();
    let user = seed_user(&repo, "Ada").await;

    let ingestor = VoiceIngestor::new(FixedTranscriber { transcription: None }, repo.clone());
    let result = ingestor
        .ingest(VoiceRecording {
            user_id: user.id,
            call_id: "CA404".to_string(),
            audio_url: "https://audio.example.com/missing.wav".to_string(),
            branch_id: None,
        })
        .await;

    assert!(result.is_err());
    assert!(repo.list_inputs(user.id, Page::default()).await.unwrap().is_empty());
}
