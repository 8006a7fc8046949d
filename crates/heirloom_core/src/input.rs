//! Raw inputs: the fragments a storyteller submits.

use crate::{BranchId, InputId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a fragment was captured.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputKind {
    /// Transcribed speech
    Voice,
    /// Typed text
    Text,
}

/// One unit of raw, user-submitted recollection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Identifier
    pub id: InputId,
    /// Owning storyteller
    pub user_id: UserId,
    /// Branch the fragment was filed under
    pub branch_id: Option<BranchId>,
    /// Capture kind
    pub kind: InputKind,
    /// Original text or transcript
    pub text: Option<String>,
    /// Transcript confidence, 0-100; only meaningful for voice
    pub confidence: Option<u8>,
    /// Call the recording came from
    pub call_id: Option<String>,
    /// Location of the recording
    pub audio_url: Option<String>,
    /// Extra capture details (duration, language, ...)
    pub metadata: Option<serde_json::Value>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl RawInput {
    /// The fragment text when it is present and non-empty.
    ///
    /// Fragments without usable text are skipped by the pipeline rather than
    /// rejected. Whitespace-only text counts as text.
    pub fn usable_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

/// Fields supplied when recording a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRawInput {
    /// Owning storyteller
    pub user_id: UserId,
    /// Branch to file the fragment under
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    /// Capture kind
    pub kind: InputKind,
    /// Original text or transcript
    #[serde(default)]
    pub text: Option<String>,
    /// Transcript confidence, 0-100
    #[serde(default)]
    pub confidence: Option<u8>,
    /// Call the recording came from
    #[serde(default)]
    pub call_id: Option<String>,
    /// Location of the recording
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Extra capture details
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl NewRawInput {
    /// A typed-text fragment.
    pub fn text(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            branch_id: None,
            kind: InputKind::Text,
            text: Some(text.into()),
            confidence: None,
            call_id: None,
            audio_url: None,
            metadata: None,
        }
    }

    /// File the fragment under a branch.
    pub fn in_branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }
}
