//! Shared fakes for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use heirloom_core::{
    BranchType, Generation, GenerationRequest, InputId, MemoryBranch, NewBranch, NewRawInput,
    NewUser, TelemetryEvent, TelemetryMap, User,
};
use heirloom_error::{
    GenerationError, GenerationErrorKind, HeirloomResult, TelemetryError,
};
use heirloom_interface::{FragmentRepository, GenerativeClient, TelemetrySink};
use heirloom_story::InMemoryFragmentRepository;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted backend reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(u16),
    Slow(Duration, String),
}

/// Backend that replays scripted replies and records every request.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl ScriptedClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::scripted(replies.into_iter().map(|s| Reply::Text(s.into())))
    }

    pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn generate(&self, request: &GenerationRequest) -> HeirloomResult<Generation> {
        self.calls.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::Text(String::new()));

        match reply {
            Reply::Text(text) => Ok(Generation {
                tokens_used: text.split_whitespace().count() as u64,
                text,
            }),
            Reply::Fail(status) => Err(GenerationError::new(GenerationErrorKind::Api {
                status,
                message: "scripted failure".to_string(),
            })
            .into()),
            Reply::Slow(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(Generation { text, tokens_used: 0 })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-v1"
    }
}

/// Sink that keeps every event in memory.
#[derive(Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn error_tags(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TelemetryEvent::Error { tag, .. } => Some(tag),
                _ => None,
            })
            .collect()
    }

    pub fn text_tags(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TelemetryEvent::Text { tag, .. } => Some(tag),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: TelemetryEvent) -> HeirloomResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn log_parameters(&self, parameters: &TelemetryMap) -> HeirloomResult<()> {
        self.push(TelemetryEvent::Parameters(parameters.clone()))
    }

    fn log_text(&self, text: &str, tag: &str) -> HeirloomResult<()> {
        self.push(TelemetryEvent::Text {
            text: text.to_string(),
            tag: tag.to_string(),
        })
    }

    fn log_metrics(&self, metrics: &TelemetryMap) -> HeirloomResult<()> {
        self.push(TelemetryEvent::Metrics(metrics.clone()))
    }

    fn log_error(&self, tag: &str, message: &str) -> HeirloomResult<()> {
        self.push(TelemetryEvent::Error {
            tag: tag.to_string(),
            message: message.to_string(),
        })
    }
}

/// Sink that rejects everything.
pub struct FailingTelemetry;

impl TelemetrySink for FailingTelemetry {
    fn log_parameters(&self, _parameters: &TelemetryMap) -> HeirloomResult<()> {
        Err(TelemetryError::new("sink offline").into())
    }

    fn log_text(&self, _text: &str, _tag: &str) -> HeirloomResult<()> {
        Err(TelemetryError::new("sink offline").into())
    }

    fn log_metrics(&self, _metrics: &TelemetryMap) -> HeirloomResult<()> {
        Err(TelemetryError::new("sink offline").into())
    }

    fn log_error(&self, _tag: &str, _message: &str) -> HeirloomResult<()> {
        Err(TelemetryError::new("sink offline").into())
    }
}

pub async fn seed_user(repo: &InMemoryFragmentRepository, name: &str) -> User {
    repo.create_user(NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone_number: None,
    })
    .await
    .unwrap()
}

pub async fn seed_branch(
    repo: &InMemoryFragmentRepository,
    user: &User,
    branch_type: BranchType,
    title: &str,
) -> MemoryBranch {
    repo.create_branch(NewBranch {
        user_id: user.id,
        branch_type,
        title: title.to_string(),
        description: None,
    })
    .await
    .unwrap()
}

pub async fn seed_text(repo: &InMemoryFragmentRepository, user: &User, text: &str) -> InputId {
    repo.create_input(NewRawInput::text(user.id, text))
        .await
        .unwrap()
        .id
}

pub const METADATA_JSON: &str = r#"{"themes": ["family", "farm life"], "people": ["Max"], "time_period": "1960s", "summary": "Growing up on a farm with a dog named Max."}"#;
