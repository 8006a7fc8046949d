//! Story assembly: fragments in, persisted story out.

use crate::composer::PromptComposer;
use crate::config::PipelineConfig;
use crate::metadata::MetadataExtractor;
use crate::summarizer::InputSummarizer;
use crate::title::TitleGenerator;
use heirloom_core::{
    BranchId, GenerationRequest, InputId, NewStory, RawInput, Story, StoryId, StoryMetadata,
    StoryStyle, TelemetryMap, UserId,
};
use heirloom_error::{
    GenerationError, GenerationErrorKind, HeirloomResult, StoryError, StoryErrorKind,
};
use heirloom_interface::{FragmentRepository, GenerativeClient, NoopTelemetry, TelemetrySink};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// One request to assemble a story.
///
/// Deserializing accepts any style tag; unknown tags resolve to
/// [`StoryStyle::Narrative`].
///
/// # Examples
///
/// ```
/// use heirloom_core::{BranchId, InputId, StoryStyle, UserId};
/// use heirloom_story::AssembleRequest;
///
/// let request = AssembleRequest::new(UserId(1), vec![InputId(3), InputId(4)])
///     .in_branch(BranchId(2))
///     .with_style_tag("bullet_points");
/// assert_eq!(request.style, StoryStyle::BulletPoints);
///
/// let parsed: AssembleRequest =
///     serde_json::from_str(r#"{"user_id": 1, "input_ids": [3], "style": "sonnet"}"#).unwrap();
/// assert_eq!(parsed.style, StoryStyle::Narrative);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleRequest {
    /// Requesting storyteller
    pub user_id: UserId,
    /// Fragments to draw from, in the order they should appear
    pub input_ids: Vec<InputId>,
    /// Branch providing context and ownership of the result
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    /// Narrative shape
    #[serde(default, deserialize_with = "lenient_style")]
    pub style: StoryStyle,
    /// Existing story this one regenerates
    #[serde(default)]
    pub parent_story_id: Option<StoryId>,
}

fn lenient_style<'de, D>(deserializer: D) -> Result<StoryStyle, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = String::deserialize(deserializer)?;
    Ok(StoryStyle::from_tag(&tag))
}

impl AssembleRequest {
    /// A narrative-style request with no branch.
    pub fn new(user_id: UserId, input_ids: Vec<InputId>) -> Self {
        Self {
            user_id,
            input_ids,
            branch_id: None,
            style: StoryStyle::default(),
            parent_story_id: None,
        }
    }

    /// File the story under a branch and use its context.
    pub fn in_branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: StoryStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the style from a free-form tag.
    pub fn with_style_tag(self, tag: &str) -> Self {
        self.with_style(StoryStyle::from_tag(tag))
    }

    /// Produce the next version of an existing story.
    pub fn regenerate_from(mut self, parent: StoryId) -> Self {
        self.parent_story_id = Some(parent);
        self
    }
}

/// Outputs of the three model calls.
struct GeneratedParts {
    content: String,
    metadata: StoryMetadata,
    title: String,
    tokens_used: u64,
}

/// Orchestrates prompt composition, the three generation calls, and
/// persistence.
///
/// Preconditions are checked before any model call, so a rejected request
/// costs nothing. The narrative, metadata, and title calls run strictly in
/// sequence because each depends on the narrative. Telemetry failures are
/// logged and never change the outcome.
pub struct StoryAssembler<G, R> {
    client: G,
    repository: R,
    telemetry: Arc<dyn TelemetrySink>,
    config: PipelineConfig,
    metadata: MetadataExtractor,
    titles: TitleGenerator,
    summarizer: InputSummarizer,
}

impl<G, R> StoryAssembler<G, R>
where
    G: GenerativeClient,
    R: FragmentRepository,
{
    /// Create an assembler that discards telemetry.
    pub fn new(client: G, repository: R, config: PipelineConfig) -> Self {
        Self {
            metadata: MetadataExtractor::new(
                *config.metadata_max_tokens(),
                *config.summary_fallback_chars(),
                *config.max_themes(),
            ),
            titles: TitleGenerator::new(*config.title_max_tokens(), *config.title_excerpt_chars()),
            summarizer: InputSummarizer::new(*config.summary_max_tokens()),
            client,
            repository,
            telemetry: Arc::new(NoopTelemetry),
            config,
        }
    }

    /// Report to `sink` instead of discarding telemetry.
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// The generative backend.
    pub fn client(&self) -> &G {
        &self.client
    }

    /// The fragment store.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The active settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate, enrich, title, and persist a story.
    ///
    /// # Errors
    ///
    /// - `NoUsableInput` when none of the requested fragments is owned by
    ///   the user and carries text
    /// - `BranchNotFound` when the branch is missing or owned by someone else
    /// - `ParentStoryNotFound` when regenerating from a story that is
    ///   missing or owned by someone else
    /// - a generation error when any backend call fails or the deadline
    ///   passes; nothing is persisted in that case
    #[instrument(
        skip(self, request),
        fields(
            user_id = %request.user_id,
            requested = request.input_ids.len(),
            style = %request.style,
        )
    )]
    pub async fn assemble(&self, request: &AssembleRequest) -> HeirloomResult<Story> {
        let fragments = self.resolve_fragments(request).await?;
        let branch_context = self.resolve_branch_context(request).await?;
        let version = self.resolve_version(request).await?;

        let texts: Vec<&str> = fragments.iter().filter_map(RawInput::usable_text).collect();
        let prompt = PromptComposer::compose(&texts, &branch_context, request.style);

        let mut parameters = TelemetryMap::new();
        parameters.insert("user_id".into(), json!(request.user_id));
        parameters.insert("num_inputs".into(), json!(fragments.len()));
        parameters.insert("style".into(), json!(request.style.to_string()));
        parameters.insert("memory_branch_id".into(), json!(request.branch_id));
        parameters.insert("parent_story_id".into(), json!(request.parent_story_id));
        parameters.insert("provider".into(), json!(self.client.provider_name()));
        parameters.insert("model".into(), json!(self.client.model_name()));
        self.report("parameters", self.telemetry.log_parameters(&parameters));
        self.report("raw_input", self.telemetry.log_text(&texts.join("\n\n"), "raw_input"));

        let parts = match self.generate_parts(prompt).await {
            Ok(parts) => parts,
            Err(e) => {
                error!(error = %e, "Story generation failed");
                self.report("generation", self.telemetry.log_error("generation", &e.to_string()));
                return Err(e);
            }
        };

        let new_story = NewStory {
            user_id: request.user_id,
            branch_id: request.branch_id,
            title: parts.title,
            content: parts.content,
            summary: Some(parts.metadata.summary),
            themes: parts.metadata.themes,
            time_period: parts.metadata.time_period,
            people: parts.metadata.people,
            source_input_ids: fragments.iter().map(|input| input.id).collect(),
            version,
            parent_story_id: request.parent_story_id,
        };
        let story = self.repository.create_story(new_story).await?;

        let mut metrics = TelemetryMap::new();
        metrics.insert("story_length".into(), json!(story.content.chars().count()));
        metrics.insert("num_themes".into(), json!(story.themes.len()));
        metrics.insert("num_people".into(), json!(story.people.len()));
        metrics.insert("tokens_used".into(), json!(parts.tokens_used));
        self.report("generated_story", self.telemetry.log_text(&story.content, "generated_story"));
        self.report("metrics", self.telemetry.log_metrics(&metrics));

        info!(story_id = %story.id, version = story.version, "Story assembled");
        Ok(story)
    }

    /// Summarize a single fragment in roughly `max_length` characters.
    ///
    /// # Errors
    ///
    /// `InputNotFound` or `EmptyInput` before any model call; otherwise the
    /// backend's failure.
    #[instrument(skip(self), fields(input_id = %input_id))]
    pub async fn summarize_input(&self, input_id: InputId, max_length: usize) -> HeirloomResult<String> {
        let input = self
            .repository
            .get_input(input_id)
            .await?
            .ok_or_else(|| StoryError::new(StoryErrorKind::InputNotFound(input_id.get())))?;
        let text = input
            .usable_text()
            .ok_or_else(|| StoryError::new(StoryErrorKind::EmptyInput(input_id.get())))?;

        self.summarizer.summarize(&self.client, text, max_length).await
    }

    /// Owned fragments with text, deduplicated, in request order.
    async fn resolve_fragments(&self, request: &AssembleRequest) -> HeirloomResult<Vec<RawInput>> {
        let mut seen = HashSet::new();
        let ids: Vec<InputId> = request
            .input_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let mut found: HashMap<InputId, RawInput> = self
            .repository
            .inputs_for_user(request.user_id, &ids)
            .await?
            .into_iter()
            .filter(|input| input.user_id == request.user_id)
            .map(|input| (input.id, input))
            .collect();

        let fragments: Vec<RawInput> = ids
            .iter()
            .filter_map(|id| found.remove(id))
            .filter(|input| input.usable_text().is_some())
            .collect();

        debug!(requested = ids.len(), usable = fragments.len(), "Resolved fragments");
        if fragments.is_empty() {
            return Err(StoryError::new(StoryErrorKind::NoUsableInput {
                user_id: request.user_id.get(),
                requested: request.input_ids.len(),
            })
            .into());
        }
        Ok(fragments)
    }

    async fn resolve_branch_context(&self, request: &AssembleRequest) -> HeirloomResult<String> {
        let Some(branch_id) = request.branch_id else {
            return Ok(String::new());
        };
        match self.repository.get_branch(branch_id).await? {
            Some(branch) if branch.user_id == request.user_id => Ok(branch.context_line()),
            _ => Err(StoryError::new(StoryErrorKind::BranchNotFound(branch_id.get())).into()),
        }
    }

    async fn resolve_version(&self, request: &AssembleRequest) -> HeirloomResult<u32> {
        let Some(parent_id) = request.parent_story_id else {
            return Ok(1);
        };
        match self.repository.get_story(parent_id).await? {
            Some(parent) if parent.user_id == request.user_id => Ok(parent.version + 1),
            _ => Err(StoryError::new(StoryErrorKind::ParentStoryNotFound(parent_id.get())).into()),
        }
    }

    async fn generate_parts(&self, prompt: String) -> HeirloomResult<GeneratedParts> {
        let chain = self.run_chain(prompt);
        match self.config.timeout() {
            Some(limit) => tokio::time::timeout(limit, chain).await.map_err(|_| {
                GenerationError::new(GenerationErrorKind::Timeout {
                    seconds: limit.as_secs(),
                })
            })?,
            None => chain.await,
        }
    }

    async fn run_chain(&self, prompt: String) -> HeirloomResult<GeneratedParts> {
        let request = GenerationRequest::new(prompt, *self.config.narrative_max_tokens());
        let narrative = self.client.generate(&request).await?;
        debug!(tokens = narrative.tokens_used, "Narrative generated");

        let metadata = self
            .metadata
            .extract(&self.client, self.telemetry.as_ref(), &narrative.text)
            .await?;
        let title = self.titles.generate(&self.client, &narrative.text).await?;

        Ok(GeneratedParts {
            content: narrative.text,
            metadata,
            title,
            tokens_used: narrative.tokens_used,
        })
    }

    fn report(&self, event: &str, outcome: HeirloomResult<()>) {
        if let Err(e) = outcome {
            warn!(event, error = %e, "Telemetry sink failed, continuing");
        }
    }
}
