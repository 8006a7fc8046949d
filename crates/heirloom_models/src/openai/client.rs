use super::OpenAiConfig;
use super::dto::{ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use heirloom_core::{Generation, GenerationRequest};
use heirloom_error::{GenerationError, GenerationErrorKind, HeirloomResult};
use heirloom_interface::GenerativeClient;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Chat-completions client for OpenAI and compatible servers.
///
/// Each [`generate`](GenerativeClient::generate) call sends the configured
/// system prompt plus the caller's prompt as a single user message. There is
/// no retry: the first failure is returned.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
    api_key: String,
}

impl OpenAiClient {
    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Fails if the configuration carries no API key or the HTTP client
    /// cannot be built.
    pub fn new(config: OpenAiConfig) -> HeirloomResult<Self> {
        let api_key = config
            .api_key()
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::Configuration(
                    "API key is not configured".to_string(),
                ))
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Configuration(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        debug!(model = %config.model(), base_url = %config.base_url(), "Creating OpenAI client");
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url().trim_end_matches('/')
        )
    }

    fn status_error(status: StatusCode, body: String) -> GenerationError {
        let kind = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationErrorKind::Auth(body),
            StatusCode::TOO_MANY_REQUESTS => GenerationErrorKind::RateLimit(body),
            _ => GenerationErrorKind::Api {
                status: status.as_u16(),
                message: body,
            },
        };
        GenerationError::new(kind)
    }
}

#[async_trait]
impl GenerativeClient for OpenAiClient {
    #[instrument(skip(self, request), fields(provider = "openai", model = %self.config.model(), max_tokens = request.max_tokens))]
    async fn generate(&self, request: &GenerationRequest) -> HeirloomResult<Generation> {
        let body = ChatRequest {
            model: self.config.model(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.config.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: *self.config.temperature(),
        };

        debug!(prompt_len = request.prompt.len(), "Sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat completion request");
                GenerationError::new(GenerationErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat completion request rejected");
            return Err(Self::status_error(status, body).into());
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat completion response");
            GenerationError::new(GenerationErrorKind::Parse(e.to_string()))
        })?;

        let tokens_used = parsed.usage.map(|u| u.total_tokens).unwrap_or(0);
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;
        let text = choice.message.content.unwrap_or_default();

        debug!(tokens_used, reply_len = text.len(), "Received chat completion");
        Ok(Generation { text, tokens_used })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
