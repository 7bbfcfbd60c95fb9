//! OpenAiCompletionClient - direct REST client for OpenAI-compatible chat completions.
//!
//! Configuration priority: ~/.config/inbox/secret.json > environment variables

use crate::completion::{CompletionError, CompletionService};
use async_trait::async_trait;
use inbox_core::config::CompletionConfig;
use inbox_infrastructure::ConfigService;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Completion service backed by an OpenAI-compatible HTTP endpoint.
///
/// No timeout is configured on the underlying client.
#[derive(Clone)]
pub struct OpenAiCompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiCompletionClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Loads configuration from ~/.config/inbox/secret.json or environment variables.
    pub fn try_from_env() -> inbox_core::error::Result<Self> {
        let config = ConfigService::new().completion_config()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.config.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
        }
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, CompletionError> {
        let endpoint = self.config.endpoint();
        info!(%endpoint, model = %body.model, "Sending completion request");

        let response = self
            .client
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| CompletionError::Request(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Parse(err.to_string()))?;

        let text = extract_text_response(parsed)?;
        debug!(len = text.len(), "Completion received");
        Ok(text)
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = self.build_request(prompt);
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> CompletionError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    CompletionError::Status {
        status: status.as_u16(),
        message,
    }
}
