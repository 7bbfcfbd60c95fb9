//! Completion service configuration.
//!
//! Secrets are read from `~/.config/inbox/secret.json` by the infrastructure
//! crate; this module only holds the shapes and defaults.

use serde::Deserialize;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.chatanywhere.tech/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful customer service AI assistant. Provide clear, professional responses.";

/// Root structure of secret.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiSecret>,
}

/// OpenAI-compatible endpoint credentials
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Everything the completion client needs to issue a request.
///
/// An empty `api_key` is allowed; requests then go out unauthenticated and
/// fail at the remote end.
#[derive(Clone, PartialEq)]
pub struct CompletionConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub system_prompt: String,
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The chat-completions endpoint under `base_url`.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl From<OpenAiSecret> for CompletionConfig {
    fn from(secret: OpenAiSecret) -> Self {
        let mut config = Self::new(secret.api_key);
        if let Some(model) = secret.model_name {
            config.model = model;
        }
        if let Some(base_url) = secret.base_url {
            config.base_url = base_url;
        }
        config
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<empty>" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}
