use async_trait::async_trait;
use thiserror::Error;

/// Why a completion call produced no text.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never got a response (DNS, connect, TLS, body read).
    #[error("Completion request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-2xx status.
    #[error("Completion endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not a chat-completion response.
    #[error("Failed to parse completion response: {0}")]
    Parse(String),

    /// The response parsed but carried no content.
    #[error("Completion response contained no content")]
    EmptyResponse,
}

/// Turns a prompt into free text.
///
/// One call is one request: implementations do not retry.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
