//! Outbound copilot calls.
//!
//! `CompletionService` is the seam between the copilot pipeline and the
//! chat-completion endpoint; `OpenAiCompletionClient` is the HTTP
//! implementation.

pub mod completion;
pub mod openai_completion_client;

pub use completion::{CompletionError, CompletionService};
pub use openai_completion_client::OpenAiCompletionClient;
