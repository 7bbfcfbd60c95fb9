//! AI side-conversations.
//!
//! Each base conversation owns at most one AI conversation: the transcript of
//! questions asked of the copilot and the responses it returned. It is created
//! lazily by the first question and never deleted.

mod model;
mod store;

pub use model::{AiConversation, AiMessage, AiMessageKind};
pub use store::AiConversationStore;
