//! CopilotService - dispatches copilot questions to the completion service.
//!
//! Questions are recorded on the inbox state immediately. The completion
//! itself runs on a spawned task that never touches the state: it sends a
//! [`CopilotReply`] back over a channel, and the owner of the state applies it
//! with [`apply_reply`].

use crate::prompt::CopilotSuggestion;
use inbox_core::InboxState;
use inbox_core::copilot::AiMessage;
use inbox_interaction::{CompletionError, CompletionService};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Response text substituted for any failed completion.
pub const APOLOGY_MESSAGE: &str =
    "I apologize, but I encountered an error processing your request. Please try again.";

/// Outcome of one completion request, addressed to a conversation.
#[derive(Debug)]
pub struct CopilotReply {
    pub conversation_id: String,
    pub result: Result<String, CompletionError>,
}

impl CopilotReply {
    /// The response text to record; failures become [`APOLOGY_MESSAGE`].
    pub fn into_content(self) -> String {
        match self.result {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    conversation_id = %self.conversation_id,
                    error = %err,
                    "Completion failed, replying with apology"
                );
                APOLOGY_MESSAGE.to_string()
            }
        }
    }
}

/// Records a reply as an AI response.
///
/// Returns `None` when the conversation has no AI side-conversation, in which
/// case the reply is dropped.
pub fn apply_reply(state: &mut InboxState, reply: CopilotReply) -> Option<AiMessage> {
    let conversation_id = reply.conversation_id.clone();
    let content = reply.into_content();
    state.add_ai_response(&conversation_id, content).cloned()
}

/// Runs a single completion and wraps the outcome.
pub async fn request_completion(
    completion: &dyn CompletionService,
    conversation_id: impl Into<String>,
    prompt: &str,
) -> CopilotReply {
    CopilotReply {
        conversation_id: conversation_id.into(),
        result: completion.complete(prompt).await,
    }
}

pub struct CopilotService {
    completion: Arc<dyn CompletionService>,
    replies: mpsc::UnboundedSender<CopilotReply>,
}

impl CopilotService {
    /// Creates the service along with the receiver its replies arrive on.
    pub fn new(
        completion: Arc<dyn CompletionService>,
    ) -> (Self, mpsc::UnboundedReceiver<CopilotReply>) {
        let (replies, rx) = mpsc::unbounded_channel();
        (
            Self {
                completion,
                replies,
            },
            rx,
        )
    }

    /// Consumes the pending selected-text action, if any.
    ///
    /// Requires a selected conversation; without one the action stays
    /// pending. The action's text is recorded as a question anchored to its
    /// message, the slot is cleared, and the completion is dispatched.
    pub fn process_selected_text(&self, state: &mut InboxState) -> Option<JoinHandle<()>> {
        let conversation_id = state.selected_conversation_id()?.to_string();
        let action = state.take_selected_text_action()?;

        state.add_ai_question(
            &conversation_id,
            action.text.clone(),
            Some(action.message_id),
        );
        Some(self.dispatch(conversation_id, action.text))
    }

    /// Records a free-form question on the selected conversation and dispatches it.
    ///
    /// Blank questions are ignored. Anything else is recorded and sent as
    /// typed, surrounding whitespace included.
    pub fn ask(&self, state: &mut InboxState, question: &str) -> Option<JoinHandle<()>> {
        if question.trim().is_empty() {
            return None;
        }
        let conversation_id = state.selected_conversation_id()?.to_string();

        state.add_ai_question(&conversation_id, question, None);
        Some(self.dispatch(conversation_id, question.to_string()))
    }

    pub fn suggest(
        &self,
        state: &mut InboxState,
        suggestion: CopilotSuggestion,
    ) -> Option<JoinHandle<()>> {
        self.ask(state, suggestion.prompt())
    }

    fn dispatch(&self, conversation_id: String, prompt: String) -> JoinHandle<()> {
        debug!(%conversation_id, "Dispatching copilot request");
        let completion = Arc::clone(&self.completion);
        let replies = self.replies.clone();

        tokio::spawn(async move {
            let reply = request_completion(completion.as_ref(), conversation_id, &prompt).await;
            if replies.send(reply).is_err() {
                debug!("Reply receiver dropped; discarding copilot reply");
            }
        })
    }
}
