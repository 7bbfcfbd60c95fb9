//! In-memory store of AI side-conversations, keyed by base conversation.

use super::model::{AiConversation, AiMessage, AiMessageKind};
use tracing::{debug, warn};
use uuid::Uuid;

/// All AI side-conversations, at most one per base conversation id.
///
/// Entries within one transcript keep call order.
#[derive(Debug, Clone, Default)]
pub struct AiConversationStore {
    conversations: Vec<AiConversation>,
}

impl AiConversationStore {
    pub fn new(conversations: Vec<AiConversation>) -> Self {
        Self { conversations }
    }

    pub fn all(&self) -> &[AiConversation] {
        &self.conversations
    }

    /// The AI conversation attached to `conversation_id`.
    pub fn for_conversation(&self, conversation_id: &str) -> Option<&AiConversation> {
        self.conversations
            .iter()
            .find(|c| c.conversation_id == conversation_id)
    }

    fn for_conversation_mut(&mut self, conversation_id: &str) -> Option<&mut AiConversation> {
        self.conversations
            .iter_mut()
            .find(|c| c.conversation_id == conversation_id)
    }

    /// Finds a transcript entry by id across all AI conversations.
    pub fn find_message(&self, message_id: &str) -> Option<&AiMessage> {
        self.conversations
            .iter()
            .flat_map(|c| c.messages.iter())
            .find(|m| m.id == message_id)
    }

    /// Records a question, creating the AI conversation on first use.
    ///
    /// Always succeeds.
    pub fn add_question(
        &mut self,
        conversation_id: &str,
        text: impl Into<String>,
        original_message_id: Option<String>,
    ) -> &AiMessage {
        let question = AiMessage::new(
            conversation_id,
            AiMessageKind::Question,
            text,
            original_message_id,
        );

        let index = match self
            .conversations
            .iter()
            .position(|c| c.conversation_id == conversation_id)
        {
            Some(index) => {
                self.conversations[index].messages.push(question);
                index
            }
            None => {
                debug!(conversation_id, "Creating AI conversation");
                self.conversations.push(AiConversation {
                    id: Uuid::new_v4().to_string(),
                    conversation_id: conversation_id.to_string(),
                    messages: vec![question],
                });
                self.conversations.len() - 1
            }
        };

        let conversation = &self.conversations[index];
        &conversation.messages[conversation.messages.len() - 1]
    }

    /// Records a response on an existing AI conversation.
    ///
    /// Unlike [`add_question`](Self::add_question) this never creates a
    /// conversation: a response for a conversation without one is dropped and
    /// `None` is returned.
    pub fn add_response(
        &mut self,
        conversation_id: &str,
        content: impl Into<String>,
    ) -> Option<&AiMessage> {
        let Some(conversation) = self.for_conversation_mut(conversation_id) else {
            warn!(
                conversation_id,
                "Dropping AI response: no AI conversation for this conversation"
            );
            return None;
        };

        conversation.messages.push(AiMessage::new(
            conversation_id,
            AiMessageKind::Response,
            content,
            None,
        ));
        conversation.messages.last()
    }
}
