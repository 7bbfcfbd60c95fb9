//! In-memory conversation store.

use super::filter::{InboxFilter, matches_search};
use super::model::{Conversation, Message, NewMessage};
use tracing::debug;

/// Ordered collection of conversations shown in the inbox list.
///
/// Mutations update the one matching conversation in place; every other
/// conversation is left untouched. Unknown ids are silent no-ops.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
}

impl ConversationStore {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self { conversations }
    }

    /// All conversations in store order.
    pub fn all(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Resets the unread counter and flips every message to read.
    ///
    /// Idempotent. Returns `false` when no conversation has this id.
    pub fn mark_as_read(&mut self, conversation_id: &str) -> bool {
        let Some(conversation) = self.get_mut(conversation_id) else {
            debug!(conversation_id, "mark_as_read: unknown conversation");
            return false;
        };

        conversation.unread_count = 0;
        for message in &mut conversation.messages {
            message.read = true;
        }
        debug!(conversation_id, "Conversation marked as read");
        true
    }

    /// Appends a message stamped with a fresh id and the current time, and
    /// points `last_message` at it.
    ///
    /// The unread counter is not touched. Returns `None` when no conversation
    /// has this id.
    pub fn append(&mut self, conversation_id: &str, new_message: NewMessage) -> Option<&Message> {
        let Some(conversation) = self.get_mut(conversation_id) else {
            debug!(conversation_id, "append: unknown conversation");
            return None;
        };

        let message = new_message.into_message();
        debug!(
            conversation_id,
            message_id = %message.id,
            "Message appended"
        );
        conversation.last_message = Some(message.clone());
        conversation.messages.push(message);
        conversation.messages.last()
    }

    /// Conversations matching `term` (case-insensitive), in store order.
    pub fn search(&self, term: &str) -> Vec<&Conversation> {
        self.query(term, InboxFilter::All)
    }

    pub fn filter(&self, filter: InboxFilter) -> Vec<&Conversation> {
        self.query("", filter)
    }

    /// Conversations matching both the search term and the tab filter.
    pub fn query(&self, term: &str, filter: InboxFilter) -> Vec<&Conversation> {
        let needle = term.trim().to_lowercase();
        self.conversations
            .iter()
            .filter(|c| filter.matches(c) && matches_search(c, &needle))
            .collect()
    }
}
