//! The inbox state container.
//!
//! `InboxState` is constructed explicitly and passed to whoever drives the
//! UI. It has exactly one owner; all mutations go through `&mut self`, and
//! asynchronous work reports back to that owner instead of touching the state
//! directly.

use crate::composer::Composer;
use crate::conversation::{Conversation, ConversationStore, Message, NewMessage};
use crate::copilot::{AiConversation, AiConversationStore, AiMessage};
use crate::selection::{SelectedTextAction, SelectionSlot};
use crate::user::User;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct InboxState {
    current_user: User,
    conversations: ConversationStore,
    ai_conversations: AiConversationStore,
    selected_conversation_id: Option<String>,
    selection: SelectionSlot,
    composer: Composer,
}

impl InboxState {
    pub fn new(
        current_user: User,
        conversations: Vec<Conversation>,
        ai_conversations: Vec<AiConversation>,
    ) -> Self {
        Self {
            current_user,
            conversations: ConversationStore::new(conversations),
            ai_conversations: AiConversationStore::new(ai_conversations),
            selected_conversation_id: None,
            selection: SelectionSlot::default(),
            composer: Composer::default(),
        }
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    pub fn ai_conversations(&self) -> &AiConversationStore {
        &self.ai_conversations
    }

    // ========================================================================
    // Conversation selection
    // ========================================================================

    /// Selects a conversation (or clears the selection) and marks it as read.
    ///
    /// An unknown id is still stored; lookups for it simply return `None`.
    pub fn select_conversation(&mut self, id: Option<&str>) {
        debug!(conversation_id = ?id, "Selecting conversation");
        self.selected_conversation_id = id.map(str::to_string);
        if let Some(id) = id {
            self.mark_as_read(id);
        }
    }

    pub fn selected_conversation_id(&self) -> Option<&str> {
        self.selected_conversation_id.as_deref()
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.selected_conversation_id
            .as_deref()
            .and_then(|id| self.conversations.get(id))
    }

    pub fn mark_as_read(&mut self, conversation_id: &str) -> bool {
        self.conversations.mark_as_read(conversation_id)
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Appends a message to a conversation and clears the composer.
    ///
    /// The composer is cleared even when `conversation_id` is unknown, in
    /// which case nothing else changes and `None` is returned.
    pub fn append_message(
        &mut self,
        conversation_id: &str,
        new_message: NewMessage,
    ) -> Option<&Message> {
        self.composer.clear();
        self.conversations.append(conversation_id, new_message)
    }

    // ========================================================================
    // AI side-conversations
    // ========================================================================

    pub fn add_ai_question(
        &mut self,
        conversation_id: &str,
        text: impl Into<String>,
        original_message_id: Option<String>,
    ) -> &AiMessage {
        self.ai_conversations
            .add_question(conversation_id, text, original_message_id)
    }

    pub fn add_ai_response(
        &mut self,
        conversation_id: &str,
        content: impl Into<String>,
    ) -> Option<&AiMessage> {
        self.ai_conversations.add_response(conversation_id, content)
    }

    pub fn ai_conversation_for_selected(&self) -> Option<&AiConversation> {
        self.selected_conversation_id
            .as_deref()
            .and_then(|id| self.ai_conversations.for_conversation(id))
    }

    // ========================================================================
    // Selected text action
    // ========================================================================

    pub fn select_text_for_ai(&mut self, text: impl Into<String>, message_id: impl Into<String>) {
        self.selection.set(SelectedTextAction::new(text, message_id));
    }

    pub fn selected_text_action(&self) -> Option<&SelectedTextAction> {
        self.selection.peek()
    }

    pub fn take_selected_text_action(&mut self) -> Option<SelectedTextAction> {
        self.selection.take()
    }

    // ========================================================================
    // Composer
    // ========================================================================

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn set_composer_content(&mut self, content: impl Into<String>) {
        self.composer.set(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn state() -> InboxState {
        seed::seed_state()
    }

    #[test]
    fn test_starts_with_nothing_selected() {
        let state = state();
        assert!(state.selected_conversation_id().is_none());
        assert!(state.selected_conversation().is_none());
        assert!(state.ai_conversation_for_selected().is_none());
        assert!(state.selected_text_action().is_none());
        assert_eq!(state.composer().content(), "");
    }

    #[test]
    fn test_selecting_unread_conversation_reads_it_once() {
        let mut state = state();
        assert_eq!(state.conversations().get("conv-1").unwrap().unread_count, 1);

        state.select_conversation(Some("conv-1"));
        let conv = state.selected_conversation().unwrap();
        assert_eq!(conv.id, "conv-1");
        assert_eq!(conv.unread_count, 0);
        assert!(conv.messages.iter().all(|m| m.read));

        state.select_conversation(Some("conv-1"));
        assert_eq!(state.selected_conversation().unwrap().unread_count, 0);
    }

    #[test]
    fn test_clearing_selection_keeps_conversations() {
        let mut state = state();
        state.select_conversation(Some("conv-4"));
        state.select_conversation(None);
        assert!(state.selected_conversation().is_none());
        assert_eq!(state.conversations().get("conv-4").unwrap().unread_count, 0);
    }

    #[test]
    fn test_selecting_unknown_id_yields_no_conversation() {
        let mut state = state();
        state.select_conversation(Some("conv-404"));
        assert_eq!(state.selected_conversation_id(), Some("conv-404"));
        assert!(state.selected_conversation().is_none());
    }

    #[test]
    fn test_append_clears_composer() {
        let mut state = state();
        state.set_composer_content("Thanks, processing your refund now.");
        let before = state.conversations().get("conv-1").unwrap().messages.len();

        state.append_message(
            "conv-1",
            NewMessage::new("current-user", "user-1", "Thanks, processing your refund now.", true),
        );

        assert_eq!(state.composer().content(), "");
        assert_eq!(
            state.conversations().get("conv-1").unwrap().messages.len(),
            before + 1
        );
    }

    #[test]
    fn test_append_to_unknown_conversation_changes_nothing_else() {
        let mut state = state();
        let before = state.conversations().all().to_vec();
        state.set_composer_content("draft");

        assert!(
            state
                .append_message("conv-404", NewMessage::new("current-user", "x", "hi", true))
                .is_none()
        );
        assert_eq!(state.conversations().all(), before.as_slice());
        assert_eq!(state.composer().content(), "");
    }

    #[test]
    fn test_ai_conversation_follows_selection() {
        let mut state = state();
        state.select_conversation(Some("conv-5"));
        assert_eq!(
            state.ai_conversation_for_selected().unwrap().conversation_id,
            "conv-5"
        );

        state.select_conversation(Some("conv-2"));
        assert!(state.ai_conversation_for_selected().is_none());

        state.add_ai_question("conv-2", "How should I respond?", None);
        assert_eq!(state.ai_conversation_for_selected().unwrap().messages.len(), 1);
    }

    #[test]
    fn test_selected_text_action_roundtrip() {
        let mut state = state();
        state.select_text_for_ai("Make this message more formal and professional: \"hi\"", "msg-1-3");
        assert_eq!(state.selected_text_action().unwrap().message_id, "msg-1-3");

        let taken = state.take_selected_text_action().unwrap();
        assert!(taken.text.starts_with("Make this message"));
        assert!(state.selected_text_action().is_none());
        assert!(state.take_selected_text_action().is_none());
    }
}
