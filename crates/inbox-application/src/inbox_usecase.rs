//! Inbox use cases driven by the agent: replying, selecting text for the
//! copilot, and pulling copilot output into the composer.

use crate::prompt::build_selection_prompt;
use inbox_core::InboxState;
use inbox_core::conversation::{Message, NewMessage};
use tracing::debug;

/// Sends `content` from the current user to the other participant of the
/// selected conversation.
///
/// Blank content is ignored. Non-blank content always clears the composer,
/// even when nothing can be sent (no selection, or no other participant).
/// The content is sent as typed, without trimming.
pub fn send_reply(state: &mut InboxState, content: &str) -> Option<Message> {
    if content.trim().is_empty() {
        return None;
    }

    let current_user_id = state.current_user().id.clone();
    let target = state.selected_conversation().and_then(|conversation| {
        conversation
            .counterpart(&current_user_id)
            .map(|user| (conversation.id.clone(), user.id.clone()))
    });

    let Some((conversation_id, recipient_id)) = target else {
        debug!("No conversation or recipient to reply to");
        state.set_composer_content("");
        return None;
    };

    let message = NewMessage::new(current_user_id, recipient_id, content, true);
    state.append_message(&conversation_id, message).cloned()
}

/// Queues a copilot action for text selected inside a message.
///
/// The selection is trimmed; an empty selection or a missing selected
/// conversation queues nothing. A newer selection replaces any pending one.
pub fn queue_selection_action(
    state: &mut InboxState,
    action_key: &str,
    selected_text: &str,
    message_id: &str,
) -> bool {
    let text = selected_text.trim();
    if text.is_empty() || state.selected_conversation().is_none() {
        return false;
    }

    let prompt = build_selection_prompt(action_key, text);
    state.select_text_for_ai(prompt, message_id);
    true
}

/// Copies an AI message into the composer, replacing its content.
pub fn add_to_composer(state: &mut InboxState, ai_message_id: &str) -> bool {
    let Some(content) = state
        .ai_conversations()
        .find_message(ai_message_id)
        .map(|message| message.content.clone())
    else {
        return false;
    };

    state.set_composer_content(content);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use inbox_core::seed;
    use inbox_core::user::CURRENT_USER_ID;

    #[test]
    fn test_send_reply_appends_to_selected_conversation() {
        let mut state = seed::seed_state();
        state.select_conversation(Some("conv-1"));
        state.set_composer_content("draft");

        let sent = send_reply(&mut state, "Could you share a screenshot?").unwrap();

        assert_eq!(sent.sender_id, CURRENT_USER_ID);
        assert_eq!(sent.recipient_id, "user-1");
        assert!(sent.read);
        let conversation = state.selected_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 4);
        assert_eq!(
            conversation.last_message.as_ref().map(|m| m.id.as_str()),
            Some(sent.id.as_str())
        );
        assert!(state.composer().is_blank());
    }

    #[test]
    fn test_send_reply_ignores_blank_content() {
        let mut state = seed::seed_state();
        state.select_conversation(Some("conv-1"));
        state.set_composer_content("   ");

        assert!(send_reply(&mut state, "   ").is_none());
        assert_eq!(state.selected_conversation().unwrap().messages.len(), 3);
        assert_eq!(state.composer().content(), "   ");
    }

    #[test]
    fn test_send_reply_without_selection_only_clears_composer() {
        let mut state = seed::seed_state();
        state.set_composer_content("hello");

        assert!(send_reply(&mut state, "hello").is_none());
        assert!(state.composer().is_blank());
    }

    #[test]
    fn test_queue_selection_requires_selected_conversation() {
        let mut state = seed::seed_state();
        assert!(!queue_selection_action(&mut state, "rephrase", "text", "msg-1-1"));
        assert!(state.selected_text_action().is_none());

        state.select_conversation(Some("conv-1"));
        assert!(!queue_selection_action(&mut state, "rephrase", "   ", "msg-1-1"));
        assert!(queue_selection_action(&mut state, "translate", " hola ", "msg-1-1"));

        let action = state.selected_text_action().unwrap();
        assert_eq!(
            action.text,
            "Translate this text to English, Spanish, and French: \"hola\""
        );
        assert_eq!(action.message_id, "msg-1-1");
    }

    #[test]
    fn test_add_to_composer_replaces_content() {
        let mut state = seed::seed_state();
        state.set_composer_content("old draft");
        let message_id = state
            .ai_conversations()
            .for_conversation("conv-5")
            .and_then(|ai| ai.messages.iter().find(|m| !m.is_question()))
            .map(|m| m.id.clone())
            .unwrap();

        assert!(add_to_composer(&mut state, &message_id));
        assert_ne!(state.composer().content(), "old draft");
        assert!(!add_to_composer(&mut state, "missing"));
    }
}
