//! Inbox list filtering.

use super::model::Conversation;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Tabs above the conversation list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum InboxFilter {
    #[default]
    All,
    /// Conversations whose stored unread counter is non-zero.
    Unread,
}

impl InboxFilter {
    pub fn matches(&self, conversation: &Conversation) -> bool {
        match self {
            InboxFilter::All => true,
            InboxFilter::Unread => conversation.unread_count > 0,
        }
    }
}

/// Case-insensitive match against participant names, message contents and subject.
///
/// `needle` must already be lowercased. An empty needle matches everything.
pub(crate) fn matches_search(conversation: &Conversation, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let participant_match = conversation
        .participants
        .iter()
        .any(|p| p.name.to_lowercase().contains(needle));
    let message_match = conversation
        .messages
        .iter()
        .any(|m| m.content.to_lowercase().contains(needle));
    let subject_match = conversation
        .subject
        .as_ref()
        .is_some_and(|s| s.to_lowercase().contains(needle));

    participant_match || message_match || subject_match
}
