//! Conversation domain models.
//!
//! A conversation is a thread of messages between the current user and one
//! customer. Messages are append-only; insertion order is chronological order.

use crate::user::User;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Kind of file or link attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    File,
    Link,
}

/// A file or link attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    pub name: String,
    /// Size in bytes, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A single message in a conversation.
///
/// Only the `read` flag changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// The caller-supplied part of a message; id and timestamp are assigned on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub read: bool,
    pub attachments: Option<Vec<Attachment>>,
}

impl NewMessage {
    pub fn new(
        sender_id: impl Into<String>,
        recipient_id: impl Into<String>,
        content: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            recipient_id: recipient_id.into(),
            content: content.into(),
            read,
            attachments: None,
        }
    }

    /// Stamps the message with a fresh id and the current time.
    pub(crate) fn into_message(self) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            sender_id: self.sender_id,
            recipient_id: self.recipient_id,
            content: self.content,
            timestamp: chrono::Utc::now().to_rfc3339(),
            read: self.read,
            attachments: self.attachments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConversationStatus {
    Open,
    Pending,
    Closed,
}

/// A support conversation.
///
/// `unread_count` is stored, not derived: it is reset by
/// [`ConversationStore::mark_as_read`](super::ConversationStore::mark_as_read)
/// and otherwise left alone, so it can drift from the message read flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub participants: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    pub messages: Vec<Message>,
    pub unread_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConversationStatus>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, participants: Vec<User>) -> Self {
        Self {
            id: id.into(),
            participants,
            subject: None,
            last_message: None,
            messages: Vec::new(),
            unread_count: 0,
            tags: None,
            priority: None,
            status: None,
        }
    }

    /// Returns the most recent message, preferring the explicit pointer.
    pub fn latest_message(&self) -> Option<&Message> {
        self.last_message.as_ref().or_else(|| self.messages.last())
    }

    /// The first participant that is not `current_user_id`.
    pub fn counterpart(&self, current_user_id: &str) -> Option<&User> {
        self.participants.iter().find(|p| p.id != current_user_id)
    }

    /// Number of unread messages addressed to `user_id`, derived from read flags.
    #[cfg(test)]
    pub(crate) fn count_unread_for(&self, user_id: &str) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.read && m.recipient_id == user_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn conversation() -> Conversation {
        let mut conv = Conversation::new(
            "conv-1",
            vec![
                User::new("user-1", "John Smith", "john@example.com"),
                User::new("current-user", "You", "you@example.com"),
            ],
        );
        conv.messages.push(NewMessage::new("user-1", "current-user", "hi", false).into_message());
        conv.messages.push(NewMessage::new("current-user", "user-1", "hello", false).into_message());
        conv
    }

    #[test]
    fn test_counterpart_skips_current_user() {
        let conv = conversation();
        assert_eq!(conv.counterpart("current-user").unwrap().id, "user-1");
    }

    #[test]
    fn test_count_unread_only_counts_messages_to_user() {
        let conv = conversation();
        assert_eq!(conv.count_unread_for("current-user"), 1);
        assert_eq!(conv.count_unread_for("user-1"), 1);
    }

    #[test]
    fn test_priority_and_status_parse_lowercase() {
        assert_eq!(Priority::from_str("high").unwrap(), Priority::High);
        assert_eq!(ConversationStatus::Pending.to_string(), "pending");
        assert!(Priority::from_str("High").is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let conv = conversation();
        let json = serde_json::to_value(&conv).unwrap();
        assert_eq!(json["unreadCount"], 0);
        assert_eq!(json["messages"][0]["senderId"], "user-1");
        assert!(json.get("priority").is_none());
    }
}
