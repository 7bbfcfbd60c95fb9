//! User domain model.

use serde::{Deserialize, Serialize};

/// Identifier of the support agent operating the inbox.
pub const CURRENT_USER_ID: &str = "current-user";

/// A participant in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Display name
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_is_skipped_when_absent() {
        let user = User::new("user-1", "John Smith", "john@example.com");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("avatar").is_none());

        let user = user.with_avatar("https://example.com/john.jpg");
        assert_eq!(user.avatar.as_deref(), Some("https://example.com/john.jpg"));
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["avatar"], "https://example.com/john.jpg");
    }
}
