//! Fixed dataset the inbox starts from.
//!
//! Timestamps are relative to the moment the dataset is built.

use crate::conversation::{Conversation, ConversationStatus, Message, Priority};
use crate::copilot::{AiConversation, AiMessage, AiMessageKind};
use crate::state::InboxState;
use crate::user::{CURRENT_USER_ID, User};
use chrono::{DateTime, Duration, Utc};

fn at(now: DateTime<Utc>, ago: Duration) -> String {
    (now - ago).to_rfc3339()
}

fn message(
    id: &str,
    sender_id: &str,
    recipient_id: &str,
    content: &str,
    timestamp: String,
    read: bool,
) -> Message {
    Message {
        id: id.to_string(),
        sender_id: sender_id.to_string(),
        recipient_id: recipient_id.to_string(),
        content: content.to_string(),
        timestamp,
        read,
        attachments: None,
    }
}

fn ai_message(
    id: &str,
    conversation_id: &str,
    original_message_id: Option<&str>,
    kind: AiMessageKind,
    content: &str,
    timestamp: String,
) -> AiMessage {
    AiMessage {
        id: id.to_string(),
        conversation_id: conversation_id.to_string(),
        original_message_id: original_message_id.map(str::to_string),
        content: content.to_string(),
        timestamp,
        kind,
    }
}

fn tags(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|t| t.to_string()).collect())
}

fn avatar(photo_id: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{photo_id}/pexels-photo-{photo_id}.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2"
    )
}

pub fn users() -> Vec<User> {
    vec![
        User::new("user-1", "John Smith", "john@example.com").with_avatar(avatar(220453)),
        User::new("user-2", "Emily Chen", "emily@example.com").with_avatar(avatar(415829)),
        User::new("user-3", "Michael Brown", "michael@example.com").with_avatar(avatar(614810)),
        User::new("user-4", "Sarah Johnson", "sarah@example.com").with_avatar(avatar(774909)),
        User::new("user-5", "Luis Easton", "luis@example.com").with_avatar(avatar(1222271)),
        current_user(),
    ]
}

pub fn current_user() -> User {
    User::new(CURRENT_USER_ID, "You", "you@example.com").with_avatar(avatar(1036623))
}

pub fn conversations(now: DateTime<Utc>) -> Vec<Conversation> {
    let users = users();
    let you = current_user();
    let pair = |index: usize| vec![users[index].clone(), you.clone()];

    let mut refund = Conversation::new("conv-1", pair(0));
    refund.subject = Some("Refund request".to_string());
    refund.messages = vec![
        message(
            "msg-1-1",
            "user-1",
            CURRENT_USER_ID,
            "Hello, I purchased your premium plan last week but I'm having issues accessing some features. Could you help me troubleshoot or process a refund if necessary?",
            at(now, Duration::hours(5)),
            true,
        ),
        message(
            "msg-1-2",
            CURRENT_USER_ID,
            "user-1",
            "I'm sorry to hear you're having trouble. Could you tell me which specific features you're having issues with? I'd be happy to help resolve this.",
            at(now, Duration::hours(4)),
            true,
        ),
        message(
            "msg-1-3",
            "user-1",
            CURRENT_USER_ID,
            "I can't access the advanced analytics dashboard and the export functionality isn't working. I've tried logging out and back in, but still having the same issues.",
            at(now, Duration::hours(3)),
            false,
        ),
    ];
    refund.unread_count = 1;
    refund.priority = Some(Priority::High);
    refund.status = Some(ConversationStatus::Open);
    refund.tags = tags(&["support", "refund"]);

    let mut billing = Conversation::new("conv-2", pair(1));
    billing.subject = Some("Billing inquiry".to_string());
    billing.messages = vec![message(
        "msg-2-1",
        "user-2",
        CURRENT_USER_ID,
        "Hi there, I noticed a double charge on my account this month. Can you please look into this and refund the extra payment? My transaction IDs are TXN-45678 and TXN-45679.",
        at(now, Duration::hours(24)),
        true,
    )];
    billing.priority = Some(Priority::Medium);
    billing.status = Some(ConversationStatus::Open);

    let mut feature = Conversation::new("conv-3", pair(2));
    feature.subject = Some("Feature request".to_string());
    feature.messages = vec![message(
        "msg-3-1",
        "user-3",
        CURRENT_USER_ID,
        "Hello! I love your product but I think it would be even better if you could add calendar integration. Would this be possible in a future update?",
        at(now, Duration::days(2)),
        true,
    )];
    feature.priority = Some(Priority::Low);
    feature.status = Some(ConversationStatus::Open);
    feature.tags = tags(&["feature", "feedback"]);

    let mut verification = Conversation::new("conv-4", pair(3));
    verification.subject = Some("Account verification".to_string());
    verification.messages = vec![message(
        "msg-4-1",
        "user-4",
        CURRENT_USER_ID,
        "I'm trying to verify my account but I haven't received the verification email. I've checked my spam folder as well. Could you please resend it or help me verify my account another way?",
        at(now, Duration::days(3)),
        false,
    )];
    verification.unread_count = 1;
    verification.status = Some(ConversationStatus::Pending);

    let mut product = Conversation::new("conv-5", pair(4));
    product.subject = Some("Product inquiry".to_string());
    product.messages = vec![
        message(
            "msg-5-1",
            "user-5",
            CURRENT_USER_ID,
            "I bought a product from your store in November as a Christmas gift for a member of my family. However, it turns out they already have something very similar. Would it be possible to return it for a refund or store credit?",
            at(now, Duration::minutes(30)),
            false,
        ),
        message(
            "msg-5-2",
            CURRENT_USER_ID,
            "user-5",
            "Let me look into this for you, Luis. Can you please provide your order number?",
            at(now, Duration::minutes(25)),
            true,
        ),
        message(
            "msg-5-3",
            "user-5",
            CURRENT_USER_ID,
            "Sure! The order number is #ORD-123456.",
            at(now, Duration::minutes(20)),
            true,
        ),
        message(
            "msg-5-4",
            CURRENT_USER_ID,
            "user-5",
            "Thank you. Our return policy allows returns within 30 days of purchase. Since your purchase was in November, I'll need to check with our team about making an exception. I'll get back to you soon.",
            at(now, Duration::minutes(15)),
            true,
        ),
    ];
    product.priority = Some(Priority::Medium);
    product.status = Some(ConversationStatus::Open);
    product.tags = tags(&["returns", "customer-service"]);

    vec![refund, billing, feature, verification, product]
}

pub fn ai_conversations(now: DateTime<Utc>) -> Vec<AiConversation> {
    vec![AiConversation {
        id: "ai-conv-1".to_string(),
        conversation_id: "conv-5".to_string(),
        messages: vec![
            ai_message(
                "ai-msg-1-1",
                "conv-5",
                Some("msg-5-1"),
                AiMessageKind::Question,
                "How should I respond to a customer requesting a return outside our 30-day policy for a Christmas gift?",
                at(now, Duration::minutes(28)),
            ),
            ai_message(
                "ai-msg-1-2",
                "conv-5",
                None,
                AiMessageKind::Response,
                "Here's a suggested response for this situation:\n\nThank you for reaching out about returning your November purchase. While our standard policy is 30 days, we do have special considerations for holiday gifts. I'd be happy to make an exception in this case.\n\nYou have two options:\n1. Return for a full refund to the original payment method\n2. Exchange for store credit with an additional 10% bonus\n\nPlease let me know which option you prefer, and I'll provide instructions for the return process.",
                at(now, Duration::minutes(27)),
            ),
            ai_message(
                "ai-msg-1-3",
                "conv-5",
                Some("msg-5-3"),
                AiMessageKind::Question,
                "The customer provided order #ORD-123456. How can I verify this order in our system?",
                at(now, Duration::minutes(18)),
            ),
            ai_message(
                "ai-msg-1-4",
                "conv-5",
                None,
                AiMessageKind::Response,
                "To verify this order:\n\n1. Go to the Orders section in your admin dashboard\n2. Enter the order number (ORD-123456) in the search field\n3. Check the order date to confirm it was purchased in November\n4. Verify the product details and price\n5. Check the customer's purchase history to see if they're a regular customer\n\nIf the order is confirmed and the customer has a good history with you, I recommend approving the return exception. For loyal customers, maintaining goodwill often outweighs strict policy enforcement.",
                at(now, Duration::minutes(17)),
            ),
        ],
    }]
}

/// Builds the startup state from the fixed dataset.
pub fn seed_state() -> InboxState {
    let now = Utc::now();
    InboxState::new(current_user(), conversations(now), ai_conversations(now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_unread_counters_match_read_flags() {
        for conv in conversations(Utc::now()) {
            assert_eq!(
                conv.unread_count as usize,
                conv.count_unread_for(CURRENT_USER_ID),
                "{} starts drifted",
                conv.id
            );
        }
    }

    #[test]
    fn test_every_user_has_an_avatar() {
        for user in users() {
            let url = user.avatar.as_deref().unwrap_or_default();
            assert!(url.starts_with("https://images.pexels.com/photos/"), "{}", user.id);
        }
        assert_eq!(current_user(), users()[5]);
    }

    #[test]
    fn test_every_conversation_has_a_counterpart() {
        for conv in conversations(Utc::now()) {
            assert!(conv.counterpart(CURRENT_USER_ID).is_some());
        }
    }

    #[test]
    fn test_messages_are_chronological() {
        for conv in conversations(Utc::now()) {
            let stamps: Vec<DateTime<Utc>> = conv
                .messages
                .iter()
                .map(|m| m.timestamp.parse().unwrap())
                .collect();
            assert!(stamps.windows(2).all(|w| w[0] <= w[1]), "{}", conv.id);
        }
    }

    #[test]
    fn test_ai_transcript_anchors_to_existing_messages() {
        let now = Utc::now();
        let convs = conversations(now);
        for ai in ai_conversations(now) {
            let base = convs.iter().find(|c| c.id == ai.conversation_id).unwrap();
            for anchor in ai.messages.iter().filter_map(|m| m.original_message_id.as_ref()) {
                assert!(base.messages.iter().any(|m| &m.id == anchor));
            }
        }
    }
}
