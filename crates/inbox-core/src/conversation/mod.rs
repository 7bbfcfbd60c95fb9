//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `model`: `Conversation`, `Message` and their attribute types
//! - `store`: `ConversationStore`, the ordered collection the inbox list renders
//! - `filter`: inbox search and the All/Unread tabs

mod filter;
mod model;
mod store;

pub use filter::InboxFilter;
pub use model::{
    Attachment, AttachmentKind, Conversation, ConversationStatus, Message, NewMessage, Priority,
};
pub use store::ConversationStore;
