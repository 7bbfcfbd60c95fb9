//! Domain layer for the support inbox.
//!
//! Holds the conversation list, the AI side-conversations, the pending
//! selected-text action and the composer buffer. Nothing here performs I/O.

pub mod composer;
pub mod config;
pub mod conversation;
pub mod copilot;
pub mod error;
pub mod seed;
pub mod selection;
pub mod state;
pub mod user;

// Re-export common types
pub use error::InboxError;
pub use state::InboxState;
