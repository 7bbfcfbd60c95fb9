//! Application layer for the inbox.
//!
//! Coordinates the domain state with the completion service: the
//! selected-text action pipeline, copilot questions, and replying to customers.

pub mod copilot_service;
pub mod inbox_usecase;
pub mod prompt;

pub use copilot_service::{APOLOGY_MESSAGE, CopilotReply, CopilotService, apply_reply};
pub use prompt::{CopilotSuggestion, SelectionAction, build_selection_prompt};
