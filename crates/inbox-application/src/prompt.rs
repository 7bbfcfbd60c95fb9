//! Copilot prompt templates.
//!
//! Action keys are case-sensitive. The bare `ask` key, and any key outside
//! the fixed set, sends the selected text as-is.

use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Rewrite or question actions offered on a text selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum SelectionAction {
    #[strum(serialize = "rephrase")]
    Rephrase,
    #[strum(serialize = "tone")]
    Tone,
    #[strum(serialize = "friendly")]
    Friendly,
    #[strum(serialize = "formal")]
    Formal,
    #[strum(serialize = "grammar")]
    Grammar,
    #[strum(serialize = "translate")]
    Translate,
    #[strum(serialize = "Ask Fin AI")]
    AskFinAi,
}

impl SelectionAction {
    /// The instruction for `text`, with the text quoted.
    pub fn prompt(&self, text: &str) -> String {
        match self {
            SelectionAction::Rephrase => format!(
                "Rephrase this text in a different way while maintaining its meaning: \"{text}\""
            ),
            SelectionAction::Tone => format!(
                "Adjust the tone of voice in this message to be more professional and clear: \"{text}\""
            ),
            SelectionAction::Friendly => format!(
                "Make this message more friendly and approachable while maintaining its core message: \"{text}\""
            ),
            SelectionAction::Formal => {
                format!("Make this message more formal and professional: \"{text}\"")
            }
            SelectionAction::Grammar => format!(
                "Fix any grammar and spelling issues in this text while maintaining its meaning: \"{text}\""
            ),
            SelectionAction::Translate => {
                format!("Translate this text to English, Spanish, and French: \"{text}\"")
            }
            SelectionAction::AskFinAi => format!("Ask Fin AI about this text: \"{text}\""),
        }
    }
}

/// Builds the prompt for an action key; unknown keys fall back to the raw text.
pub fn build_selection_prompt(action_key: &str, selected_text: &str) -> String {
    match SelectionAction::from_str(action_key) {
        Ok(action) => action.prompt(selected_text),
        Err(_) => selected_text.to_string(),
    }
}

/// Canned questions offered on an empty copilot panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CopilotSuggestion {
    Respond,
    Summarize,
}

impl CopilotSuggestion {
    pub fn prompt(&self) -> &'static str {
        match self {
            CopilotSuggestion::Respond => "How should I respond to this customer's message?",
            CopilotSuggestion::Summarize => "Can you summarize this conversation?",
        }
    }

    /// Button label shown in the panel.
    pub fn label(&self) -> &'static str {
        match self {
            CopilotSuggestion::Respond => "How should I respond to this message?",
            CopilotSuggestion::Summarize => "Summarize this conversation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_formal_template() {
        assert_eq!(
            build_selection_prompt("formal", "thanks for reaching out"),
            "Make this message more formal and professional: \"thanks for reaching out\""
        );
    }

    #[test]
    fn test_every_template_quotes_the_text() {
        for action in SelectionAction::iter() {
            let prompt = action.prompt("abc");
            assert!(prompt.ends_with("\"abc\""), "{action}: {prompt}");
        }
    }

    #[test]
    fn test_bare_ask_passes_text_through() {
        assert_eq!(
            build_selection_prompt("ask", "where is my order"),
            "where is my order"
        );
    }

    #[test]
    fn test_ask_fin_ai_template() {
        assert_eq!(
            build_selection_prompt("Ask Fin AI", "order #ORD-123456"),
            "Ask Fin AI about this text: \"order #ORD-123456\""
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_eq!(build_selection_prompt("Formal", "hi"), "hi");
        assert_eq!(build_selection_prompt("REPHRASE", "hi"), "hi");
    }

    #[test]
    fn test_unknown_key_uses_raw_text() {
        assert_eq!(build_selection_prompt("summarize", "raw text"), "raw text");
        assert_eq!(build_selection_prompt("", "raw text"), "raw text");
    }

    #[test]
    fn test_suggestion_prompts() {
        assert_eq!(
            CopilotSuggestion::Respond.prompt(),
            "How should I respond to this customer's message?"
        );
        assert_eq!(
            CopilotSuggestion::from_str("summarize").unwrap().prompt(),
            "Can you summarize this conversation?"
        );
    }
}
