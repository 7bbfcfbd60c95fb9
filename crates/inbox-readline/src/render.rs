//! Terminal rendering for the inbox REPL.

use chrono::{DateTime, Local};
use colored::Colorize;
use inbox_application::CopilotSuggestion;
use inbox_core::InboxState;
use inbox_core::conversation::{Conversation, InboxFilter, Message};
use inbox_core::copilot::AiMessage;
use strum::IntoEnumIterator;

const PREVIEW_CHARS: usize = 60;

pub fn print_help() {
    let lines = [
        ("/list [term]", "List conversations, optionally filtered by name or content"),
        ("/unread", "List conversations with unread messages"),
        ("/open <id>", "Open a conversation and mark it read"),
        ("/close", "Close the open conversation"),
        ("/show", "Show the open conversation"),
        ("<text> | /send [text]", "Reply to the customer (bare /send sends the composer)"),
        ("/compose <text>", "Replace the composer content"),
        ("/select <msg-id> <action> <text>", "Run a copilot action on selected text"),
        ("/ask <question>", "Ask the copilot about the open conversation"),
        ("/suggest respond|summarize", "Ask a suggested question"),
        ("/copilot", "Show the copilot side-conversation"),
        ("/use <ai-msg-id>", "Copy a copilot message into the composer"),
        ("/wait", "Wait for pending copilot replies"),
        ("quit", "Exit"),
    ];
    for (usage, description) in lines {
        println!(
            "  {} {}",
            format!("{usage:<34}").bright_cyan(),
            description.bright_black()
        );
    }
    println!(
        "{}",
        "  actions: rephrase tone friendly formal grammar translate \"Ask Fin AI\" (ask or any other key sends the text as-is)"
            .bright_black()
    );
}

/// One-line overview of the inbox for the startup banner.
pub fn inbox_summary(state: &InboxState) -> String {
    let conversations = state.conversations();
    if conversations.is_empty() {
        return "Inbox is empty".to_string();
    }
    format!(
        "{} conversations, {} unread, {} with Fin AI notes",
        conversations.len(),
        conversations.filter(InboxFilter::Unread).len(),
        state.ai_conversations().all().len()
    )
}

pub fn print_conversation_list(state: &InboxState, conversations: &[&Conversation]) {
    if conversations.is_empty() {
        println!("{}", "No conversations found".bright_black());
        return;
    }

    let current_user_id = state.current_user().id.as_str();
    let selected = state.selected_conversation_id();
    for conversation in conversations {
        let name = conversation
            .counterpart(current_user_id)
            .map(|user| user.name.as_str())
            .unwrap_or("Unknown");
        let marker = if selected == Some(conversation.id.as_str()) {
            "*"
        } else {
            " "
        };
        let mut header = format!("{marker} {:<8} {name}", conversation.id);
        if conversation.unread_count > 0 {
            header = format!("{header} ({})", conversation.unread_count);
            println!("{}", header.bold());
        } else {
            println!("{header}");
        }

        if let Some(message) = conversation.latest_message() {
            println!(
                "    {} {}",
                format_time(&message.timestamp).bright_black(),
                preview(&message.content)
            );
        }
    }
}

pub fn print_conversation(state: &InboxState, conversation: &Conversation) {
    let current_user_id = state.current_user().id.as_str();
    let counterpart = conversation.counterpart(current_user_id);

    let title = counterpart.map(|user| user.name.as_str()).unwrap_or("Unknown");
    println!("{}", format!("=== {title} ===").bright_magenta().bold());
    if let Some(subject) = &conversation.subject {
        println!("{}", subject.bright_black());
    }
    let mut meta = Vec::new();
    if let Some(status) = conversation.status {
        meta.push(format!("status: {status}"));
    }
    if let Some(priority) = conversation.priority {
        meta.push(format!("priority: {priority}"));
    }
    if let Some(tags) = &conversation.tags {
        meta.push(format!("tags: {}", tags.join(", ")));
    }
    if !meta.is_empty() {
        println!("{}", meta.join(" | ").bright_black());
    }
    println!();

    for message in &conversation.messages {
        print_message(conversation, message, current_user_id);
    }

    let composer = state.composer();
    if !composer.is_blank() {
        println!("{} {}", "composer:".yellow(), composer.content());
    }
}

fn print_message(conversation: &Conversation, message: &Message, current_user_id: &str) {
    let author = if message.sender_id == current_user_id {
        "You".to_string()
    } else {
        conversation
            .participants
            .iter()
            .find(|p| p.id == message.sender_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| message.sender_id.clone())
    };

    let header = format!(
        "[{}] {} {}",
        message.id,
        author,
        format_time(&message.timestamp)
    );
    if message.sender_id == current_user_id {
        println!("{}", header.green());
    } else {
        println!("{}", header.bright_magenta());
    }
    for line in message.content.lines() {
        println!("  {line}");
    }
    if let Some(attachments) = &message.attachments {
        for attachment in attachments {
            println!(
                "  {} {} ({})",
                "attachment:".bright_black(),
                attachment.name,
                attachment.kind
            );
        }
    }
}

pub fn print_copilot(state: &InboxState) {
    let Some(ai) = state.ai_conversation_for_selected() else {
        println!("{}", "Ask Fin AI a question about this conversation.".bright_black());
        for suggestion in CopilotSuggestion::iter() {
            let command = format!("/suggest {suggestion}");
            println!(
                "{}",
                format!("  {command:<20}{}", suggestion.label()).bright_black()
            );
        }
        return;
    };

    for message in &ai.messages {
        print_ai_message(message);
    }
}

pub fn print_ai_message(message: &AiMessage) {
    let label = if message.is_question() {
        "You".green()
    } else {
        "Fin AI".bright_blue()
    };
    println!(
        "{} {} {}",
        label,
        format_time(&message.timestamp).bright_black(),
        format!("[{}]", message.id).bright_black()
    );
    for line in message.content.lines() {
        if message.is_question() {
            println!("  {line}");
        } else {
            println!("  {}", line.bright_blue());
        }
    }
}

fn format_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|time| time.with_timezone(&Local).format("%b %d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.chars().count() > PREVIEW_CHARS {
        let cut: String = first_line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "a".repeat(80);
        assert_eq!(preview(&long), format!("{}...", "a".repeat(60)));
        assert_eq!(preview("short\nsecond"), "short");
    }

    #[test]
    fn test_inbox_summary_counts_seed_data() {
        let state = inbox_core::seed::seed_state();
        assert_eq!(
            inbox_summary(&state),
            "5 conversations, 2 unread, 1 with Fin AI notes"
        );
    }

    #[test]
    fn test_inbox_summary_on_empty_inbox() {
        let state = InboxState::new(
            inbox_core::seed::current_user(),
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(inbox_summary(&state), "Inbox is empty");
    }

    #[test]
    fn test_format_time_keeps_unparseable_input() {
        assert_eq!(format_time("yesterday"), "yesterday");
    }
}
