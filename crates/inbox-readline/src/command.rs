//! REPL command parsing.

use inbox_application::CopilotSuggestion;
use std::str::FromStr;

pub const COMMANDS: &[&str] = &[
    "/list", "/unread", "/open", "/close", "/show", "/send", "/compose", "/select", "/ask",
    "/suggest", "/copilot", "/use", "/wait", "/help",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(Option<String>),
    Unread,
    Open(String),
    Close,
    Show,
    Send(String),
    Compose(String),
    Select {
        message_id: String,
        action: String,
        text: String,
    },
    Ask(String),
    Suggest(CopilotSuggestion),
    Copilot,
    Use(String),
    Wait,
    Help,
    Quit,
    /// A recognised command with missing or bad arguments; carries the usage line.
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    /// Parses a trimmed, non-empty input line.
    ///
    /// Plain text is a reply. A bare `/send` sends the composer content.
    pub fn parse(line: &str) -> Command {
        if line == "quit" || line == "exit" {
            return Command::Quit;
        }
        if !line.starts_with('/') {
            return Command::Send(line.to_string());
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/list" => Command::List((!rest.is_empty()).then(|| rest.to_string())),
            "/unread" => Command::Unread,
            "/open" => non_empty(rest, "/open <conversation-id>", Command::Open),
            "/close" => Command::Close,
            "/show" => Command::Show,
            "/send" => Command::Send(rest.to_string()),
            "/compose" => Command::Compose(rest.to_string()),
            "/select" => parse_select(rest),
            "/ask" => non_empty(rest, "/ask <question>", Command::Ask),
            "/suggest" => match CopilotSuggestion::from_str(rest) {
                Ok(suggestion) => Command::Suggest(suggestion),
                Err(_) => Command::Usage("/suggest respond|summarize"),
            },
            "/copilot" => Command::Copilot,
            "/use" => non_empty(rest, "/use <ai-message-id>", Command::Use),
            "/wait" => Command::Wait,
            "/help" => Command::Help,
            other => Command::Unknown(other.to_string()),
        }
    }
}

fn non_empty(rest: &str, usage: &'static str, build: fn(String) -> Command) -> Command {
    if rest.is_empty() {
        Command::Usage(usage)
    } else {
        build(rest.to_string())
    }
}

/// Action keys that contain spaces and so cannot be split on whitespace.
const MULTI_WORD_ACTIONS: &[&str] = &["Ask Fin AI"];

fn parse_select(rest: &str) -> Command {
    const USAGE: &str = "/select <message-id> <action> <text>";

    let Some((message_id, after_id)) = rest.split_once(char::is_whitespace) else {
        return Command::Usage(USAGE);
    };
    let after_id = after_id.trim_start();

    let multi_word = MULTI_WORD_ACTIONS.iter().find_map(|action| {
        after_id
            .strip_prefix(action)
            .filter(|text| text.starts_with(char::is_whitespace))
            .map(|text| (*action, text))
    });
    let (action, text) = match multi_word {
        Some(found) => found,
        None => match after_id.split_once(char::is_whitespace) {
            Some(found) => found,
            None => return Command::Usage(USAGE),
        },
    };

    let text = text.trim();
    if message_id.is_empty() || action.is_empty() || text.is_empty() {
        return Command::Usage(USAGE);
    }
    Command::Select {
        message_id: message_id.to_string(),
        action: action.to_string(),
        text: text.to_string(),
    }
}
