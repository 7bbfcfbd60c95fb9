mod command;
mod render;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use inbox_application::{
    CopilotReply, CopilotService, CopilotSuggestion, SelectionAction, apply_reply, inbox_usecase,
};
use inbox_core::InboxState;
use inbox_core::conversation::InboxFilter;
use inbox_core::seed;
use inbox_interaction::{CompletionService, OpenAiCompletionClient};

use command::{COMMANDS, Command};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
///
/// Besides command names it completes conversation ids after `/open`, action
/// keys after `/select <msg-id>` and suggestion names after `/suggest`.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
    conversation_ids: Vec<String>,
    actions: Vec<String>,
    suggestions: Vec<String>,
}

impl CliHelper {
    fn new(state: &InboxState) -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
            conversation_ids: state
                .conversations()
                .all()
                .iter()
                .map(|c| c.id.clone())
                .collect(),
            actions: SelectionAction::iter().map(|a| a.to_string()).collect(),
            suggestions: CopilotSuggestion::iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replacement start and candidates for the text before the cursor.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        if !line.starts_with('/') {
            return (0, vec![]);
        }
        let Some((name, rest)) = line.split_once(' ') else {
            return (0, starting_with(&self.commands, line));
        };

        let (pool, partial) = match name {
            "/open" if !rest.contains(' ') => (&self.conversation_ids, rest),
            "/suggest" if !rest.contains(' ') => (&self.suggestions, rest),
            "/select" => match rest.split_once(' ') {
                Some((message_id, action)) if !message_id.is_empty() => (&self.actions, action),
                _ => return (0, vec![]),
            },
            _ => return (0, vec![]),
        };
        (line.len() - partial.len(), starting_with(pool, partial))
    }
}

fn starting_with(pool: &[String], partial: &str) -> Vec<String> {
    pool.iter()
        .filter(|item| item.starts_with(partial))
        .cloned()
        .collect()
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        let (start, candidates) = self.candidates(line);
        let typed = line.len() - start;
        candidates
            .into_iter()
            .find(|candidate| candidate.len() > typed)
            .map(|candidate| candidate[typed..].to_string())
    }
}

impl Validator for CliHelper {}

/// REPL session: the inbox state plus the copilot plumbing that reports back to it.
///
/// The state has one owner, this session. Copilot completions run on spawned
/// tasks and their replies are applied here, between prompts or on `/wait`.
struct Session {
    state: InboxState,
    copilot: CopilotService,
    replies: mpsc::UnboundedReceiver<CopilotReply>,
    in_flight: Vec<JoinHandle<()>>,
}

impl Session {
    fn new(state: InboxState, completion: Arc<dyn CompletionService>) -> Self {
        let (copilot, replies) = CopilotService::new(completion);
        Self {
            state,
            copilot,
            replies,
            in_flight: Vec::new(),
        }
    }

    fn prompt(&self) -> String {
        match self.state.selected_conversation_id() {
            Some(id) => format!("{id}> "),
            None => ">> ".to_string(),
        }
    }

    /// Applies every reply that has already arrived.
    fn drain_replies(&mut self) {
        while let Ok(reply) = self.replies.try_recv() {
            self.apply(reply);
        }
        self.in_flight.retain(|handle| !handle.is_finished());
    }

    async fn wait_for_replies(&mut self) {
        if self.in_flight.is_empty() {
            println!("{}", "No pending copilot requests".bright_black());
            return;
        }

        println!("{}", "Waiting for Fin AI...".bright_black());
        for handle in self.in_flight.drain(..) {
            if let Err(err) = handle.await {
                eprintln!("{}", format!("Copilot task failed: {err}").red());
            }
        }
        while let Ok(reply) = self.replies.try_recv() {
            self.apply(reply);
        }
    }

    fn apply(&mut self, reply: CopilotReply) {
        let conversation_id = reply.conversation_id.clone();
        match apply_reply(&mut self.state, reply) {
            Some(message) => {
                println!("{}", format!("Fin AI replied on {conversation_id}:").bright_black());
                render::print_ai_message(&message);
            }
            None => debug!(%conversation_id, "Copilot reply dropped"),
        }
    }

    fn track(&mut self, handle: Option<JoinHandle<()>>) {
        match handle {
            Some(handle) => {
                println!("{}", "Fin AI is thinking...".bright_black());
                self.in_flight.push(handle);
            }
            None => println!("{}", "Open a conversation first".yellow()),
        }
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::List(term) => {
                let conversations: Vec<_> = match term {
                    Some(term) => self.state.conversations().search(&term),
                    None => self.state.conversations().all().iter().collect(),
                };
                render::print_conversation_list(&self.state, &conversations);
            }
            Command::Unread => {
                let conversations = self.state.conversations().filter(InboxFilter::Unread);
                render::print_conversation_list(&self.state, &conversations);
            }
            Command::Open(id) => {
                if !self.state.conversations().contains(&id) {
                    println!("{}", format!("No conversation '{id}'").yellow());
                    return;
                }
                self.state.select_conversation(Some(&id));
                self.show();
            }
            Command::Close => self.state.select_conversation(None),
            Command::Show => self.show(),
            Command::Send(text) => {
                let content = if text.is_empty() {
                    self.state.composer().content().to_string()
                } else {
                    text
                };
                match inbox_usecase::send_reply(&mut self.state, &content) {
                    Some(message) => println!("{}", format!("Sent [{}]", message.id).green()),
                    None => println!("{}", "Nothing sent".yellow()),
                }
            }
            Command::Compose(text) => {
                self.state.set_composer_content(text);
                println!(
                    "{} {}",
                    "composer:".yellow(),
                    self.state.composer().content()
                );
            }
            Command::Select {
                message_id,
                action,
                text,
            } => {
                if !inbox_usecase::queue_selection_action(
                    &mut self.state,
                    &action,
                    &text,
                    &message_id,
                ) {
                    println!("{}", "Open a conversation first".yellow());
                    return;
                }
                let handle = self.copilot.process_selected_text(&mut self.state);
                self.track(handle);
            }
            Command::Ask(question) => {
                let handle = self.copilot.ask(&mut self.state, &question);
                self.track(handle);
            }
            Command::Suggest(suggestion) => {
                let handle = self.copilot.suggest(&mut self.state, suggestion);
                self.track(handle);
            }
            Command::Copilot => {
                if self.state.selected_conversation().is_none() {
                    println!("{}", "Open a conversation first".yellow());
                    return;
                }
                render::print_copilot(&self.state);
            }
            Command::Use(ai_message_id) => {
                if inbox_usecase::add_to_composer(&mut self.state, &ai_message_id) {
                    println!(
                        "{} {}",
                        "composer:".yellow(),
                        self.state.composer().content()
                    );
                } else {
                    println!("{}", format!("No copilot message '{ai_message_id}'").yellow());
                }
            }
            Command::Wait => self.wait_for_replies().await,
            Command::Help => render::print_help(),
            Command::Usage(usage) => println!("{}", format!("Usage: {usage}").yellow()),
            Command::Unknown(name) => {
                println!("{}", format!("Unknown command {name}").bright_black())
            }
            Command::Quit => {}
        }
    }

    fn show(&self) {
        match self.state.selected_conversation() {
            Some(conversation) => render::print_conversation(&self.state, conversation),
            None => println!("{}", "No conversation open".bright_black()),
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Interactive support inbox over the seed dataset.
///
/// Copilot questions are answered by the configured completion endpoint;
/// failures show up as an apology in the copilot transcript.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let client = OpenAiCompletionClient::try_from_env()?;
    if !client.config().has_api_key() {
        println!(
            "{}",
            "No OPENAI_API_KEY configured; copilot replies will fail.".yellow()
        );
    }
    let completion: Arc<dyn CompletionService> = Arc::new(client);
    let mut session = Session::new(seed::seed_state(), completion);

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(&session.state)));

    println!("{}", "=== Support Inbox ===".bright_magenta().bold());
    println!("{}", render::inbox_summary(&session.state).bright_black());
    println!(
        "{}",
        "Type '/list' to see conversations, '/help' for commands, or 'quit' to exit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        session.drain_replies();

        match rl.readline(&session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                // Replies may have landed while the prompt was open.
                session.drain_replies();

                match Command::parse(trimmed) {
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    command => session.handle(command).await,
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CliHelper {
        CliHelper::new(&seed::seed_state())
    }

    #[test]
    fn test_completes_command_names() {
        let (start, candidates) = helper().candidates("/co");
        assert_eq!(start, 0);
        assert_eq!(candidates, vec!["/compose", "/copilot"]);
    }

    #[test]
    fn test_completes_conversation_ids_after_open() {
        let (start, candidates) = helper().candidates("/open conv-");
        assert_eq!(start, "/open ".len());
        assert_eq!(
            candidates,
            vec!["conv-1", "conv-2", "conv-3", "conv-4", "conv-5"]
        );

        let (_, candidates) = helper().candidates("/open conv-4");
        assert_eq!(candidates, vec!["conv-4"]);
    }

    #[test]
    fn test_completes_action_keys_after_message_id() {
        let (start, candidates) = helper().candidates("/select msg-1 f");
        assert_eq!(start, "/select msg-1 ".len());
        assert_eq!(candidates, vec!["friendly", "formal"]);

        let (_, candidates) = helper().candidates("/select msg-1 Ask F");
        assert_eq!(candidates, vec!["Ask Fin AI"]);
    }

    #[test]
    fn test_no_action_keys_before_message_id() {
        let (_, candidates) = helper().candidates("/select ");
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_completes_suggestions() {
        let (start, candidates) = helper().candidates("/suggest s");
        assert_eq!(start, "/suggest ".len());
        assert_eq!(candidates, vec!["summarize"]);
    }

    #[test]
    fn test_plain_text_gets_no_candidates() {
        let (_, candidates) = helper().candidates("thanks for waiting");
        assert!(candidates.is_empty());
    }
}
