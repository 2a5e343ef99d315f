//! Parses incoming messages into bot actions.
//!
//! Button presses carry a card verb; typed `/commands` map onto the same verbs with the rest of
//! the message as input.

use notes_core::Message;

pub const VERB_AI_CARD: &str = "AICard";
pub const VERB_AI_SUMMARIZE_PREP: &str = "AISummarizePrep";
pub const VERB_CONFIRM: &str = "confirm";
pub const VERB_SAVE: &str = "save";

/// A card submission: which button (verb) and the notes typed with it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub verb: String,
    pub input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `/start` or `/help`.
    Help,
    /// `/callnotes`: show the on-call notes card.
    GetCallNotes,
    /// `/prepnotes`: show the prep notes card.
    GetPrepNotes,
    Submit(Submission),
    /// A `/command` the bot does not know (name without the slash).
    Unknown(String),
    /// Free text that is not a command.
    Chat(String),
}

impl Action {
    /// Returns `None` for messages with nothing to act on (blank text or an empty callback).
    pub fn parse(message: &Message) -> Option<Action> {
        let content = message.content.trim();
        if content.is_empty() {
            return None;
        }
        if message.is_callback() {
            return Some(Action::Submit(Submission {
                verb: content.to_string(),
                input: None,
            }));
        }
        let Some(rest) = content.strip_prefix('/') else {
            return Some(Action::Chat(content.to_string()));
        };

        let (command, args) = match rest.find(char::is_whitespace) {
            Some(i) => (&rest[..i], rest[i..].trim()),
            None => (rest, ""),
        };
        // Group chats address commands as /name@BotName.
        let command = command.split('@').next().unwrap_or(command);
        if command.is_empty() {
            return Some(Action::Chat(content.to_string()));
        }
        let input = (!args.is_empty()).then(|| args.to_string());
        let submit = |verb: &str| {
            Action::Submit(Submission {
                verb: verb.to_string(),
                input: input.clone(),
            })
        };

        Some(match command.to_ascii_lowercase().as_str() {
            "start" | "help" => Action::Help,
            "callnotes" => Action::GetCallNotes,
            "prepnotes" => Action::GetPrepNotes,
            "confirm" => submit(VERB_CONFIRM),
            "save" => submit(VERB_SAVE),
            "summarize" => submit(VERB_AI_CARD),
            "summarizeprep" => submit(VERB_AI_SUMMARIZE_PREP),
            _ => Action::Unknown(command.to_string()),
        })
    }
}
