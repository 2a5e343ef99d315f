//! # notes-bot
//!
//! Telegram bot that shows on-call and prep notes as cards and streams LLM summaries of them.
//! A summary is posted as one message and edited in batches while the model generates
//! (see the stream-edit crate).

pub mod actions;
pub mod cards;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod responses;
pub mod runner;
pub mod sink;
pub mod source;
pub mod state;
pub mod telegram;
pub mod variant;

pub use actions::{Action, Submission};
pub use cards::{CardTemplate, CardTemplates};
pub use cli::{load_config, Cli, Commands};
pub use config::{BaseConfig, BotConfig};
pub use handlers::{LoggingHandler, NotesHandler};
pub use responses::ResponseTables;
pub use runner::{build_handler_chain, build_notes_handler, load_responses, run_bot};
pub use sink::{is_message_not_modified_error, ChatSink};
pub use source::{skip_leading_whitespace, VisibleTextSource};
pub use state::{ConversationState, ConversationStore};
pub use telegram::{run_dispatcher, TelegramBotAdapter};
pub use variant::BotVariant;
