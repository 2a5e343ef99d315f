//! Handlers for the notes bot chain.

mod logging;
mod notes_handler;

pub use logging::LoggingHandler;
pub use notes_handler::{
    NotesHandler, MSG_CONFIRMED, MSG_EMPTY_SUMMARY, MSG_REQUEST_FAILED, MSG_SAVED,
    MSG_SEND_FAILED, MSG_STREAM_FAILED, MSG_TIMED_OUT, MSG_UNSUPPORTED_VERB,
};
