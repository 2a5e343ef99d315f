//! Errors surfaced by transports and handlers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// The transport rejected or failed a call; carries the transport's message.
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    /// A card template could not be parsed or expanded into a card.
    #[error("Template error: {0}")]
    Template(String),
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_converts_into_bot_error() {
        let err: BotError = HandlerError::Template("missing title".to_string()).into();
        assert!(matches!(err, BotError::Handler(HandlerError::Template(_))));
        assert_eq!(err.to_string(), "Handler error: Template error: missing title");
    }
}
