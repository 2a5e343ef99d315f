//! Cards: a titled text body with submit actions. Transports render actions as buttons.

use serde::{Deserialize, Serialize};

/// One submit button on a card. `verb` is routed back to the bot when the button is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAction {
    pub title: String,
    pub verb: String,
}

/// A card sent to a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub actions: Vec<CardAction>,
}

impl Card {
    /// Plain-text rendering (title, blank line, body) for transports without rich layout.
    pub fn text(&self) -> String {
        if self.title.is_empty() {
            return self.body.clone();
        }
        format!("{}\n\n{}", self.title, self.body)
    }
}
