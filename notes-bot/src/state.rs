//! Per-chat conversation state, in memory only.

use std::sync::Arc;

use dashmap::DashMap;

/// Notes remembered for one chat. `None` means the initial value is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub on_call_notes: Option<String>,
    pub prep_notes: Option<String>,
}

/// Conversation state keyed by chat id. Cloning shares the same map.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    chats: Arc<DashMap<i64, ConversationState>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the chat's state; default when the chat has none yet.
    pub fn get(&self, chat_id: i64) -> ConversationState {
        self.chats
            .get(&chat_id)
            .map(|s| s.value().clone())
            .unwrap_or_default()
    }

    pub fn set_on_call_notes(&self, chat_id: i64, notes: impl Into<String>) {
        self.chats.entry(chat_id).or_default().on_call_notes = Some(notes.into());
    }

    pub fn set_prep_notes(&self, chat_id: i64, notes: impl Into<String>) {
        self.chats.entry(chat_id).or_default().prep_notes = Some(notes.into());
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_chat_is_default() {
        let store = ConversationStore::new();
        assert_eq!(store.get(1), ConversationState::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_notes_are_scoped_per_chat() {
        let store = ConversationStore::new();
        store.set_on_call_notes(1, "quiet night");
        store.set_prep_notes(1, "check backups");
        store.set_prep_notes(2, "other chat");

        let first = store.get(1);
        assert_eq!(first.on_call_notes.as_deref(), Some("quiet night"));
        assert_eq!(first.prep_notes.as_deref(), Some("check backups"));
        assert_eq!(store.get(2).on_call_notes, None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ConversationStore::new();
        let other = store.clone();
        other.set_on_call_notes(5, "shared");
        assert_eq!(store.get(5).on_call_notes.as_deref(), Some("shared"));
    }
}
