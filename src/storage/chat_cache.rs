use crate::common::ChatMessage;

use super::StorageError;
use super::local_store::LocalStore;

pub const CHAT_HISTORY_KEY: &str = "chat.history";

/// Local copy of the conversation, stored as a JSON array.
#[derive(Clone)]
pub struct ChatCache {
    store: LocalStore,
}

impl ChatCache {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// A missing or corrupt cache loads as empty.
    pub fn load(&self) -> Vec<ChatMessage> {
        let raw = match self.store.get_item(CHAT_HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Failed to read chat cache: {err}");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("Discarding corrupt chat cache: {err}");
            Vec::new()
        })
    }

    pub fn save(&self, messages: &[ChatMessage]) -> Result<(), StorageError> {
        let json = serde_json::to_string(messages)?;
        self.store.set_item(CHAT_HISTORY_KEY, &json)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove_item(CHAT_HISTORY_KEY)
    }
}
