//! Session-store transport.
//!
//! Models the browser's per-tab session storage: a string key-value map that
//! survives same-origin navigations within one tab. [`SessionStorage`] is a
//! cheap cloneable handle so the sending and receiving page can share it.

use super::traits::HandoffTransport;
use crate::codec;
use crate::error::HandoffError;
use crate::state::HandoffState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Per-tab string key-value store.
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: &str) {
        self.items().insert(key.to_owned(), value.to_owned());
    }

    pub fn remove_item(&self, key: &str) {
        self.items().remove(key);
    }

    /// Atomically read and delete an entry.
    pub fn take_item(&self, key: &str) -> Option<String> {
        self.items().remove(key)
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Handoff channel backed by one session-storage key.
#[derive(Debug, Clone)]
pub struct SessionTransport {
    storage: SessionStorage,
    key: String,
}

impl SessionTransport {
    pub fn new(storage: SessionStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }
}

impl HandoffTransport for SessionTransport {
    fn write(&mut self, payload: &str) {
        self.storage.set_item(&self.key, payload);
    }

    fn peek(&self) -> Option<String> {
        self.storage.get_item(&self.key)
    }

    fn clear(&mut self) {
        self.storage.remove_item(&self.key);
    }

    fn peek_and_clear(&mut self) -> Option<String> {
        self.storage.take_item(&self.key)
    }

    fn encode(&self, state: &HandoffState) -> Result<String, HandoffError> {
        serde_json::to_string(state).map_err(HandoffError::Encode)
    }

    fn decode(&self, payload: &str) -> Option<HandoffState> {
        codec::decode_json(payload)
    }
}
