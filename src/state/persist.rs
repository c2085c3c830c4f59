//! Durable key/value storage for the session snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store serializes the whole session after every action and reads it
//! back once at startup. In the browser that is `localStorage`; native builds
//! and tests use [`MemoryStorage`].

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub trait SessionStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, raw: &str);
}

impl<T: SessionStorage + ?Sized> SessionStorage for Rc<T> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&self, key: &str, raw: &str) {
        (**self).save(key, raw);
    }
}

/// Load a JSON value stored under `key`. Unreadable JSON counts as absent.
pub fn load_json<T: DeserializeOwned>(storage: &dyn SessionStorage, key: &str) -> Option<T> {
    let raw = storage.load(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("discarding unreadable snapshot under '{key}': {e}");
            None
        }
    }
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(storage: &dyn SessionStorage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.save(key, &raw),
        Err(e) => log::warn!("could not serialize snapshot for '{key}': {e}"),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_entry(key: &str, raw: &str) -> Self {
        let storage = Self::default();
        storage.save(key, raw);
        storage
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, raw: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), raw.to_owned());
    }
}

/// `window.localStorage`, silently unavailable outside a browser window.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "csr")]
impl SessionStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, raw: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable; session not persisted");
            return;
        };
        if storage.set_item(key, raw).is_err() {
            log::warn!("localStorage rejected write for '{key}'");
        }
    }
}
