//! The preference persistence capability.
//!
//! One key-value pair survives the page: the chosen language code, stored
//! under [`PREFERENCE_KEY`]. The store itself is external (a file, browser
//! storage behind a bridge, anything key-value); the core only needs get/set.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Storage key for the persisted language preference.
pub const PREFERENCE_KEY: &str = "app_language";

/// Preference store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read preference store: {0}")]
    Read(String),

    #[error("failed to write preference store: {0}")]
    Write(String),
}

/// Key-value persistence shared with other tabs/processes.
pub trait PreferenceStore: Send + Sync {
    /// Read a value, `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and single-tab embedding.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryPreferenceStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one key.
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// How many writes have been performed.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
