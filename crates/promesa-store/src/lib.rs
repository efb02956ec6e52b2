//! Persistence adapters for Promesa.
//!
//! Implements the core's [`PreferenceStore`](promesa_i18n::PreferenceStore)
//! capability over a shared JSON file and watches that file so language
//! choices made in other tabs/processes flow back into the resolver.

mod file;
mod watcher;

pub use file::FilePreferenceStore;
pub use watcher::{PreferenceWatcher, WatcherGuard};
