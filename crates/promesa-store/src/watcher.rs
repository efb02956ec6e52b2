//! Watches the preference file for writes made by other tabs/processes.
//!
//! Filesystem events land on notify's own thread and are bridged into a
//! bounded tokio channel carrying the watched key's new value. Consecutive
//! identical values are collapsed so editor-style double writes and the
//! process's own rename do not produce spurious traffic.

use std::path::Path;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use promesa_i18n::{PreferenceStore, StoreError};

use crate::file::FilePreferenceStore;

/// Keeps the underlying OS watcher alive. Dropping it stops event delivery.
pub struct WatcherGuard {
    _watcher: notify::RecommendedWatcher,
}

/// Streams external writes to one key of a [`FilePreferenceStore`].
pub struct PreferenceWatcher {
    guard: WatcherGuard,
    receiver: mpsc::Receiver<String>,
}

impl PreferenceWatcher {
    /// Watch `key` in the given store.
    ///
    /// The store's parent directory is watched (the file itself may not
    /// exist yet, and atomic writers replace it by rename).
    pub fn spawn(store: FilePreferenceStore, key: &str) -> Result<Self, StoreError> {
        let path = store.path().to_path_buf();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        std::fs::create_dir_all(&parent).map_err(|e| StoreError::Read(e.to_string()))?;

        let file_name = path.file_name().map(|n| n.to_os_string());
        let key = key.to_string();
        let mut last_seen = store.get(&key).ok().flatten();
        let (tx, rx) = mpsc::channel(16);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
            let Ok(event) = res else { return };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            if !event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name)
            {
                return;
            }

            let value = match store.get(&key) {
                Ok(Some(value)) => value,
                Ok(None) => return,
                Err(e) => {
                    debug!(error = %e, "preference file unreadable mid-write, skipping event");
                    return;
                }
            };

            if last_seen.as_deref() == Some(value.as_str()) {
                return;
            }
            last_seen = Some(value.clone());

            if tx.blocking_send(value).is_err() {
                warn!("preference change receiver dropped");
            }
        })
        .map_err(|e| StoreError::Read(e.to_string()))?;

        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .map_err(|e| StoreError::Read(e.to_string()))?;

        Ok(Self {
            guard: WatcherGuard { _watcher: watcher },
            receiver: rx,
        })
    }

    /// The next externally observed value, or `None` when watching stopped.
    pub async fn next_change(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Split into the keep-alive guard and the value channel, for wiring
    /// into a consumer that owns its own receive loop.
    pub fn into_parts(self) -> (WatcherGuard, mpsc::Receiver<String>) {
        (self.guard, self.receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promesa_i18n::PREFERENCE_KEY;
    use promesa_test_utils::temp_dir;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    #[tokio::test]
    async fn test_watcher_sees_external_write() {
        let dir = temp_dir();
        let path = dir.path().join("prefs.json");
        let store = FilePreferenceStore::open(&path);

        let mut watcher = PreferenceWatcher::spawn(store.clone(), PREFERENCE_KEY).unwrap();

        // Give the OS watcher a moment to arm.
        sleep(Duration::from_millis(100)).await;

        // Simulate another tab writing its choice.
        let other_tab = FilePreferenceStore::open(&path);
        other_tab.set(PREFERENCE_KEY, "en").unwrap();

        let value = timeout(Duration::from_secs(5), watcher.next_change())
            .await
            .expect("no event within timeout");
        assert_eq!(value, Some("en".to_string()));
    }

    #[tokio::test]
    async fn test_watcher_collapses_identical_values() {
        let dir = temp_dir();
        let path = dir.path().join("prefs.json");
        let store = FilePreferenceStore::open(&path);
        store.set(PREFERENCE_KEY, "es").unwrap();

        let mut watcher = PreferenceWatcher::spawn(store.clone(), PREFERENCE_KEY).unwrap();
        sleep(Duration::from_millis(100)).await;

        // Same value again: no new information.
        store.set(PREFERENCE_KEY, "es").unwrap();
        sleep(Duration::from_millis(100)).await;
        // A real change must still come through.
        store.set(PREFERENCE_KEY, "fr").unwrap();

        let value = timeout(Duration::from_secs(5), watcher.next_change())
            .await
            .expect("no event within timeout");
        assert_eq!(value, Some("fr".to_string()));
    }

    #[tokio::test]
    async fn test_unrelated_files_are_ignored() {
        let dir = temp_dir();
        let path = dir.path().join("prefs.json");
        let store = FilePreferenceStore::open(&path);

        let mut watcher = PreferenceWatcher::spawn(store.clone(), PREFERENCE_KEY).unwrap();
        sleep(Duration::from_millis(100)).await;

        std::fs::write(dir.path().join("other.json"), "{}").unwrap();
        sleep(Duration::from_millis(100)).await;
        store.set(PREFERENCE_KEY, "fr").unwrap();

        let value = timeout(Duration::from_secs(5), watcher.next_change())
            .await
            .expect("no event within timeout");
        // The first value delivered is from the store file, not other.json.
        assert_eq!(value, Some("fr".to_string()));
    }
}
