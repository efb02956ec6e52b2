//! Cross-tab synchronization.
//!
//! Another tab switching languages writes the shared preference record; an
//! external watcher surfaces those writes as a channel of raw values. This
//! task feeds them back through the same `change_language` entry point the
//! local UI uses, so there is a single state-mutation path. A tab reacting
//! to its own write observes an unchanged language and no-ops, which is what
//! breaks the notification loop.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::language::Language;
use crate::translator::Translator;

/// Applies externally observed preference values to a translator.
///
/// The task ends when the channel closes; dropping the handle aborts it.
pub struct CrossTabSync {
    task: tokio::task::JoinHandle<()>,
}

impl CrossTabSync {
    /// Spawn the sync task over a channel of raw preference values.
    pub fn spawn(translator: Translator, mut changes: mpsc::Receiver<String>) -> Self {
        let task = tokio::spawn(async move {
            while let Some(raw) = changes.recv().await {
                match Language::from_code(raw.trim()) {
                    Some(language) => {
                        let outcome = translator.change_language(language).await;
                        debug!(
                            language = %language,
                            ?outcome,
                            "external preference change processed"
                        );
                    }
                    None => {
                        warn!(value = %raw, "ignoring external preference with unsupported language");
                    }
                }
            }
            debug!("preference change channel closed, cross-tab sync stopped");
        });

        Self { task }
    }

    /// Whether the sync task is still draining the channel.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for CrossTabSync {
    fn drop(&mut self) {
        self.task.abort();
    }
}
