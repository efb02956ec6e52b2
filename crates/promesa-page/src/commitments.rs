//! Commitment checklist state.
//!
//! Each checkbox persists under its own key so the checklist survives
//! reloads, and the progress text goes through the translator so it follows
//! the active language.

use std::sync::Arc;

use tracing::warn;

use promesa_i18n::{args, PreferenceStore, StoreError, Translator};

const KEY_PREFIX: &str = "commitment.";

/// Tracks which commitments are checked off.
pub struct CommitmentTracker {
    store: Arc<dyn PreferenceStore>,
    total: usize,
}

impl CommitmentTracker {
    /// Track `total` commitments in the given store.
    pub fn new(store: Arc<dyn PreferenceStore>, total: usize) -> Self {
        Self { store, total }
    }

    fn key(index: usize) -> String {
        format!("{KEY_PREFIX}{index}")
    }

    /// Whether the commitment at `index` is checked.
    pub fn is_done(&self, index: usize) -> bool {
        index < self.total
            && matches!(
                self.store.get(&Self::key(index)),
                Ok(Some(value)) if value == "1"
            )
    }

    /// Check or uncheck one commitment.
    pub fn set_done(&self, index: usize, done: bool) -> Result<(), StoreError> {
        if index >= self.total {
            warn!(index, total = self.total, "commitment index out of range");
            return Ok(());
        }
        self.store
            .set(&Self::key(index), if done { "1" } else { "0" })
    }

    /// Flip one commitment, returning its new state.
    pub fn toggle(&self, index: usize) -> Result<bool, StoreError> {
        let next = !self.is_done(index);
        self.set_done(index, next)?;
        Ok(next)
    }

    /// How many commitments are checked.
    pub fn completed(&self) -> usize {
        (0..self.total).filter(|&i| self.is_done(i)).count()
    }

    /// How many commitments exist.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The localized progress counter, e.g. `"2/5"`.
    pub fn progress_text(&self, translator: &Translator) -> String {
        translator.text(
            "commitments.progressText",
            &args!(completed = self.completed(), total = self.total),
        )
    }
}
