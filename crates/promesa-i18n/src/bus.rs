//! Change notification bus.
//!
//! Listeners are identified by their `Arc` pointer, so registering the same
//! callback handle twice keeps a single entry and a change event fires it
//! once. Delivery is synchronous over a snapshot taken at notify time; a
//! listener registered during delivery does not receive the in-flight event.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use crate::language::Language;

/// A callback fired with the new language after every applied switch.
pub type LanguageListener = Arc<dyn Fn(Language) + Send + Sync>;

fn listener_key(listener: &LanguageListener) -> usize {
    Arc::as_ptr(listener) as *const () as usize
}

/// Registry of language-change listeners.
#[derive(Clone, Default)]
pub struct ChangeBus {
    listeners: Arc<Mutex<Vec<(usize, LanguageListener)>>>,
}

impl ChangeBus {
    /// An empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Re-registering the same handle is a no-op.
    pub fn subscribe(&self, listener: &LanguageListener) {
        let key = listener_key(listener);
        let mut listeners = self.listeners.lock().unwrap();
        if listeners.iter().any(|(k, _)| *k == key) {
            debug!("listener already subscribed, keeping single registration");
            return;
        }
        listeners.push((key, Arc::clone(listener)));
    }

    /// Remove a listener. Unknown handles are ignored.
    pub fn unsubscribe(&self, listener: &LanguageListener) {
        let key = listener_key(listener);
        self.listeners.lock().unwrap().retain(|(k, _)| *k != key);
    }

    /// Notify every current listener, in registration order.
    ///
    /// A panicking listener is logged and skipped; the remaining listeners
    /// still run, and the caller never observes the panic.
    pub fn notify(&self, language: Language) {
        let snapshot: Vec<LanguageListener> = {
            let listeners = self.listeners.lock().unwrap();
            listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in snapshot {
            if catch_unwind(AssertUnwindSafe(|| (*listener)(language))).is_err() {
                error!(language = %language, "language change listener panicked");
            }
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Whether nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
