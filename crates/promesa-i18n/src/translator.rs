//! The translation resolver: owns the active language and catalog, resolves
//! keys, and drives language switches.
//!
//! # Invariants
//!
//! 1. A `Translator` value always holds a loaded catalog; there is no
//!    readable-but-empty state.
//! 2. `resolve` never fails: a missing key degrades to the literal key.
//! 3. Listeners observe only applied switches, never half-applied ones.
//! 4. Of several overlapping switch requests, the most recently requested
//!    one wins; stale catalog loads are discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::bus::{ChangeBus, LanguageListener};
use crate::catalog::{interpolate, Catalog, CatalogError, CatalogSource, Resolved, TranslateArgs};
use crate::language::Language;
use crate::prefs::{PreferenceStore, PREFERENCE_KEY};

/// Hard failures from the translation core.
///
/// Everything recoverable (missing keys, failed switches, listener panics)
/// is logged and degraded instead; only a startup with no loadable catalog
/// at all surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// Neither the requested language nor the fallback produced a catalog.
    #[error("no usable catalog: loading '{language}' failed")]
    NoUsableCatalog {
        /// The last language that was tried.
        language: Language,
        /// Why that load failed.
        #[source]
        source: CatalogError,
    },
}

/// What a [`Translator::change_language`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The switch committed; listeners were notified with this language
    /// (the fallback when the requested catalog would not load).
    Applied(Language),
    /// The target already was the active language; nothing happened.
    Unchanged,
    /// No catalog could be loaded; the previous state was kept and no
    /// listener fired.
    Reverted,
    /// A newer switch request was issued while this one was loading; this
    /// result was discarded.
    Superseded,
}

struct ActiveState {
    language: Language,
    catalog: Catalog,
}

struct Shared {
    fallback: Language,
    source: Arc<dyn CatalogSource>,
    store: Arc<dyn PreferenceStore>,
    state: Mutex<ActiveState>,
    /// Token of the most recently issued switch request.
    pending: AtomicU64,
    bus: ChangeBus,
}

/// The stateful i18n core. Cheap to clone; clones share one active state.
#[derive(Clone)]
pub struct Translator {
    shared: Arc<Shared>,
}

impl Translator {
    /// Load the catalog for `default_language` and become ready.
    ///
    /// When that load fails and the default is not the fallback language,
    /// the fallback is tried once. A second failure means the page has no
    /// text at all and is returned as a hard error.
    pub async fn initialize(
        default_language: Language,
        source: Arc<dyn CatalogSource>,
        store: Arc<dyn PreferenceStore>,
    ) -> Result<Self, I18nError> {
        let fallback = Language::FALLBACK;

        let (language, catalog) = match source.load(default_language).await {
            Ok(catalog) => (default_language, catalog),
            Err(e) if default_language != fallback => {
                warn!(
                    language = %default_language,
                    error = %e,
                    "catalog load failed at startup, retrying with fallback"
                );
                let catalog = source.load(fallback).await.map_err(|source| {
                    I18nError::NoUsableCatalog {
                        language: fallback,
                        source,
                    }
                })?;
                (fallback, catalog)
            }
            Err(source) => {
                return Err(I18nError::NoUsableCatalog {
                    language: default_language,
                    source,
                })
            }
        };

        info!(language = %language, "translator ready");

        Ok(Self {
            shared: Arc::new(Shared {
                fallback,
                source,
                store,
                state: Mutex::new(ActiveState { language, catalog }),
                pending: AtomicU64::new(0),
                bus: ChangeBus::new(),
            }),
        })
    }

    /// Resolve a dot-path key against the active catalog.
    ///
    /// A missing key is not an error: the literal key comes back as text and
    /// a warning is logged, so rendering keeps going with a visible marker.
    /// String leaves are interpolated with `args`; arrays and objects are
    /// returned as-is.
    pub fn resolve(&self, key: &str, args: &TranslateArgs) -> Resolved {
        let state = self.shared.state.lock().unwrap();
        match state.catalog.lookup(key) {
            None => {
                warn!(key, language = %state.language, "translation not found");
                Resolved::Text(key.to_string())
            }
            Some(Value::String(template)) => Resolved::Text(interpolate(template, args)),
            Some(other) => Resolved::Tree(other.clone()),
        }
    }

    /// Resolve a key and coerce the result to text.
    pub fn text(&self, key: &str, args: &TranslateArgs) -> String {
        self.resolve(key, args).into_text()
    }

    /// Switch the active language.
    ///
    /// Loads the target catalog (falling back once on failure), persists the
    /// preference, and notifies listeners synchronously. See
    /// [`SwitchOutcome`] for the ways a request can end; the active state is
    /// only ever replaced wholesale, never left half-switched.
    pub async fn change_language(&self, target: Language) -> SwitchOutcome {
        if self.current_language() == target {
            debug!(language = %target, "language unchanged, skipping switch");
            return SwitchOutcome::Unchanged;
        }

        // Claim the most-recent-request token. Any earlier in-flight load is
        // now stale and gets discarded when it resolves.
        let token = self.shared.pending.fetch_add(1, Ordering::SeqCst) + 1;

        let loaded = match self.shared.source.load(target).await {
            Ok(catalog) => Some((target, catalog)),
            Err(e) => {
                warn!(language = %target, error = %e, "catalog load failed during switch");
                if target != self.shared.fallback {
                    match self.shared.source.load(self.shared.fallback).await {
                        Ok(catalog) => Some((self.shared.fallback, catalog)),
                        Err(e) => {
                            warn!(
                                language = %self.shared.fallback,
                                error = %e,
                                "fallback catalog load failed during switch"
                            );
                            None
                        }
                    }
                } else {
                    None
                }
            }
        };

        if self.shared.pending.load(Ordering::SeqCst) != token {
            debug!(language = %target, "switch superseded by a newer request");
            return SwitchOutcome::Superseded;
        }

        let Some((applied, catalog)) = loaded else {
            warn!(language = %target, "language switch dropped, keeping current catalog");
            return SwitchOutcome::Reverted;
        };

        {
            let mut state = self.shared.state.lock().unwrap();
            if state.language == applied {
                // Reachable when the target catalog failed and the fallback
                // is already active: the switch is dropped, not re-applied.
                return if applied == target {
                    SwitchOutcome::Unchanged
                } else {
                    warn!(language = %target, "language switch dropped, keeping current catalog");
                    SwitchOutcome::Reverted
                };
            }
            state.language = applied;
            state.catalog = catalog;
        }

        if let Err(e) = self.shared.store.set(PREFERENCE_KEY, applied.code()) {
            warn!(language = %applied, error = %e, "failed to persist language preference");
        }

        self.shared.bus.notify(applied);
        SwitchOutcome::Applied(applied)
    }

    /// The active language.
    pub fn current_language(&self) -> Language {
        self.shared.state.lock().unwrap().language
    }

    /// The language whose catalog is complete.
    pub fn fallback_language(&self) -> Language {
        self.shared.fallback
    }

    /// Every language a catalog exists for.
    pub fn supported_languages(&self) -> &'static [Language] {
        &Language::ALL
    }

    /// Register a listener for applied switches.
    pub fn subscribe(&self, listener: &LanguageListener) {
        self.shared.bus.subscribe(listener);
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&self, listener: &LanguageListener) {
        self.shared.bus.unsubscribe(listener);
    }
}
