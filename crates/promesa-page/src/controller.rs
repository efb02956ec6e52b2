//! Page controller: wires detection, the translator, view re-rendering, and
//! cross-tab sync into one lifecycle.
//!
//! Startup order mirrors the page: detect the language, bring the translator
//! up over the bundled catalogs, render the first view, register the
//! re-render listener, then start watching the shared preference file.
//! Dropping the controller unsubscribes the listener and stops the watcher
//! and sync task.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::info;

use promesa_content::BundledCatalogs;
use promesa_i18n::{
    args, CrossTabSync, I18nError, Language, LanguageDetector, LanguageListener, LocaleSource,
    Resolved, StoreError, SwitchOutcome, SystemLocale, Translator, PREFERENCE_KEY,
};
use promesa_store::{FilePreferenceStore, PreferenceWatcher, WatcherGuard};

use crate::commitments::CommitmentTracker;
use crate::switcher::LanguageSwitcher;
use crate::view::PageView;

/// Failures while bringing the page up.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    I18n(#[from] I18nError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How to start the page.
pub struct PageOptions {
    preference_file: PathBuf,
    default_language: Language,
    locale: Arc<dyn LocaleSource>,
}

impl PageOptions {
    /// Options with the stock locale source and the fallback default.
    pub fn new(preference_file: impl Into<PathBuf>) -> Self {
        Self {
            preference_file: preference_file.into(),
            default_language: Language::FALLBACK,
            locale: Arc::new(SystemLocale),
        }
    }

    /// Override the default language used when nothing else decides.
    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Override where the user locale comes from.
    pub fn with_locale_source(mut self, locale: Arc<dyn LocaleSource>) -> Self {
        self.locale = locale;
        self
    }
}

/// The running page.
pub struct PageController {
    translator: Translator,
    tracker: Arc<CommitmentTracker>,
    view: Arc<Mutex<PageView>>,
    render_listener: LanguageListener,
    _sync: CrossTabSync,
    _watcher: WatcherGuard,
}

impl PageController {
    /// Detect the language, load content, and start reacting to changes.
    pub async fn start(options: PageOptions) -> Result<Self, PageError> {
        let store = Arc::new(FilePreferenceStore::open(&options.preference_file));

        let detector = LanguageDetector::new(
            store.clone(),
            options.locale.clone(),
            options.default_language,
        );
        let report = detector.report();
        info!(
            language = %report.detected,
            from_preference = report.from_preference,
            from_locale = report.from_locale,
            "starting page"
        );

        let translator =
            Translator::initialize(report.detected, Arc::new(BundledCatalogs), store.clone())
                .await?;

        let total = match translator.resolve("commitments.items", &args!()) {
            Resolved::Tree(Value::Array(items)) => items.len(),
            _ => 0,
        };
        let tracker = Arc::new(CommitmentTracker::new(store.clone(), total));

        let view = Arc::new(Mutex::new(PageView::render(&translator, &tracker)));

        let render_listener: LanguageListener = {
            let translator = translator.clone();
            let tracker = tracker.clone();
            let view = view.clone();
            Arc::new(move |_| {
                let snapshot = PageView::render(&translator, &tracker);
                *view.lock().unwrap() = snapshot;
            })
        };
        translator.subscribe(&render_listener);

        let watcher = PreferenceWatcher::spawn(store.as_ref().clone(), PREFERENCE_KEY)?;
        let (watcher_guard, changes) = watcher.into_parts();
        let sync = CrossTabSync::spawn(translator.clone(), changes);

        Ok(Self {
            translator,
            tracker,
            view,
            render_listener,
            _sync: sync,
            _watcher: watcher_guard,
        })
    }

    /// The i18n core, for consumers that resolve their own strings.
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// A snapshot of the rendered page.
    pub fn view(&self) -> PageView {
        self.view.lock().unwrap().clone()
    }

    /// Rebuild the snapshot without a language change (e.g. after a
    /// commitment toggle).
    pub fn refresh_view(&self) {
        *self.view.lock().unwrap() = PageView::render(&self.translator, &self.tracker);
    }

    /// The commitment checklist.
    pub fn tracker(&self) -> &CommitmentTracker {
        &self.tracker
    }

    /// A fresh language switcher model for the current state.
    pub fn switcher(&self) -> LanguageSwitcher {
        LanguageSwitcher::from_translator(&self.translator)
    }

    /// Switch the page language.
    pub async fn change_language(&self, language: Language) -> SwitchOutcome {
        self.translator.change_language(language).await
    }

    /// Toggle one commitment and refresh the snapshot.
    pub fn toggle_commitment(&self, index: usize) -> Result<bool, StoreError> {
        let state = self.tracker.toggle(index)?;
        self.refresh_view();
        Ok(state)
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        // The re-render listener holds a translator clone; detach it so the
        // shared state can actually drop.
        self.translator.unsubscribe(&self.render_listener);
    }
}
