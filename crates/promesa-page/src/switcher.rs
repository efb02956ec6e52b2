//! Language switcher view model.
//!
//! Holds the menu's open/closed state and the option list, and routes a
//! selection through the translator. Selecting the active language just
//! closes the menu; the translator's no-op guard does the rest.

use tracing::warn;

use promesa_content::LanguageOption;
use promesa_i18n::{args, Language, Resolved, SwitchOutcome, Translator};

/// State behind the language dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSwitcher {
    open: bool,
    current: Language,
    label: String,
    options: Vec<LanguageOption>,
}

impl LanguageSwitcher {
    /// Build the switcher against the active language.
    pub fn from_translator(translator: &Translator) -> Self {
        let mut switcher = Self {
            open: false,
            current: translator.current_language(),
            label: String::new(),
            options: Vec::new(),
        };
        switcher.refresh(translator);
        switcher
    }

    /// Re-pull display strings and options from the active catalog.
    pub fn refresh(&mut self, translator: &Translator) {
        self.current = translator.current_language();
        self.label = translator.text("language.current", &args!());
        self.options = match translator.resolve("language.available", &args!()) {
            Resolved::Tree(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!(error = %e, "language options did not match their shape");
                builtin_options()
            }),
            Resolved::Text(_) => builtin_options(),
        };
    }

    /// The active language.
    pub fn current(&self) -> Language {
        self.current
    }

    /// The button label (the active language's display name).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The menu entries.
    pub fn options(&self) -> &[LanguageOption] {
        &self.options
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the menu.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the menu.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Toggle the menu.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Apply a menu selection. Closes the menu whatever happens.
    pub async fn select(&mut self, translator: &Translator, code: &str) -> SwitchOutcome {
        let outcome = match Language::from_code(code) {
            Some(language) => translator.change_language(language).await,
            None => {
                warn!(code, "selected language is not supported");
                SwitchOutcome::Unchanged
            }
        };
        self.close();
        self.refresh(translator);
        outcome
    }
}

/// Options derived from the language set itself, used when the catalog does
/// not carry a selector section.
fn builtin_options() -> Vec<LanguageOption> {
    Language::ALL
        .iter()
        .map(|language| LanguageOption {
            code: language.code().to_string(),
            name: language.name().to_string(),
            flag: language.flag().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use promesa_content::BundledCatalogs;
    use promesa_i18n::MemoryPreferenceStore;
    use std::sync::Arc;

    async fn translator(language: Language) -> Translator {
        Translator::initialize(
            language,
            Arc::new(BundledCatalogs),
            Arc::new(MemoryPreferenceStore::new()),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_switcher_reflects_current_language() {
        let translator = translator(Language::Fr).await;
        let switcher = LanguageSwitcher::from_translator(&translator);

        assert_eq!(switcher.current(), Language::Fr);
        assert_eq!(switcher.label(), "Français");
        let codes: Vec<&str> = switcher.options().iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["es", "en", "fr"]);
        assert!(!switcher.is_open());
    }

    #[tokio::test]
    async fn test_menu_open_close() {
        let translator = translator(Language::Es).await;
        let mut switcher = LanguageSwitcher::from_translator(&translator);

        switcher.toggle();
        assert!(switcher.is_open());
        switcher.toggle();
        assert!(!switcher.is_open());
        switcher.open();
        switcher.close();
        assert!(!switcher.is_open());
    }

    #[tokio::test]
    async fn test_select_switches_and_closes() {
        let translator = translator(Language::Es).await;
        let mut switcher = LanguageSwitcher::from_translator(&translator);
        switcher.open();

        let outcome = switcher.select(&translator, "en").await;
        assert_eq!(outcome, SwitchOutcome::Applied(Language::En));
        assert!(!switcher.is_open());
        assert_eq!(switcher.current(), Language::En);
        assert_eq!(switcher.label(), "English");
    }

    #[tokio::test]
    async fn test_selecting_current_language_only_closes() {
        let translator = translator(Language::Es).await;
        let mut switcher = LanguageSwitcher::from_translator(&translator);
        switcher.open();

        let outcome = switcher.select(&translator, "es").await;
        assert_eq!(outcome, SwitchOutcome::Unchanged);
        assert!(!switcher.is_open());
    }

    #[tokio::test]
    async fn test_selecting_unknown_code_is_harmless() {
        let translator = translator(Language::Es).await;
        let mut switcher = LanguageSwitcher::from_translator(&translator);
        switcher.open();

        let outcome = switcher.select(&translator, "tlh").await;
        assert_eq!(outcome, SwitchOutcome::Unchanged);
        assert_eq!(translator.current_language(), Language::Es);
        assert!(!switcher.is_open());
    }
}
