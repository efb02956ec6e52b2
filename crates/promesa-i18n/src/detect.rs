//! Initial language detection.
//!
//! Precedence, first match wins:
//! 1. the persisted preference, when it names a supported language;
//! 2. the runtime's reported user locale, truncated to its primary subtag;
//! 3. a configured default.
//!
//! Detection is a pure read of the store and the locale source; it never
//! fails and never writes.

use std::env;
use std::sync::Arc;

use tracing::debug;

use crate::language::Language;
use crate::prefs::{PreferenceStore, PREFERENCE_KEY};

/// Where the runtime's user locale comes from.
pub trait LocaleSource: Send + Sync {
    /// The user locale as reported by the environment (e.g. "fr-CA"),
    /// or `None` when nothing is reported.
    fn user_locale(&self) -> Option<String>;
}

/// Reads the locale the operating system reports, falling back to the
/// `LC_ALL`/`LC_MESSAGES`/`LANG` environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLocale;

impl LocaleSource for SystemLocale {
    fn user_locale(&self) -> Option<String> {
        if let Some(locale) = sys_locale::get_locale() {
            return Some(locale);
        }

        for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
            if let Ok(value) = env::var(var) {
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }

        None
    }
}

/// A fixed locale, mainly for embedding and tests.
#[derive(Debug, Clone)]
pub struct FixedLocale(pub Option<String>);

impl LocaleSource for FixedLocale {
    fn user_locale(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Diagnostic view of a detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionReport {
    /// The language detection settled on.
    pub detected: Language,
    /// True when the persisted preference decided.
    pub from_preference: bool,
    /// True when the user locale decided.
    pub from_locale: bool,
    /// True when detection fell through to the default.
    pub is_default: bool,
}

/// Decides the initial language from the preference record, the user locale,
/// and a default.
pub struct LanguageDetector {
    store: Arc<dyn PreferenceStore>,
    locale: Arc<dyn LocaleSource>,
    default_language: Language,
}

impl LanguageDetector {
    /// Build a detector over the given capabilities.
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        locale: Arc<dyn LocaleSource>,
        default_language: Language,
    ) -> Self {
        Self {
            store,
            locale,
            default_language,
        }
    }

    /// Detect the language to start in.
    pub fn detect(&self) -> Language {
        self.report().detected
    }

    /// Detect, reporting which signal decided. No side effects.
    pub fn report(&self) -> DetectionReport {
        if let Some(saved) = self.saved_preference() {
            return DetectionReport {
                detected: saved,
                from_preference: true,
                from_locale: false,
                is_default: false,
            };
        }

        if let Some(locale) = self.locale.user_locale().as_deref().and_then(Language::parse) {
            return DetectionReport {
                detected: locale,
                from_preference: false,
                from_locale: true,
                is_default: false,
            };
        }

        DetectionReport {
            detected: self.default_language,
            from_preference: false,
            from_locale: false,
            is_default: true,
        }
    }

    /// The persisted preference, when readable and supported. A store read
    /// error counts as no preference; detection must never fail.
    fn saved_preference(&self) -> Option<Language> {
        match self.store.get(PREFERENCE_KEY) {
            Ok(value) => value.as_deref().and_then(Language::from_code),
            Err(e) => {
                debug!(error = %e, "preference store unreadable during detection");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferenceStore;
    use test_case::test_case;

    fn detector(saved: Option<&str>, locale: Option<&str>) -> LanguageDetector {
        let store = match saved {
            Some(code) => MemoryPreferenceStore::with(PREFERENCE_KEY, code),
            None => MemoryPreferenceStore::new(),
        };
        LanguageDetector::new(
            Arc::new(store),
            Arc::new(FixedLocale(locale.map(String::from))),
            Language::Es,
        )
    }

    #[test_case(Some("en"), Some("fr-FR"), Language::En ; "preference wins over locale")]
    #[test_case(None, Some("fr-CA"), Language::Fr ; "locale truncated to primary subtag")]
    #[test_case(None, Some("de-DE"), Language::Es ; "unsupported locale falls to default")]
    #[test_case(None, None, Language::Es ; "no signal falls to default")]
    #[test_case(Some("xx"), Some("en-GB"), Language::En ; "invalid preference falls to locale")]
    fn test_detection_precedence(saved: Option<&str>, locale: Option<&str>, expected: Language) {
        assert_eq!(detector(saved, locale).detect(), expected);
    }

    #[test]
    fn test_report_flags_preference() {
        let report = detector(Some("en"), Some("fr-FR")).report();
        assert_eq!(report.detected, Language::En);
        assert!(report.from_preference);
        assert!(!report.from_locale);
        assert!(!report.is_default);
    }

    #[test]
    fn test_report_flags_locale() {
        let report = detector(None, Some("fr-CA")).report();
        assert_eq!(report.detected, Language::Fr);
        assert!(!report.from_preference);
        assert!(report.from_locale);
        assert!(!report.is_default);
    }

    #[test]
    fn test_report_flags_default() {
        let report = detector(None, None).report();
        assert_eq!(report.detected, Language::Es);
        assert!(report.is_default);
    }

    #[test]
    fn test_detection_has_no_side_effects() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let detector = LanguageDetector::new(
            store.clone(),
            Arc::new(FixedLocale(Some("fr-FR".into()))),
            Language::Es,
        );
        detector.detect();
        detector.report();
        assert_eq!(store.writes(), 0);
        assert_eq!(store.get(PREFERENCE_KEY).unwrap(), None);
    }

    #[test]
    fn test_unreadable_store_counts_as_absent() {
        struct BrokenStore;
        impl PreferenceStore for BrokenStore {
            fn get(&self, _key: &str) -> Result<Option<String>, crate::prefs::StoreError> {
                Err(crate::prefs::StoreError::Read("disk on fire".into()))
            }
            fn set(&self, _key: &str, _value: &str) -> Result<(), crate::prefs::StoreError> {
                Ok(())
            }
        }

        let detector = LanguageDetector::new(
            Arc::new(BrokenStore),
            Arc::new(FixedLocale(Some("en-US".into()))),
            Language::Es,
        );
        assert_eq!(detector.detect(), Language::En);
    }
}
