//! Internationalization core for Promesa.
//!
//! Owns the active language for a page session: detection at startup,
//! dot-path key resolution with `{{name}}` interpolation, runtime language
//! switching with listener notification, and cross-tab convergence through a
//! shared preference record.
//!
//! The core consumes three capabilities supplied by adapters:
//! [`CatalogSource`] (where translation trees come from),
//! [`PreferenceStore`] (where the chosen language persists), and
//! [`LocaleSource`] (what locale the runtime reports).

pub mod bus;
pub mod catalog;
pub mod detect;
pub mod language;
pub mod prefs;
pub mod sync;
pub mod translator;

pub use bus::{ChangeBus, LanguageListener};
pub use catalog::{
    interpolate, Catalog, CatalogError, CatalogSource, Resolved, TranslateArgs,
};
pub use detect::{
    DetectionReport, FixedLocale, LanguageDetector, LocaleSource, SystemLocale,
};
pub use language::Language;
pub use prefs::{MemoryPreferenceStore, PreferenceStore, StoreError, PREFERENCE_KEY};
pub use sync::CrossTabSync;
pub use translator::{I18nError, SwitchOutcome, Translator};
