//! Shows which signal decides the startup language.

use std::sync::Arc;

use promesa_i18n::{
    FixedLocale, Language, LanguageDetector, MemoryPreferenceStore, SystemLocale, PREFERENCE_KEY,
};

fn main() {
    // A saved preference always wins.
    let detector = LanguageDetector::new(
        Arc::new(MemoryPreferenceStore::with(PREFERENCE_KEY, "en")),
        Arc::new(FixedLocale(Some("fr-FR".into()))),
        Language::Es,
    );
    println!("saved preference: {:?}", detector.report());

    // Without one, the user locale decides (region dropped).
    let detector = LanguageDetector::new(
        Arc::new(MemoryPreferenceStore::new()),
        Arc::new(FixedLocale(Some("fr-CA".into()))),
        Language::Es,
    );
    println!("user locale:      {:?}", detector.report());

    // An unsupported locale falls through to the default.
    let detector = LanguageDetector::new(
        Arc::new(MemoryPreferenceStore::new()),
        Arc::new(FixedLocale(Some("de-DE".into()))),
        Language::Es,
    );
    println!("default:          {:?}", detector.report());

    // And against the real machine:
    let detector = LanguageDetector::new(
        Arc::new(MemoryPreferenceStore::new()),
        Arc::new(SystemLocale),
        Language::Es,
    );
    println!("this machine:     {:?}", detector.report());
}
