//! Bundled page content for Promesa.
//!
//! Ships one translation catalog per supported language, embedded at compile
//! time, and implements the core's [`CatalogSource`] capability over them.
//! Consumers that want structure instead of key lookups can deserialize a
//! catalog into [`PageContent`].

mod model;

pub use model::{
    CardFace, CardsContent, CommitmentsContent, ContentError, HeroContent, LanguageContent,
    LanguageOption, ModalContent, PageContent, PageMeta, UiConfig, VideoContent, WhatsappContent,
};

use async_trait::async_trait;

use promesa_i18n::{Catalog, CatalogError, CatalogSource, Language};

/// The embedded catalog JSON for a language.
pub fn bundled_json(language: Language) -> &'static str {
    match language {
        Language::Es => include_str!("../assets/es.json"),
        Language::En => include_str!("../assets/en.json"),
        Language::Fr => include_str!("../assets/fr.json"),
    }
}

/// Catalog source over the embedded assets.
///
/// Every supported language has an asset, so loads only fail if an asset is
/// malformed, which the crate's tests rule out.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledCatalogs;

#[async_trait]
impl CatalogSource for BundledCatalogs {
    async fn load(&self, language: Language) -> Result<Catalog, CatalogError> {
        Catalog::from_json_str(language, bundled_json(language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_loadable_catalog() {
        for language in Language::ALL {
            let catalog = tokio_test::block_on(BundledCatalogs.load(language)).unwrap();
            assert_eq!(catalog.language(), language);
            assert!(catalog.contains("hero.title"));
        }
    }

    #[test]
    fn test_fallback_keys_exist_everywhere() {
        // Spanish is the complete tree; the other catalogs mirror it today,
        // and these spot checks catch a key going missing in translation.
        for language in Language::ALL {
            let catalog = tokio_test::block_on(BundledCatalogs.load(language)).unwrap();
            for key in [
                "meta.title",
                "hero.line",
                "cards.items",
                "cards.cardAriaLabel",
                "commitments.progressText",
                "commitments.items",
                "modal.closeButton",
                "video.title",
                "whatsapp.defaultMessage",
                "language.available",
            ] {
                assert!(catalog.contains(key), "{language} is missing {key}");
            }
        }
    }

    #[test]
    fn test_bundled_json_is_distinct_per_language() {
        assert_ne!(bundled_json(Language::Es), bundled_json(Language::En));
        assert_ne!(bundled_json(Language::En), bundled_json(Language::Fr));
    }
}
