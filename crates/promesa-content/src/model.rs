//! Typed view of a page catalog.
//!
//! Mirrors the catalog's tree so structured sections (card lists, commitment
//! items, language options) deserialize straight into consumer types instead
//! of being walked value-by-value.

use serde::Deserialize;

use promesa_i18n::{Catalog, Language};

/// Content model errors.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The catalog tree does not match the page's content shape.
    #[error("page content for '{language}' is malformed: {message}")]
    Malformed {
        language: Language,
        message: String,
    },
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub lang: String,
}

/// Hero section strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub line: String,
    pub subtitle: String,
    pub heart_tooltip: String,
    pub heart_aria_label: String,
}

/// One flip-card: front label, back explanation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardFace {
    pub front: String,
    pub back: String,
}

/// Flip-card section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsContent {
    pub aria_label: String,
    pub card_hint: String,
    /// Template with a `{{title}}` placeholder.
    pub card_aria_label: String,
    pub items: Vec<CardFace>,
}

/// Commitment checklist section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentsContent {
    pub title: String,
    pub progress_aria_label: String,
    /// Template with `{{completed}}` and `{{total}}` placeholders.
    pub progress_text: String,
    pub items: Vec<String>,
    pub cta_text: String,
    pub cta_alert: String,
}

/// Modal dialog strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalContent {
    pub close_aria_label: String,
    pub close_button: String,
}

/// Surprise video strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContent {
    pub aria_label: String,
    pub title: String,
    pub close_aria_label: String,
    pub player_aria_label: String,
    pub not_supported: String,
}

/// WhatsApp deep-link strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappContent {
    pub default_message: String,
}

/// One entry in the language switcher menu.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
    pub flag: String,
}

/// Language switcher strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguageContent {
    pub selector: String,
    pub current: String,
    pub available: Vec<LanguageOption>,
}

/// Presentation knobs carried with the content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    pub typing_duration_ms: u64,
}

/// The whole page, one language.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageContent {
    pub meta: PageMeta,
    pub hero: HeroContent,
    pub cards: CardsContent,
    pub commitments: CommitmentsContent,
    pub modal: ModalContent,
    pub video: VideoContent,
    pub whatsapp: WhatsappContent,
    pub language: LanguageContent,
    pub config: UiConfig,
}

impl PageContent {
    /// Deserialize the typed model out of a loaded catalog.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, ContentError> {
        serde_json::from_value(catalog.root().clone()).map_err(|e| ContentError::Malformed {
            language: catalog.language(),
            message: e.to_string(),
        })
    }
}
