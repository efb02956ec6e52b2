//! In-memory string snapshots of the page.
//!
//! A view pulls every string it needs through the translator and is rebuilt
//! wholesale on each language change, so re-rendering is idempotent and
//! order-independent across consumers.

use tracing::warn;

use promesa_content::CardFace;
use promesa_i18n::{args, Language, Resolved, Translator};

use crate::commitments::CommitmentTracker;

/// Hero section.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroView {
    pub title: String,
    pub line: String,
    pub subtitle: String,
    pub heart_tooltip: String,
}

/// One rendered flip-card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub front: String,
    pub back: String,
    pub aria_label: String,
}

/// One checklist row.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitmentItemView {
    pub label: String,
    pub done: bool,
}

/// Commitment checklist section.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitmentsView {
    pub title: String,
    pub progress_text: String,
    pub items: Vec<CommitmentItemView>,
    pub cta_text: String,
}

/// Modal dialog strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub close_button: String,
    pub close_aria_label: String,
}

/// Surprise video section.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoView {
    pub title: String,
    pub not_supported: String,
}

/// Everything the page shows, in the active language.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub language: Language,
    pub meta_title: String,
    pub meta_description: String,
    pub hero: HeroView,
    pub cards_hint: String,
    pub cards: Vec<CardView>,
    pub commitments: CommitmentsView,
    pub modal: ModalView,
    pub video: VideoView,
}

impl PageView {
    /// Build the full snapshot from the active catalog.
    pub fn render(translator: &Translator, tracker: &CommitmentTracker) -> Self {
        let text = |key: &str| translator.text(key, &args!());

        let card_faces = structured::<Vec<CardFace>>(translator, "cards.items");
        let cards = card_faces
            .into_iter()
            .map(|face| {
                let aria_label =
                    translator.text("cards.cardAriaLabel", &args!(title = &face.front));
                CardView {
                    front: face.front,
                    back: face.back,
                    aria_label,
                }
            })
            .collect();

        let labels = structured::<Vec<String>>(translator, "commitments.items");
        let items = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| CommitmentItemView {
                label,
                done: tracker.is_done(index),
            })
            .collect();

        Self {
            language: translator.current_language(),
            meta_title: text("meta.title"),
            meta_description: text("meta.description"),
            hero: HeroView {
                title: text("hero.title"),
                line: text("hero.line"),
                subtitle: text("hero.subtitle"),
                heart_tooltip: text("hero.heartTooltip"),
            },
            cards_hint: text("cards.cardHint"),
            cards,
            commitments: CommitmentsView {
                title: text("commitments.title"),
                progress_text: tracker.progress_text(translator),
                items,
                cta_text: text("commitments.ctaText"),
            },
            modal: ModalView {
                close_button: text("modal.closeButton"),
                close_aria_label: text("modal.closeAriaLabel"),
            },
            video: VideoView {
                title: text("video.title"),
                not_supported: text("video.notSupported"),
            },
        }
    }
}

/// Deserialize a structured catalog leaf, degrading to empty on mismatch so
/// one bad section never takes the page down.
fn structured<T: serde::de::DeserializeOwned + Default>(translator: &Translator, key: &str) -> T {
    match translator.resolve(key, &args!()) {
        Resolved::Tree(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(key, error = %e, "structured content did not match its shape");
            T::default()
        }),
        Resolved::Text(_) => {
            warn!(key, "expected structured content");
            T::default()
        }
    }
}
