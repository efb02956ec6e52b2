//! Resolution and interpolation against an inline catalog.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use promesa_i18n::{
    args, Catalog, CatalogError, CatalogSource, Language, MemoryPreferenceStore, Translator,
};

struct InlineSource;

#[async_trait]
impl CatalogSource for InlineSource {
    async fn load(&self, language: Language) -> Result<Catalog, CatalogError> {
        let root = match language {
            Language::Es => json!({
                "hero": {"title": "Lo siento mucho"},
                "commitments": {"progressText": "{{completed}}/{{total}}"}
            }),
            Language::En => json!({
                "hero": {"title": "I'm really sorry"},
                "commitments": {"progressText": "{{completed}}/{{total}}"}
            }),
            Language::Fr => json!({
                "hero": {"title": "Je suis vraiment désolé"},
                "commitments": {"progressText": "{{completed}}/{{total}}"}
            }),
        };
        Catalog::from_value(language, root)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt().init();

    let translator = Translator::initialize(
        Language::Es,
        Arc::new(InlineSource),
        Arc::new(MemoryPreferenceStore::new()),
    )
    .await
    .expect("no catalog available");

    println!("current: {}", translator.current_language());
    println!("title:   {}", translator.text("hero.title", &args!()));
    println!(
        "progress: {}",
        translator.text("commitments.progressText", &args!(completed = 2, total = 5))
    );

    // Missing keys degrade to the key itself.
    println!("missing: {}", translator.text("hero.nope", &args!()));

    translator.change_language(Language::Fr).await;
    println!("after switch: {}", translator.text("hero.title", &args!()));
}
