//! Whole-page lifecycle: detection, first render, switching, checklist
//! progress, and cross-tab convergence over a real preference file.

use std::sync::Arc;
use std::time::Duration;

use promesa_i18n::{FixedLocale, Language, PreferenceStore, SwitchOutcome, PREFERENCE_KEY};
use promesa_page::{PageController, PageOptions};
use promesa_store::FilePreferenceStore;
use promesa_test_utils::{assert_ok, empty_prefs, seeded_prefs};

async fn started(options: PageOptions) -> PageController {
    PageController::start(options).await.expect("page failed to start")
}

fn quiet_options(path: &std::path::Path) -> PageOptions {
    // A fixed empty locale keeps detection independent of the test machine.
    PageOptions::new(path).with_locale_source(Arc::new(FixedLocale(None)))
}

#[tokio::test]
async fn test_starts_in_saved_language() {
    let (_dir, path) = seeded_prefs("en");
    let page = started(quiet_options(&path)).await;

    let view = page.view();
    assert_eq!(view.language, Language::En);
    assert_eq!(view.hero.line, "Could you give me another chance?");
    assert_eq!(view.commitments.items.len(), 5);
}

#[tokio::test]
async fn test_starts_from_locale_when_nothing_saved() {
    let (_dir, path) = empty_prefs();
    let options = PageOptions::new(&path)
        .with_locale_source(Arc::new(FixedLocale(Some("fr-CA".into()))));
    let page = started(options).await;

    assert_eq!(page.view().language, Language::Fr);
}

#[tokio::test]
async fn test_starts_in_default_without_signals() {
    let (_dir, path) = empty_prefs();
    let page = started(quiet_options(&path)).await;

    let view = page.view();
    assert_eq!(view.language, Language::Es);
    assert_eq!(view.hero.line, "¿Podrías darme otra oportunidad?");
}

#[tokio::test]
async fn test_switching_rerenders_and_persists() {
    let (_dir, path) = empty_prefs();
    let page = started(quiet_options(&path)).await;

    let outcome = page.change_language(Language::Fr).await;
    assert_eq!(outcome, SwitchOutcome::Applied(Language::Fr));

    // Listener delivery is synchronous, so the snapshot is already new.
    let view = page.view();
    assert_eq!(view.language, Language::Fr);
    assert_eq!(view.hero.line, "Pourrais-tu me donner une autre chance ?");

    let record = FilePreferenceStore::open(&path);
    assert_eq!(record.get(PREFERENCE_KEY).unwrap(), Some("fr".to_string()));
}

#[tokio::test]
async fn test_commitment_toggles_show_in_progress() {
    let (_dir, path) = empty_prefs();
    let page = started(quiet_options(&path)).await;

    assert!(assert_ok!(page.toggle_commitment(0)));
    assert!(assert_ok!(page.toggle_commitment(2)));

    let view = page.view();
    assert_eq!(view.commitments.progress_text, "2/5");
    assert!(view.commitments.items[0].done);
    assert!(view.commitments.items[2].done);

    // Progress text follows the language, state follows the store.
    page.change_language(Language::En).await;
    let view = page.view();
    assert_eq!(view.commitments.progress_text, "2/5");
    assert_eq!(view.commitments.title, "My commitments");
    assert!(view.commitments.items[0].done);
}

#[tokio::test]
async fn test_switcher_selection_flows_through() {
    let (_dir, path) = empty_prefs();
    let page = started(quiet_options(&path)).await;

    let mut switcher = page.switcher();
    assert_eq!(switcher.label(), "Español");
    switcher.open();

    let outcome = switcher.select(page.translator(), "en").await;
    assert_eq!(outcome, SwitchOutcome::Applied(Language::En));
    assert_eq!(page.view().language, Language::En);
    assert_eq!(switcher.label(), "English");
}

#[tokio::test]
async fn test_external_write_converges_the_page() {
    let (_dir, path) = seeded_prefs("es");
    let page = started(quiet_options(&path)).await;
    assert_eq!(page.view().language, Language::Es);

    // Give the file watcher a moment to arm before the external write.
    tokio::time::sleep(Duration::from_millis(150)).await;

    // Another tab picks English.
    let other_tab = FilePreferenceStore::open(&path);
    other_tab.set(PREFERENCE_KEY, "en").unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        while page.view().language != Language::En {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("page never converged on the external choice");

    assert_eq!(
        page.view().hero.line,
        "Could you give me another chance?"
    );
}
