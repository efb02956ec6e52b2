//! Runs the whole page headless: detection, rendering, switching, checklist.

use promesa_i18n::Language;
use promesa_page::{whatsapp, PageController, PageOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let prefs = std::env::temp_dir().join("promesa-demo").join("preferences.json");
    let page = PageController::start(PageOptions::new(&prefs)).await?;

    let view = page.view();
    println!("[{}] {}", view.language, view.hero.title);
    println!("  {}", view.hero.line);
    for card in &view.cards {
        println!("  card: {} — {}", card.front, card.back);
    }

    page.toggle_commitment(0)?;
    page.toggle_commitment(1)?;
    println!("progress: {}", page.view().commitments.progress_text);

    page.change_language(Language::En).await;
    let view = page.view();
    println!("[{}] {}", view.language, view.hero.line);
    println!("progress after switch: {}", view.commitments.progress_text);

    let link = whatsapp::deep_link(
        "+593 99 368 6769",
        &page.translator().text("whatsapp.defaultMessage", &promesa_i18n::args!()),
    )?;
    println!("whatsapp: {link}");

    Ok(())
}
