use crate::services::page::render_page;
use crate::services::{load, DataSource};
use std::path::PathBuf;

pub async fn run(
    input: Option<PathBuf>,
    url: Option<String>,
    output: PathBuf,
    tokenized: bool,
    offset_mode: Option<String>,
    no_volume: bool,
) {
    let source = match (url, input) {
        (Some(url), _) => DataSource::Url(url),
        (None, Some(path)) => DataSource::File(path),
        (None, None) => {
            eprintln!("❌ Provide a CSV file or --url");
            std::process::exit(1);
        }
    };

    println!("📊 Loading {}", source);
    let options = super::load_options(offset_mode, tokenized, no_volume);
    let outcome = load(&source, &options).await;

    if !outcome.skipped.is_empty() {
        println!("⚠️  Skipped {} rows (run 'check' for details)", outcome.skipped.len());
    }

    // The page is written even for a failed load so the error is visible in the browser
    let html = match render_page(outcome.chart.as_ref(), &outcome.status) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = tokio::fs::write(&output, html).await {
        eprintln!("❌ Failed to write {}: {}", output.display(), e);
        std::process::exit(1);
    }

    if outcome.is_success() {
        println!("✅ {}", outcome.status);
        println!("📝 Wrote {}", output.display());
    } else {
        eprintln!("❌ {}", outcome.status);
        eprintln!("📝 Wrote error page to {}", output.display());
        std::process::exit(1);
    }
}
