// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and resolve them into Settings
// 2. Set up logging (stderr, so the report on stdout stays clean)
// 3. Crawl, analyze and translate every seed URL
// 4. Build the report and write it to a file or stdout
// 5. Exit with proper code (0 = success, 1 = failures logged, 2 = error)
//
// Rust concepts used:
// - async/await: fetching pages and calling DeepL are network requests
// - Arc<dyn Trait>: the page source and translator are shared by all tasks
// - Result<T, E>: errors bubble up with the ? operator
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - resolved settings
mod crawl; // src/crawl/ - running many crawl trees
mod error; // src/error.rs - crate error types
mod page; // src/page/ - pages, links, headings and the crawl itself
mod report; // src/report/ - report text and output
mod source; // src/source/ - fetching and parsing HTML
mod translate; // src/translate/ - languages and the DeepL client

#[cfg(test)]
mod testing;

use clap::Parser;
use cli::Cli;
use config::Settings;
use page::Page;
use source::HttpDocumentSource;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use translate::DeepLTranslator;

use anyhow::Result;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected error (bad seed URL, unwritable output file, ...)
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every page went through without a logged failure
//   Ok(1) = at least one top-level page logged a failure
//   Err = unexpected error
async fn run() -> Result<i32> {
    let settings = Settings::from(Cli::parse());
    init_logging(&settings);

    let source = HttpDocumentSource::new(settings.timeout)?;
    let translator = DeepLTranslator::new(
        settings.target_language,
        &settings.auth_key,
        settings.use_pro_api,
        settings.timeout,
    )?;

    info!(
        "Crawling {} url(s) with max depth {}, translating to {}",
        settings.urls.len(),
        settings.max_depth,
        settings.target_language
    );

    let pages = crawl::run_all(
        &settings.urls,
        settings.max_depth,
        Arc::new(source),
        Arc::new(translator),
    )
    .await?;

    let report = report::build_report(&pages, &settings.style);
    report::write_report(&report, &settings.output)?;

    Ok(exit_code(&pages))
}

// 0 when every top-level page went through cleanly, 1 otherwise
// Broken links alone do not count as a failure.
fn exit_code(pages: &[Page]) -> i32 {
    let failed = pages
        .iter()
        .filter(|page| !page.failure_log().is_empty())
        .count();

    if failed > 0 {
        eprintln!("{} of {} page(s) logged failures", failed, pages.len());
        1
    } else {
        0
    }
}

// RUST_LOG wins over the -v flags when it is set
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
