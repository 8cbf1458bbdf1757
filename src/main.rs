//! # Podcasts Brasil
//!
//! A scraping pipeline that collects Brazilian-history episodes from the
//! Leitura ObrigaHistória podcast network and writes one CSV file per show.
//!
//! ## Features
//!
//! - Discovers every show linked from the site's landing page using
//!   redundant markup heuristics
//! - Walks each show's paginated episode listing, throttled by a fixed
//!   pause between page fetches
//! - Filters episode titles against a Brazilian-history keyword set
//! - Writes BOM-prefixed, fully-quoted CSV files that survive Excel's
//!   encoding guesses, with a read-back check and per-show statistics
//!
//! ## Usage
//!
//! ```sh
//! podcasts_brasil -o ./podcasts_brasil
//! ```
//!
//! ## Architecture
//!
//! The application runs four sequential stages:
//! 1. **Discovery**: find show URLs on the landing page
//! 2. **Pagination**: fetch each show's listing pages in turn
//! 3. **Extraction**: pull title/link/date per entry, keyword-filtered
//! 4. **Output**: write one dated CSV per show with summary statistics
//!
//! Everything is deliberately sequential; the source is a small site and
//! one page per second is all it should be asked to serve.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod fetch;
mod models;
mod outputs;
mod relevance;
mod scrapers;
mod utils;

use cli::Cli;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("podcasts_brasil starting up");

    let args = Cli::parse();
    debug!(?args.base_url, ?args.output_dir, delay_ms = args.page_delay_ms, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable before spending time
    // on the crawl.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Discover shows from the landing page ----
    let shows = scrapers::shows::discover_shows(&args.base_url).await;
    if shows.is_empty() {
        info!("No shows found on the landing page; nothing to do");
        return Ok(());
    }

    // ---- Walk each show's listing and write its results ----
    let delay = Duration::from_millis(args.page_delay_ms);
    for show in &shows {
        info!(show = %show.name, url = %show.url, "Scraping show");
        let episodes = scrapers::episodes::scrape_show(&show.url, delay).await;
        outputs::csv::write_show_results(&episodes, &show.slug, &args.output_dir);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        shows = shows.len(),
        "Execution complete"
    );

    Ok(())
}
