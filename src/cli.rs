//! Command-line interface definitions.
//!
//! Defaults reproduce the canonical run against the Leitura ObrigaHistória
//! site, so `podcasts_brasil` with no arguments behaves like the fixed
//! configuration the tool shipped with originally.

use clap::Parser;

/// Command-line arguments for the podcast collector.
///
/// # Examples
///
/// ```sh
/// # Default run against the live site
/// podcasts_brasil
///
/// # Custom output directory and a slower crawl
/// podcasts_brasil -o ./resultados --page-delay-ms 2500
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the podcast network's landing page
    #[arg(short, long, default_value = "https://leituraobrigahistoria.com")]
    pub base_url: String,

    /// Output directory for the per-show CSV files
    #[arg(short, long, default_value = "podcasts_brasil")]
    pub output_dir: String,

    /// Pause between listing-page fetches, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub page_delay_ms: u64,
}
