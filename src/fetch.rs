//! HTTP page fetching and HTML parsing.
//!
//! One shared [`reqwest::Client`] carries the fixed `User-Agent` header for
//! every request. Fetches are synchronous from the pipeline's point of view:
//! one GET per call, no retry, no caching. Any transport or status error is
//! logged and surfaces as `None`, which callers treat as "stop processing
//! this path".

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::Html;
use tracing::{debug, error, info};

/// Identifying header sent with every request.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build the HTTP client")
});

/// Fetch a URL and parse the response body into a document tree.
///
/// The body is decoded as UTF-8 regardless of what the response headers
/// claim; the source site serves UTF-8 but is sloppy about declaring it.
/// Invalid sequences are replaced rather than failing the page.
///
/// # Returns
///
/// The parsed document, or `None` on any transport error or non-2xx status
/// (logged, never raised).
pub async fn fetch_document(url: &str) -> Option<Html> {
    info!(%url, "Fetching page");
    match fetch_body(url).await {
        Ok(body) => {
            debug!(%url, bytes = body.len(), "Fetched page body");
            Some(Html::parse_document(&body))
        }
        Err(e) => {
            error!(%url, error = %e, "Failed to fetch page");
            None
        }
    }
}

async fn fetch_body(url: &str) -> Result<String, reqwest::Error> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
