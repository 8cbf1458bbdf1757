//! Episode extraction and listing pagination for a single show.
//!
//! A show's episodes are spread over a chain of listing pages. Each page
//! holds `article.dgbm_post_item` entries; a `div.alignleft` block at the
//! bottom links to the next (older) page when one exists. [`scrape_show`]
//! walks that chain, filtering every title through the Brazilian-history
//! keyword set and pausing between pages to keep the request rate polite.

use crate::fetch::fetch_document;
use crate::models::Episode;
use crate::relevance::is_brazil_related;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Sentinel used when a listing entry has no publication date element.
pub const DATE_UNAVAILABLE: &str = "Data não disponível";

/// Scrape every listing page of a show, following "next page" links.
///
/// The loop stops when a page exposes no next link, or when a fetch fails;
/// in the failure case the episodes gathered from earlier pages are kept
/// and returned. A fixed pause runs between page fetches.
#[instrument(level = "info", skip_all, fields(url = %start_url))]
pub async fn scrape_show(start_url: &str, delay: Duration) -> Vec<Episode> {
    let mut episodes = Vec::new();
    let Ok(mut current_url) = Url::parse(start_url) else {
        error!(url = %start_url, "Show URL is not a valid absolute URL; skipping show");
        return episodes;
    };

    let mut page = 1u32;
    loop {
        info!(page, url = %current_url, "Processing listing page");
        let next = match fetch_document(current_url.as_str()).await {
            None => break,
            Some(document) => {
                let found = extract_episodes(&document, &current_url);
                debug!(page, count = found.len(), "Extracted matching episodes");
                episodes.extend(found);
                next_page_url(&document, &current_url)
            }
        };

        match next {
            Some(url) => current_url = url,
            None => break,
        }
        page += 1;
        sleep(delay).await;
    }

    info!(total = episodes.len(), pages = page, "Finished show listing");
    episodes
}

/// Extract all relevant episodes from one parsed listing page.
///
/// Episode links are resolved against `page_url`. Articles with unexpected
/// structure are skipped individually; they never abort the page.
pub fn extract_episodes(document: &Html, page_url: &Url) -> Vec<Episode> {
    let article_sel = Selector::parse("article.dgbm_post_item").unwrap();
    document
        .select(&article_sel)
        .filter_map(|article| extract_episode(article, page_url))
        .collect()
}

/// Extract one episode from a listing article, if it qualifies.
fn extract_episode(article: ElementRef<'_>, page_url: &Url) -> Option<Episode> {
    let heading_sel = Selector::parse("h2.dg_bm_title").unwrap();
    let anchor_sel = Selector::parse("a[href]").unwrap();
    let date_sel = Selector::parse("span.published").unwrap();

    let Some(anchor) = article
        .select(&heading_sel)
        .next()
        .and_then(|heading| heading.select(&anchor_sel).next())
    else {
        debug!("Listing article without a title link; skipping");
        return None;
    };

    let title = anchor.text().collect::<String>().trim().to_string();
    if !is_brazil_related(&title) {
        return None;
    }

    let href = anchor.value().attr("href")?;
    let link = match page_url.join(href) {
        Ok(url) => url.to_string(),
        Err(e) => {
            debug!(%href, error = %e, "Episode link does not resolve; skipping");
            return None;
        }
    };

    let date = article
        .select(&date_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| DATE_UNAVAILABLE.to_string());

    Some(Episode { title, link, date })
}

/// Find the next listing page linked from the current one.
///
/// The theme renders pagination as a `div.alignleft` holding a single
/// anchor to the older page; its absence means the chain has ended.
pub fn next_page_url(document: &Html, page_url: &Url) -> Option<Url> {
    let nav_sel = Selector::parse("div.alignleft").unwrap();
    let anchor_sel = Selector::parse("a[href]").unwrap();

    let href = document
        .select(&nav_sel)
        .next()?
        .select(&anchor_sel)
        .next()?
        .value()
        .attr("href")?;
    page_url.join(href).ok()
}
