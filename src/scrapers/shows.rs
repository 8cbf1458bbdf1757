//! Show discovery from the site's landing page.
//!
//! The landing page is built with a visual page builder, so there is no
//! single reliable marker for "this is a show". Discovery therefore runs
//! three overlapping heuristic passes over the main content area:
//!
//! 1. image-link wrappers (`div.dsm-perspective-image-wrapper`)
//! 2. direct anchors whose href contains the `/programa/` path segment
//! 3. builder column blocks (`div` with an `et_pb_column*` class)
//!
//! The passes are redundant by design; they tolerate markup drift between
//! site themes. Shows are deduplicated by slug, so pass order only decides
//! which display name wins when the same show is found more than once.

use crate::fetch::fetch_document;
use crate::models::Show;
use crate::utils::title_case_slug;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Path segment identifying a show listing URL.
pub const SHOW_PATH_SEGMENT: &str = "/programa/";

/// Class pattern of the page builder's column blocks (third pass).
static COLUMN_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new("et_pb_column").unwrap());

/// Discover all shows linked from the landing page.
///
/// Fetches the landing page once and runs [`extract_shows`] over it. A fetch
/// failure or an unrecognized page layout yields an empty list; both are
/// logged, neither is an error to the caller.
#[instrument(level = "info")]
pub async fn discover_shows(base_url: &str) -> Vec<Show> {
    let Ok(base) = Url::parse(base_url) else {
        error!(%base_url, "Base URL is not a valid absolute URL");
        return Vec::new();
    };
    let Some(document) = fetch_document(base_url).await else {
        return Vec::new();
    };

    let shows = extract_shows(&document, &base);
    if shows.is_empty() {
        warn!("No shows found on the landing page; the site markup may have changed");
    } else {
        info!(count = shows.len(), "Discovered shows");
        for show in &shows {
            info!(show = %show.name, url = %show.url, "Discovered show");
        }
    }
    shows
}

/// Extract shows from a parsed landing page.
///
/// Relative hrefs are resolved against `base`. Returns shows in discovery
/// order, deduplicated by slug with the first occurrence winning.
pub fn extract_shows(document: &Html, base: &Url) -> Vec<Show> {
    let main_sel = Selector::parse("div#et-main-area").unwrap();
    let Some(main_area) = document.select(&main_sel).next() else {
        warn!("Landing page has no main content area");
        return Vec::new();
    };

    let anchor_sel = Selector::parse("a[href]").unwrap();
    let mut shows: Vec<Show> = Vec::new();

    // Pass 1: image-link wrappers.
    let wrapper_sel = Selector::parse("div.dsm-perspective-image-wrapper").unwrap();
    for wrapper in main_area.select(&wrapper_sel) {
        if let Some(anchor) = wrapper.select(&anchor_sel).find(is_show_anchor) {
            record_show(anchor, base, &mut shows);
        }
    }

    // Pass 2: direct show links anywhere in the region.
    for anchor in main_area.select(&anchor_sel).filter(is_show_anchor) {
        if !already_recorded(anchor, base, &shows) {
            record_show(anchor, base, &mut shows);
        }
    }

    // Pass 3: page-builder column blocks.
    let div_sel = Selector::parse("div").unwrap();
    for block in main_area.select(&div_sel) {
        let is_column = block
            .value()
            .attr("class")
            .is_some_and(|class| COLUMN_CLASS_RE.is_match(class));
        if !is_column {
            continue;
        }
        if let Some(anchor) = block.select(&anchor_sel).find(is_show_anchor) {
            if !already_recorded(anchor, base, &shows) {
                record_show(anchor, base, &mut shows);
            }
        }
    }

    shows
}

fn is_show_anchor(anchor: &ElementRef<'_>) -> bool {
    anchor
        .value()
        .attr("href")
        .is_some_and(|href| href.contains(SHOW_PATH_SEGMENT))
}

fn resolve_href(anchor: ElementRef<'_>, base: &Url) -> Option<Url> {
    anchor.value().attr("href").and_then(|href| base.join(href).ok())
}

fn already_recorded(anchor: ElementRef<'_>, base: &Url, shows: &[Show]) -> bool {
    resolve_href(anchor, base).is_some_and(|url| shows.iter().any(|s| s.url == url.as_str()))
}

/// Record the show behind `anchor` unless its slug was already seen.
fn record_show(anchor: ElementRef<'_>, base: &Url, shows: &mut Vec<Show>) {
    let Some(url) = resolve_href(anchor, base) else {
        return;
    };
    let Some(slug) = show_slug(url.as_str()) else {
        debug!(url = %url, "Show URL has no usable path segment; skipping");
        return;
    };
    if shows.iter().any(|show| show.slug == slug) {
        return;
    }
    let name = display_name(anchor, &slug);
    debug!(show = %name, %slug, "Found show");
    shows.push(Show {
        slug,
        name,
        url: url.to_string(),
    });
}

/// Derive a show's stable identifier from its URL.
///
/// The identifier is the second-to-last `/`-separated segment, which for the
/// site's permalink style (`…/programa/<slug>/`) is the slug.
fn show_slug(url: &str) -> Option<String> {
    let segments: Vec<&str> = url.split('/').collect();
    let index = segments.len().checked_sub(2)?;
    let slug = segments[index];
    (!slug.is_empty()).then(|| slug.to_string())
}

/// Resolve a show's display name from the markup around its anchor.
///
/// Tried in order: the anchor's own text; the text of the first
/// `div.et_pb_text_inner` following the anchor's parent; the `title`
/// attribute of an image nested in the anchor; the title-cased slug.
fn display_name(anchor: ElementRef<'_>, slug: &str) -> String {
    let own_text = anchor.text().collect::<String>();
    let own_text = own_text.trim();
    if !own_text.is_empty() {
        return own_text.to_string();
    }

    if let Some(text) = sibling_block_text(anchor) {
        return text;
    }

    let img_sel = Selector::parse("img[title]").unwrap();
    if let Some(title) = anchor
        .select(&img_sel)
        .next()
        .and_then(|img| img.value().attr("title"))
    {
        let title = title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    title_case_slug(slug)
}

/// Text of the first `div.et_pb_text_inner` sibling after the anchor's parent.
fn sibling_block_text(anchor: ElementRef<'_>) -> Option<String> {
    let parent = anchor.parent()?;
    parent
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value().name() == "div"
                && el.value().classes().any(|class| class == "et_pb_text_inner")
        })
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://leituraobrigahistoria.com").unwrap()
    }

    #[test]
    fn test_extracts_shows_from_all_passes() {
        let html = Html::parse_document(
            r#"
            <html><body>
            <div id="et-main-area">
              <div class="dsm-perspective-image-wrapper">
                <a href="/programa/historia-pirata/"><img src="hp.jpg" title="História Pirata"></a>
              </div>
              <a href="/programa/escriba-cafe/">Escriba Café</a>
              <div class="et_pb_column et_pb_column_4_4">
                <a href="/programa/alexandria/"><img src="alex.png"></a>
              </div>
            </div>
            </body></html>
            "#,
        );

        let shows = extract_shows(&html, &base());
        assert_eq!(shows.len(), 3);
        assert_eq!(shows[0].slug, "historia-pirata");
        assert_eq!(shows[0].name, "História Pirata");
        assert_eq!(
            shows[0].url,
            "https://leituraobrigahistoria.com/programa/historia-pirata/"
        );
        assert_eq!(shows[1].slug, "escriba-cafe");
        assert_eq!(shows[1].name, "Escriba Café");
        // No usable text anywhere: falls back to the title-cased slug.
        assert_eq!(shows[2].slug, "alexandria");
        assert_eq!(shows[2].name, "Alexandria");
    }

    #[test]
    fn test_duplicate_links_are_recorded_once_with_first_pass_name() {
        let html = Html::parse_document(
            r#"
            <div id="et-main-area">
              <div class="dsm-perspective-image-wrapper">
                <a href="/programa/xadrez-verbal/"><img src="x.jpg" title="Xadrez Verbal"></a>
              </div>
              <a href="https://leituraobrigahistoria.com/programa/xadrez-verbal/">Xadrez Verbal Podcast</a>
            </div>
            "#,
        );

        let shows = extract_shows(&html, &base());
        assert_eq!(shows.len(), 1);
        // The image-wrapper pass ran first, so its name wins.
        assert_eq!(shows[0].name, "Xadrez Verbal");
    }

    #[test]
    fn test_missing_main_area_yields_nothing() {
        let html = Html::parse_document(
            r#"<div id="sidebar"><a href="/programa/perdido/">Perdido</a></div>"#,
        );
        assert!(extract_shows(&html, &base()).is_empty());
    }

    #[test]
    fn test_non_show_links_are_ignored() {
        let html = Html::parse_document(
            r#"
            <div id="et-main-area">
              <a href="/sobre/">Sobre</a>
              <a href="/contato/">Contato</a>
            </div>
            "#,
        );
        assert!(extract_shows(&html, &base()).is_empty());
    }

    #[test]
    fn test_name_from_following_text_block() {
        let html = Html::parse_document(
            r#"
            <div id="et-main-area">
              <div class="dsm-perspective-image-wrapper">
                <a href="/programa/xerxes/"><img src="x.jpg"></a>
              </div>
              <div class="et_pb_text_inner">Xerxes e a Pérsia</div>
            </div>
            "#,
        );

        let shows = extract_shows(&html, &base());
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].name, "Xerxes e a Pérsia");
    }

    #[test]
    fn test_show_slug_takes_second_to_last_segment() {
        assert_eq!(
            show_slug("https://leituraobrigahistoria.com/programa/escriba-cafe/"),
            Some("escriba-cafe".to_string())
        );
        // Without a trailing slash the parent segment is selected; the site's
        // permalinks always end with a slash.
        assert_eq!(
            show_slug("https://leituraobrigahistoria.com/programa/escriba-cafe"),
            Some("programa".to_string())
        );
        assert_eq!(show_slug("escriba-cafe"), None);
    }

    #[test]
    fn test_relative_hrefs_resolve_against_base() {
        let html = Html::parse_document(
            r#"
            <div id="et-main-area">
              <a href="/programa/relativo/">Relativo</a>
            </div>
            "#,
        );

        let shows = extract_shows(&html, &base());
        assert_eq!(
            shows[0].url,
            "https://leituraobrigahistoria.com/programa/relativo/"
        );
    }
}
