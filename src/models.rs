//! Data models for discovered shows and their episodes.
//!
//! Two plain structs flow through the pipeline:
//! - [`Show`]: a podcast program discovered on the landing page
//! - [`Episode`]: one listing entry that passed the relevance filter
//!
//! `Episode` uses serde renames so the CSV output carries the Portuguese
//! header row (`titulo,link,data`) the downstream spreadsheets expect.

use serde::{Deserialize, Serialize};

/// A podcast program discovered on the site's landing page.
///
/// Shows are deduplicated by `slug` during discovery; the first heuristic
/// pass to find a show decides its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// Stable identifier derived from the show URL's second-to-last path
    /// segment (e.g. `historia-pirata`).
    pub slug: String,
    /// Best-effort display name resolved from the surrounding markup.
    pub name: String,
    /// Absolute URL of the show's first listing page.
    pub url: String,
}

/// One episode entry extracted from a show's listing page.
///
/// Only episodes whose titles pass the Brazilian-history keyword filter are
/// materialized. The `date` field is free-form text as rendered by the site;
/// listings without a date element carry the sentinel
/// `"Data não disponível"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode title as shown in the listing.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Absolute link to the episode page.
    pub link: String,
    /// Publication date as rendered by the site, or the sentinel.
    #[serde(rename = "data")]
    pub date: String,
}
