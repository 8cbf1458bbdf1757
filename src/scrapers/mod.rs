//! Scraping passes over the podcast site.
//!
//! The site is scraped in two phases:
//!
//! 1. **Discovery** ([`shows`]): find every show linked from the landing
//!    page, using redundant heuristics over the page builder's markup.
//! 2. **Listing walk** ([`episodes`]): paginate through one show's episode
//!    listing, extracting and filtering entries page by page.
//!
//! Both phases treat structural misses the same way: log, skip the item,
//! keep going. A page that fails to fetch ends its show's walk but never
//! the run.

pub mod episodes;
pub mod shows;
