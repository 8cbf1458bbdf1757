//! Helpers for file system validation and fallback show naming.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Capitalize the first character of a string.
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Turn a URL slug into a human-readable fallback name.
///
/// Hyphens become spaces and each word is capitalized, so
/// `historia-do-brasil` becomes `Historia Do Brasil`. Used when a show's
/// display name cannot be resolved from the page markup.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-').map(upcase).collect::<Vec<_>>().join(" ")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if absent, then probes writability by creating and
/// removing a throwaway file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the probe write
/// fails (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
