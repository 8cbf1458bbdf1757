//! CSV output for a show's filtered episode list.
//!
//! One file per show per run, named `<slug>_brasil_<YYYYMMDD>.csv`. Files
//! are UTF-8 with a byte-order mark and every field quoted, which keeps the
//! accented Portuguese titles intact when the files are opened in Excel.
//! After writing, the file is read back once and the first title logged as
//! an encoding check. A failed write falls back to a single plainly-quoted
//! backup file.

use crate::models::Episode;
use chrono::Local;
use csv::{QuoteStyle, WriterBuilder};
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use tracing::{error, info, instrument, warn};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Write a show's episodes to its dated CSV file and log statistics.
///
/// An empty episode list is a no-op: nothing is created on disk. A same-day
/// re-run overwrites the previous file for the show. On a write failure one
/// fallback write is attempted to `backup_<slug>_<date>.csv`, serialized
/// from the same in-memory episode list but without the quoting and
/// verification steps; the fallback itself is not retried.
#[instrument(level = "info", skip_all, fields(show = %slug, count = episodes.len()))]
pub fn write_show_results(episodes: &[Episode], slug: &str, output_dir: &str) {
    if episodes.is_empty() {
        info!(show = slug, "No Brazilian-history episodes found; no file written");
        return;
    }

    let date_tag = Local::now().format("%Y%m%d").to_string();
    let path = format!("{output_dir}/{slug}_brasil_{date_tag}.csv");

    match write_quoted_csv(episodes, output_dir, &path) {
        Ok(()) => {
            info!(%path, "Wrote show results");
            verify_encoding(&path);
            log_statistics(episodes, slug);
        }
        Err(e) => {
            error!(%path, error = %e, "Failed to write results; attempting backup file");
            let backup_path = format!("{output_dir}/backup_{slug}_{date_tag}.csv");
            match write_backup_csv(episodes, &backup_path) {
                Ok(()) => warn!(path = %backup_path, "Wrote backup file"),
                Err(e) => error!(path = %backup_path, error = %e, "Backup write failed"),
            }
        }
    }
}

/// Primary write: BOM-prefixed, all fields quoted.
fn write_quoted_csv(
    episodes: &[Episode],
    output_dir: &str,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(output_dir)?;

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(file);
    for episode in episodes {
        writer.serialize(episode)?;
    }
    writer.flush()?;
    Ok(())
}

/// Fallback write with the csv crate's default quoting and no BOM.
fn write_backup_csv(episodes: &[Episode], path: &str) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for episode in episodes {
        writer.serialize(episode)?;
    }
    writer.flush()?;
    Ok(())
}

/// Re-read the written file and log its first title.
///
/// Catches the mojibake class of failures where the write succeeds but the
/// text comes back mangled. The reader strips the BOM transparently.
fn verify_encoding(path: &str) {
    match first_title(path) {
        Ok(Some(title)) => info!(%path, first_title = %title, "Encoding check"),
        Ok(None) => warn!(%path, "Encoding check found an empty file"),
        Err(e) => warn!(%path, error = %e, "Could not re-read file for encoding check"),
    }
}

fn first_title(path: &str) -> Result<Option<String>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    match reader.deserialize::<Episode>().next() {
        Some(record) => Ok(Some(record?.title)),
        None => Ok(None),
    }
}

fn log_statistics(episodes: &[Episode], slug: &str) {
    info!(show = slug, total = episodes.len(), "Show statistics");
    for episode in episodes.iter().take(5) {
        info!(title = %episode.title, date = %episode.date, "Episode");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_episodes() -> Vec<Episode> {
        vec![
            Episode {
                title: "Dom Pedro II e o Império".to_string(),
                link: "https://leituraobrigahistoria.com/ep/dom-pedro-ii/".to_string(),
                date: "2 de dezembro de 2021".to_string(),
            },
            Episode {
                title: "A Abolição, \"13 de maio\"".to_string(),
                link: "https://leituraobrigahistoria.com/ep/abolicao/".to_string(),
                date: "Data não disponível".to_string(),
            },
        ]
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn todays_file(dir: &PathBuf, slug: &str) -> PathBuf {
        let date_tag = Local::now().format("%Y%m%d").to_string();
        dir.join(format!("{slug}_brasil_{date_tag}.csv"))
    }

    #[test]
    fn test_empty_list_writes_nothing() {
        let dir = test_dir("podcasts_brasil_csv_empty");
        write_show_results(&[], "vazio", dir.to_str().unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn test_written_file_has_bom_and_quoted_header() {
        let dir = test_dir("podcasts_brasil_csv_bom");
        write_show_results(&sample_episodes(), "escriba-cafe", dir.to_str().unwrap());

        let path = todays_file(&dir, "escriba-cafe");
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);

        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("\"titulo\",\"link\",\"data\""));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_roundtrip_preserves_non_ascii_and_quotes() {
        let dir = test_dir("podcasts_brasil_csv_roundtrip");
        let episodes = sample_episodes();
        write_show_results(&episodes, "escriba-cafe", dir.to_str().unwrap());

        let path = todays_file(&dir, "escriba-cafe");
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let back: Vec<Episode> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back, episodes);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_first_title_reads_through_bom() {
        let dir = test_dir("podcasts_brasil_csv_first");
        write_show_results(&sample_episodes(), "escriba-cafe", dir.to_str().unwrap());

        let path = todays_file(&dir, "escriba-cafe");
        let title = first_title(path.to_str().unwrap()).unwrap();
        assert_eq!(title.as_deref(), Some("Dom Pedro II e o Império"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_same_day_rerun_overwrites() {
        let dir = test_dir("podcasts_brasil_csv_overwrite");
        let episodes = sample_episodes();
        write_show_results(&episodes, "escriba-cafe", dir.to_str().unwrap());
        write_show_results(&episodes[..1].to_vec(), "escriba-cafe", dir.to_str().unwrap());

        let path = todays_file(&dir, "escriba-cafe");
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let back: Vec<Episode> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
