//! Output generation for scraped results.
//!
//! One submodule today: [`csv`], which writes each show's filtered episode
//! list to a dated, BOM-prefixed CSV file and reports statistics.
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── escriba-cafe_brasil_20260805.csv
//! ├── historia-pirata_brasil_20260805.csv
//! └── backup_<slug>_<date>.csv   # only after a failed primary write
//! ```

pub mod csv;
