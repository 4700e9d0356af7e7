//! mag-import library
//!
//! A batch importer for geomagnetic survey data. Each survey elevation has
//! seven component CSV files (declination, inclination, x, y, z, horizontal
//! intensity, total intensity); the importer merges them into one PostgreSQL
//! row per coordinate, keyed by (date, elevation, lat, lon).
//!
//! Two strategies produce the same table:
//!
//! - [`import::per_component`] reads one component file at a time and
//!   backfills missing fields on rows that already exist.
//! - [`import::merged`] reads all seven files per elevation together and
//!   inserts consolidated rows, skipping coordinates that already exist.
//!
//! # CLI Usage
//!
//! ```bash
//! # Backfill the full 100-600 km band, one component at a time
//! mag-import per-component --data-dir /data/survey --db-user mag --db-password ...
//!
//! # Single-pass import of elevations 100 and 101
//! mag-import merged 100 102 --data-dir /data/survey --db-user mag --db-password ...
//! ```

use clap::Args;
use std::path::PathBuf;

pub mod elevation;
pub mod import;

// Re-export the store options so the CLI can flatten them alongside ImportOpts.
pub use mag_store::PgOpts;

/// Options shared by both import strategies.
#[derive(Args, Clone, Debug)]
pub struct ImportOpts {
    /// Directory containing the survey CSV files
    #[arg(long, default_value = ".", env = "MAG_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Survey date the input files are named for
    #[arg(long, default_value = "2013-02-01")]
    pub date: chrono::NaiveDate,

    /// Dry run mode - look up but don't actually write data
    #[arg(long)]
    pub dry_run: bool,
}
