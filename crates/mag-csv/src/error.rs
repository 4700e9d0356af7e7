//! Error types for survey CSV reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a component file.
///
/// All of these are fatal to the run; the importer never recovers locally.
#[derive(Debug, Error)]
pub enum MagCsvError {
    /// Component file missing or unreadable.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A line carried the `<` malformed-data marker.
    #[error("malformed data in {} (elevation {elevation})", path.display())]
    MalformedData { path: PathBuf, elevation: i32 },

    /// A data line had fewer than the four required fields.
    #[error("short data line at {}:{line}: expected at least 4 fields, found {fields}", path.display())]
    ShortLine {
        path: PathBuf,
        line: u64,
        fields: usize,
    },

    /// A lat or lon field did not parse as a float.
    #[error("bad coordinate at {}:{line}: {source}", path.display())]
    BadCoordinate {
        path: PathBuf,
        line: u64,
        source: std::num::ParseFloatError,
    },

    /// Underlying CSV reader error.
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: csv::Error },
}
