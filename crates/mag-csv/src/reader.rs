//! Component file reading
//!
//! Lines beginning with `#` and blank lines are comments. A line beginning
//! with `<` means the upstream survey tool wrote an error marker into the
//! file; the whole run aborts on it. Every other line is comma-separated with
//! fields `[_, lat, lon, value, ...]` where field 0 is unused and the value
//! is kept verbatim.

use crate::MagCsvError;
use chrono::NaiveDate;
use mag_types::Component;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One data line of a component file.
#[derive(Debug, Clone, PartialEq)]
pub struct DataLine {
    /// 1-based line number in the source file, for error context.
    pub line: u64,
    pub lat: f64,
    pub lon: f64,
    /// Field 3 of the line, verbatim.
    pub value: String,
}

/// Path of the component file for one (date, elevation, component).
///
/// Survey files are named `<date>_<elevation>_<code>.csv`, e.g.
/// `2013-02-01_100_d.csv`.
pub fn component_path(
    data_dir: &Path,
    date: NaiveDate,
    elevation: i32,
    component: Component,
) -> PathBuf {
    data_dir.join(format!("{date}_{elevation}_{}.csv", component.code()))
}

/// Read all data lines of one component file, in file order.
///
/// Comments and blank lines are filtered out here, so the returned positions
/// are suitable for aligning component files against each other.
pub fn read_component_file(path: &Path, elevation: i32) -> Result<Vec<DataLine>, MagCsvError> {
    let file = File::open(path).map_err(|source| MagCsvError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = read_data_lines(file, path, elevation)?;
    debug!("Read {} data lines from {}", lines.len(), path.display());
    Ok(lines)
}

fn read_data_lines<R: Read>(
    reader: R,
    path: &Path,
    elevation: i32,
) -> Result<Vec<DataLine>, MagCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let mut lines = Vec::new();

    for result in csv_reader.records() {
        let record = result.map_err(|source| MagCsvError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.get(0).is_some_and(|field| field.starts_with('<')) {
            return Err(MagCsvError::MalformedData {
                path: path.to_path_buf(),
                elevation,
            });
        }

        if record.len() < 4 {
            return Err(MagCsvError::ShortLine {
                path: path.to_path_buf(),
                line,
                fields: record.len(),
            });
        }

        let lat = parse_coordinate(&record[1], path, line)?;
        let lon = parse_coordinate(&record[2], path, line)?;

        lines.push(DataLine {
            line,
            lat,
            lon,
            value: record[3].to_string(),
        });
    }

    Ok(lines)
}

fn parse_coordinate(field: &str, path: &Path, line: u64) -> Result<f64, MagCsvError> {
    field
        .trim()
        .parse()
        .map_err(|source| MagCsvError::BadCoordinate {
            path: path.to_path_buf(),
            line,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read_str(data: &str) -> Result<Vec<DataLine>, MagCsvError> {
        read_data_lines(data.as_bytes(), Path::new("2013-02-01_100_d.csv"), 100)
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let lines = read_str(
            "# Declination grid\n\
             \n\
             0,65.00,-147.50,18.94\n\
             # interior comment\n\
             1,65.00,-147.00,18.91\n",
        )
        .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].lat, 65.00);
        assert_eq!(lines[0].lon, -147.50);
        assert_eq!(lines[1].value, "18.91");
    }

    #[test]
    fn value_is_kept_verbatim() {
        let lines = read_str("0,65.0,-147.5,0018.9400,extra\n").unwrap();
        assert_eq!(lines[0].value, "0018.9400");
    }

    #[test]
    fn line_numbers_count_raw_file_lines() {
        let lines = read_str("# header\n0,65.0,-147.5,1.0\n0,64.5,-147.5,2.0\n").unwrap();
        assert_eq!(lines[0].line, 2);
        assert_eq!(lines[1].line, 3);
    }

    #[test]
    fn malformed_marker_aborts_with_context() {
        let err = read_str("0,65.0,-147.5,18.94\n<p>Error 500</p>\n").unwrap_err();
        match err {
            MagCsvError::MalformedData { path, elevation } => {
                assert_eq!(elevation, 100);
                assert!(path.to_string_lossy().contains("2013-02-01_100_d.csv"));
            }
            other => panic!("expected MalformedData, got {other:?}"),
        }
    }

    #[test]
    fn short_line_is_rejected() {
        let err = read_str("0,65.0,-147.5\n").unwrap_err();
        match err {
            MagCsvError::ShortLine { line, fields, .. } => {
                assert_eq!(line, 1);
                assert_eq!(fields, 3);
            }
            other => panic!("expected ShortLine, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_coordinate_is_rejected() {
        let err = read_str("0,sixty-five,-147.5,18.94\n").unwrap_err();
        assert!(matches!(err, MagCsvError::BadCoordinate { line: 1, .. }));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = read_component_file(Path::new("/nonexistent/2013-02-01_100_d.csv"), 100)
            .unwrap_err();
        assert!(matches!(err, MagCsvError::Open { .. }));
    }

    #[test]
    fn reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# grid").unwrap();
        writeln!(file, "0,65.00,-147.50,56130.1").unwrap();
        file.flush().unwrap();

        let lines = read_component_file(file.path(), 250).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].value, "56130.1");
    }

    #[test]
    fn component_path_follows_survey_naming() {
        let date = NaiveDate::from_ymd_opt(2013, 2, 1).unwrap();
        let path = component_path(Path::new("/data"), date, 100, Component::TotalIntensity);
        assert_eq!(path, PathBuf::from("/data/2013-02-01_100_f.csv"));
    }
}
