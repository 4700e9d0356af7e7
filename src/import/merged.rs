//! Merged import
//!
//! Reads all seven component files of an elevation as a unit. The files are
//! aligned by data-line position after comments and blank lines are filtered
//! per file, and the whole elevation is validated before the first write:
//! every aligned position must agree on lat/lon, and all seven files must
//! yield the same number of data lines. One existence lookup per coordinate
//! then decides between skipping the coordinate and inserting a complete row.
//! Unlike the per-component strategy, this one never backfills fields on
//! existing rows.

use crate::ImportOpts;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use mag_csv::{component_path, read_component_file, DataLine};
use mag_store::MagStore;
use mag_types::{Component, MeasurementRecord, SurveyKey};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Run the merged import over a half-open elevation range.
pub async fn run(store: &MagStore, opts: &ImportOpts, elevations: Range<i32>) -> Result<()> {
    let mut inserted = 0u64;
    let mut skipped = 0u64;

    for elevation in elevations {
        info!("Processing elevation {elevation}...");

        let rows = read_elevation(&opts.data_dir, opts.date, elevation)?;

        for row in rows {
            let key = SurveyKey {
                date: opts.date,
                elevation,
                lat: row.lat,
                lon: row.lon,
            };

            // This strategy does not backfill: an existing row is left as-is
            // even if some of its component fields are NULL.
            if store.find(&key).await?.is_some() {
                skipped += 1;
                continue;
            }

            let record = row.into_record(opts.date, elevation);
            if opts.dry_run {
                debug!("Dry-run: would insert row {} for ({}, {})", record.id, key.lat, key.lon);
            } else {
                store.insert(&record).await?;
            }
            inserted += 1;
        }
    }

    info!("Import completed: {inserted} rows inserted, {skipped} coordinates skipped");
    Ok(())
}

/// One coordinate with all seven component values, in [`Component::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
struct MergedLine {
    lat: f64,
    lon: f64,
    values: Vec<String>,
}

impl MergedLine {
    fn into_record(self, date: NaiveDate, elevation: i32) -> MeasurementRecord {
        let mut record = MeasurementRecord::new(SurveyKey {
            date,
            elevation,
            lat: self.lat,
            lon: self.lon,
        });
        for (component, value) in Component::ALL.into_iter().zip(self.values) {
            record.set_component(component, value);
        }
        record
    }
}

/// Read and validate the seven component files for one elevation.
fn read_elevation(data_dir: &Path, date: NaiveDate, elevation: i32) -> Result<Vec<MergedLine>> {
    let mut per_component = Vec::with_capacity(Component::ALL.len());

    for component in Component::ALL {
        let path = component_path(data_dir, date, elevation, component);
        let lines = read_component_file(&path, elevation)
            .with_context(|| format!("failed to import {}", path.display()))?;
        per_component.push(lines);
    }

    merge(&per_component, elevation)
}

/// Align the per-component data lines positionally and check that every
/// position agrees on its coordinate.
fn merge(per_component: &[Vec<DataLine>], elevation: i32) -> Result<Vec<MergedLine>> {
    let expected = per_component[0].len();

    for (component, lines) in Component::ALL.into_iter().zip(per_component) {
        if lines.len() != expected {
            bail!(
                "component files for elevation {elevation} disagree on data line count: \
                 {} has {expected}, {component} has {}",
                Component::ALL[0],
                lines.len()
            );
        }
    }

    let mut rows = Vec::with_capacity(expected);

    for index in 0..expected {
        let first = &per_component[0][index];

        for (component, lines) in Component::ALL.into_iter().zip(per_component).skip(1) {
            let other = &lines[index];
            if other.lat != first.lat || other.lon != first.lon {
                bail!(
                    "lat/lon not the same for all mag components in elevation {elevation}: \
                     {} has ({}, {}) at line {} but {component} has ({}, {}) at line {}",
                    Component::ALL[0],
                    first.lat,
                    first.lon,
                    first.line,
                    other.lat,
                    other.lon,
                    other.line
                );
            }
        }

        rows.push(MergedLine {
            lat: first.lat,
            lon: first.lon,
            values: per_component
                .iter()
                .map(|lines| lines[index].value.clone())
                .collect(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn line(lat: f64, lon: f64, value: &str) -> DataLine {
        DataLine {
            line: 1,
            lat,
            lon,
            value: value.to_string(),
        }
    }

    fn seven(values: [&str; 7]) -> Vec<Vec<DataLine>> {
        values
            .iter()
            .map(|value| vec![line(65.0, -147.5, value)])
            .collect()
    }

    #[test]
    fn agreeing_files_merge_into_one_row_per_coordinate() {
        let per_component = seven(["1", "2", "3", "4", "5", "6", "7"]);
        let rows = merge(&per_component, 100).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values, vec!["1", "2", "3", "4", "5", "6", "7"]);

        let record = rows[0]
            .clone()
            .into_record(NaiveDate::from_ymd_opt(2013, 2, 1).unwrap(), 100);
        for component in Component::ALL {
            assert!(record.has_component(component));
        }
        assert_eq!(record.component(Component::TotalIntensity), Some("7"));
    }

    #[test]
    fn coordinate_mismatch_is_fatal_and_names_the_elevation() {
        let mut per_component = seven(["1", "2", "3", "4", "5", "6", "7"]);
        per_component[3][0].lat = 10.5; // y disagrees
        let err = merge(&per_component, 250).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("elevation 250"), "{message}");
        assert!(message.contains("lat/lon"), "{message}");
    }

    #[test]
    fn data_line_count_mismatch_is_fatal() {
        let mut per_component = seven(["1", "2", "3", "4", "5", "6", "7"]);
        per_component[6].push(line(64.5, -147.5, "8"));
        let err = merge(&per_component, 100).unwrap_err();
        assert!(err.to_string().contains("data line count"));
    }

    fn write_component(dir: &Path, code: char, body: &str) {
        fs::write(dir.join(format!("2013-02-01_100_{code}.csv")), body).unwrap();
    }

    #[test]
    fn differing_comment_counts_do_not_desynchronize_alignment() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2013, 2, 1).unwrap();

        // The d file carries two comment lines, the others none; alignment is
        // by data line, so the zip still pairs the right coordinates.
        write_component(dir.path(), 'd', "# grid\n# declination\n0,65.0,-147.5,1.1\n0,64.5,-147.5,1.2\n");
        for code in ['i', 'x', 'y', 'z', 'h'] {
            write_component(
                dir.path(),
                code,
                "0,65.0,-147.5,9.9\n0,64.5,-147.5,9.8\n",
            );
        }
        write_component(dir.path(), 'f', "0,65.0,-147.5,9.9\n\n0,64.5,-147.5,9.8\n");

        let rows = read_elevation(dir.path(), date, 100).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].values[0], "1.1");
        assert_eq!(rows[1].values[0], "1.2");
        assert_eq!(rows[1].lat, 64.5);
    }

    #[test]
    fn sentinel_in_any_file_aborts_the_elevation() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2013, 2, 1).unwrap();

        for code in ['d', 'i', 'x', 'y', 'z', 'h'] {
            write_component(dir.path(), code, "0,65.0,-147.5,9.9\n");
        }
        write_component(dir.path(), 'f', "<html>Gateway timeout\n");

        let err = read_elevation(dir.path(), date, 100).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("2013-02-01_100_f.csv"), "{message}");
        assert!(message.contains("elevation 100"), "{message}");
    }

    #[test]
    fn missing_component_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2013, 2, 1).unwrap();

        for code in ['d', 'i', 'x'] {
            write_component(dir.path(), code, "0,65.0,-147.5,9.9\n");
        }

        let err = read_elevation(dir.path(), date, 100).unwrap_err();
        assert!(format!("{err:#}").contains("2013-02-01_100_y.csv"));
    }
}
