//! Per-component import
//!
//! Reads one component file at a time. Every data line costs one lookup: a
//! coordinate whose row already carries the component is skipped, an existing
//! row missing it gets the one column set, and an unseen coordinate becomes a
//! fresh row with just that component. Re-running over the same inputs is a
//! no-op.

use crate::ImportOpts;
use anyhow::{Context, Result};
use mag_csv::{component_path, read_component_file};
use mag_store::MagStore;
use mag_types::{Component, MeasurementRecord, SurveyKey};
use std::ops::RangeInclusive;
use tracing::{debug, info};
use uuid::Uuid;

/// Run the per-component import over an inclusive elevation range.
pub async fn run(
    store: &MagStore,
    opts: &ImportOpts,
    elevations: RangeInclusive<i32>,
) -> Result<()> {
    let mut inserted = 0u64;
    let mut updated = 0u64;
    let mut skipped = 0u64;

    for elevation in elevations {
        for component in Component::ALL {
            info!("Processing elevation {elevation} with magnetic component {component}...");

            let path = component_path(&opts.data_dir, opts.date, elevation, component);
            let lines = read_component_file(&path, elevation)
                .with_context(|| format!("failed to import {}", path.display()))?;

            for line in lines {
                let key = SurveyKey {
                    date: opts.date,
                    elevation,
                    lat: line.lat,
                    lon: line.lon,
                };
                let existing = store.find(&key).await?;

                match plan(existing.as_ref(), component) {
                    Action::Skip => skipped += 1,
                    Action::Update(id) => {
                        if opts.dry_run {
                            debug!("Dry-run: would set {} on row {id}", component.column());
                        } else {
                            store.set_component(id, component, &line.value).await?;
                        }
                        updated += 1;
                    }
                    Action::Insert => {
                        let mut record = MeasurementRecord::new(key);
                        record.set_component(component, line.value);
                        if opts.dry_run {
                            debug!("Dry-run: would insert row {} for ({}, {})", record.id, key.lat, key.lon);
                        } else {
                            store.insert(&record).await?;
                        }
                        inserted += 1;
                    }
                }
            }
        }
    }

    info!("Import completed: {inserted} rows inserted, {updated} updated, {skipped} lines skipped");
    Ok(())
}

/// What one data line should do to the table.
#[derive(Debug, PartialEq)]
enum Action {
    /// Row exists and already carries this component.
    Skip,
    /// Row exists but this component is NULL; set it by row id.
    Update(Uuid),
    /// No row for this coordinate yet.
    Insert,
}

fn plan(existing: Option<&MeasurementRecord>, component: Component) -> Action {
    match existing {
        Some(record) if record.has_component(component) => Action::Skip,
        Some(record) => Action::Update(record.id),
        None => Action::Insert,
    }
}
