//! Elevation range handling
//!
//! The survey covers the 100-600 km band. Both subcommands validate their
//! bounds against it before anything touches the filesystem or the database.

use anyhow::{bail, Result};
use std::ops::{Range, RangeInclusive};

/// Lowest surveyed elevation, in kilometers.
pub const ELEVATION_MIN: i32 = 100;

/// Highest surveyed elevation, in kilometers.
pub const ELEVATION_MAX: i32 = 600;

/// Validate one elevation bound. Bounds must lie in [100, 601).
fn validate_bound(name: &str, value: i32) -> Result<i32> {
    if !(ELEVATION_MIN..=ELEVATION_MAX).contains(&value) {
        bail!(
            "{name} must be between {ELEVATION_MIN} and {ELEVATION_MAX}, got {value}"
        );
    }
    Ok(value)
}

/// Inclusive elevation range for the per-component strategy.
pub fn inclusive_range(from: i32, to: i32) -> Result<RangeInclusive<i32>> {
    let from = validate_bound("--from", from)?;
    let to = validate_bound("--to", to)?;
    if from > to {
        bail!("--from ({from}) must not exceed --to ({to})");
    }
    Ok(from..=to)
}

/// Half-open elevation range for the merged strategy: the upper bound is the
/// elevation to stop before.
pub fn exclusive_range(low: i32, high: i32) -> Result<Range<i32>> {
    let low = validate_bound("LOW", low)?;
    let high = validate_bound("HIGH", high)?;
    Ok(low..high)
}
