//! Import strategies
//!
//! Both strategies fill the same `mag` table and are idempotent against rows
//! that already carry data; they differ in I/O pattern. Per-component makes
//! one lookup per data line and backfills individual fields. Merged reads the
//! seven component files of an elevation as a unit and only ever inserts
//! complete rows.

pub mod merged;
pub mod per_component;
