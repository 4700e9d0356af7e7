//! Core data types for mag-import
//!
//! This crate provides the record model shared by the CSV readers and the
//! PostgreSQL store: the seven magnetic component codes, the key that
//! identifies one measurement row, and the row itself.

mod component;
mod record;

pub use component::{Component, UnknownComponent};
pub use record::{MeasurementRecord, SurveyKey};
