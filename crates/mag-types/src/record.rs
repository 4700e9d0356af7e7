//! Measurement rows and their identifying key

use crate::Component;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one measurement row: a coordinate within an elevation band on a
/// survey date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyKey {
    pub date: NaiveDate,
    /// Elevation band in kilometers.
    pub elevation: i32,
    pub lat: f64,
    pub lon: f64,
}

/// One consolidated measurement row of the `mag` table.
///
/// The row id is assigned once, when the row is first inserted, and preserved
/// across updates. Component values are stored verbatim as read from the
/// survey files; a populated value is never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub elevation: i32,
    pub lat: f64,
    pub lon: f64,
    pub declination: Option<String>,
    pub inclination: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
    pub horizontal_intensity: Option<String>,
    pub total_intensity: Option<String>,
}

impl MeasurementRecord {
    /// Create an empty record for a key, with a freshly generated id.
    pub fn new(key: SurveyKey) -> Self {
        MeasurementRecord {
            id: Uuid::new_v4(),
            date: key.date,
            elevation: key.elevation,
            lat: key.lat,
            lon: key.lon,
            declination: None,
            inclination: None,
            x: None,
            y: None,
            z: None,
            horizontal_intensity: None,
            total_intensity: None,
        }
    }

    pub fn key(&self) -> SurveyKey {
        SurveyKey {
            date: self.date,
            elevation: self.elevation,
            lat: self.lat,
            lon: self.lon,
        }
    }

    /// Value stored for a component, if any.
    pub fn component(&self, component: Component) -> Option<&str> {
        self.component_ref(component).as_deref()
    }

    /// Whether a component has been populated.
    ///
    /// NULL is the only absent state: `"0"` and the empty string count as
    /// present and are never overwritten.
    pub fn has_component(&self, component: Component) -> bool {
        self.component_ref(component).is_some()
    }

    /// Set a component value. Overwrites are the caller's responsibility to
    /// avoid; the import strategies check [`Self::has_component`] first.
    pub fn set_component(&mut self, component: Component, value: String) {
        *self.component_mut(component) = Some(value);
    }

    fn component_ref(&self, component: Component) -> &Option<String> {
        match component {
            Component::Declination => &self.declination,
            Component::Inclination => &self.inclination,
            Component::X => &self.x,
            Component::Y => &self.y,
            Component::Z => &self.z,
            Component::HorizontalIntensity => &self.horizontal_intensity,
            Component::TotalIntensity => &self.total_intensity,
        }
    }

    fn component_mut(&mut self, component: Component) -> &mut Option<String> {
        match component {
            Component::Declination => &mut self.declination,
            Component::Inclination => &mut self.inclination,
            Component::X => &mut self.x,
            Component::Y => &mut self.y,
            Component::Z => &mut self.z,
            Component::HorizontalIntensity => &mut self.horizontal_intensity,
            Component::TotalIntensity => &mut self.total_intensity,
        }
    }
}
