//! Magnetic component codes
//!
//! Survey files carry one magnetic component each, identified by a one-letter
//! code in the file name. Each component maps to one nullable column of the
//! `mag` table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven magnetic measurement types surveyed per elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Declination,
    Inclination,
    X,
    Y,
    Z,
    HorizontalIntensity,
    TotalIntensity,
}

impl Component {
    /// All components, in the order their files are processed.
    pub const ALL: [Component; 7] = [
        Component::Declination,
        Component::Inclination,
        Component::X,
        Component::Y,
        Component::Z,
        Component::HorizontalIntensity,
        Component::TotalIntensity,
    ];

    /// One-letter code used in survey file names.
    pub fn code(&self) -> char {
        match self {
            Component::Declination => 'd',
            Component::Inclination => 'i',
            Component::X => 'x',
            Component::Y => 'y',
            Component::Z => 'z',
            Component::HorizontalIntensity => 'h',
            Component::TotalIntensity => 'f',
        }
    }

    /// Column name in the `mag` table.
    pub fn column(&self) -> &'static str {
        match self {
            Component::Declination => "declination",
            Component::Inclination => "inclination",
            Component::X => "x",
            Component::Y => "y",
            Component::Z => "z",
            Component::HorizontalIntensity => "horizontal_intensity",
            Component::TotalIntensity => "total_intensity",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a component code is not one of `d i x y z h f`.
#[derive(Debug, thiserror::Error)]
#[error("unknown mag component `{0}`")]
pub struct UnknownComponent(pub String);

impl FromStr for Component {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d" => Ok(Component::Declination),
            "i" => Ok(Component::Inclination),
            "x" => Ok(Component::X),
            "y" => Ok(Component::Y),
            "z" => Ok(Component::Z),
            "h" => Ok(Component::HorizontalIntensity),
            "f" => Ok(Component::TotalIntensity),
            other => Err(UnknownComponent(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for component in Component::ALL {
            let parsed: Component = component.code().to_string().parse().unwrap();
            assert_eq!(parsed, component);
        }
    }

    #[test]
    fn file_order_is_d_i_x_y_z_h_f() {
        let codes: String = Component::ALL.iter().map(Component::code).collect();
        assert_eq!(codes, "dixyzhf");
    }

    #[test]
    fn columns_match_table() {
        assert_eq!(Component::Declination.column(), "declination");
        assert_eq!(Component::HorizontalIntensity.column(), "horizontal_intensity");
        assert_eq!(Component::TotalIntensity.column(), "total_intensity");
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "q".parse::<Component>().unwrap_err();
        assert_eq!(err.to_string(), "unknown mag component `q`");
    }
}
