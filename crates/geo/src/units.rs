//! Distance and length unit conversion.

use crate::GeoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nautical miles per kilometer.
pub const KM_TO_NM: f64 = 0.539957;

/// Feet per meter.
pub const MT_TO_FT: f64 = 3.28084;

/// Units understood by [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    /// Kilometers
    Km,
    /// Nautical miles
    Nm,
    /// Meters
    Mt,
    /// Feet
    Ft,
}

impl FromStr for Unit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KM" => Ok(Unit::Km),
            "NM" => Ok(Unit::Nm),
            "MT" | "M" => Ok(Unit::Mt),
            "FT" => Ok(Unit::Ft),
            _ => Err(GeoError::InvalidUnit(s.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Km => "KM",
            Unit::Nm => "NM",
            Unit::Mt => "MT",
            Unit::Ft => "FT",
        })
    }
}

/// Converts `value` between units.
///
/// Returns `None` when the units measure different things at different
/// scales (e.g. kilometers to feet).
///
/// ```
/// use aerocoord_geo::{convert, Unit};
///
/// let nm = convert(100.0, Unit::Km, Unit::Nm).unwrap();
/// assert!((nm - 53.9957).abs() < 1e-9);
/// assert!(convert(1.0, Unit::Km, Unit::Ft).is_none());
/// ```
pub fn convert(value: f64, from: Unit, to: Unit) -> Option<f64> {
    match (from, to) {
        (a, b) if a == b => Some(value),
        (Unit::Km, Unit::Nm) => Some(value * KM_TO_NM),
        (Unit::Nm, Unit::Km) => Some(value / KM_TO_NM),
        (Unit::Mt, Unit::Ft) => Some(value * MT_TO_FT),
        (Unit::Ft, Unit::Mt) => Some(value / MT_TO_FT),
        _ => None,
    }
}
