//! Aeronautical coordinate processing for NOTAM and airspace text.
//!
//! This crate provides:
//! - Multi-format coordinate extraction from free-form pasted text
//! - Canonical `DDMMSS[NS]DDDMMSS[EW]` / `DDMM[NS]DDDMM[EW]` tokens and
//!   decimal conversion
//! - Centroid-angle polygon ordering and extreme-corner computation
//! - Minimal enclosing circle (Welzl) with a great-circle radius in
//!   nautical miles
//! - Small operator helpers: unit conversion and NOTAM schedule formatting
//!
//! # Example
//!
//! ```
//! use aerocoord_geo::{extract, order_polygon, parse};
//!
//! let text = "AREA 574706N0614453E - 574500N0620000E - 573000N0615000E";
//! let extraction = extract(text);
//! assert_eq!(extraction.valid.len(), 3);
//!
//! let ordered = order_polygon(&extraction.canonical());
//! assert_eq!(ordered.len(), 3);
//!
//! let coord = parse("574706N0614453E").unwrap();
//! assert!((coord.latitude - 57.7850).abs() < 0.001);
//! ```

mod error;
mod haversine;
pub mod batch;
pub mod circle;
pub mod extract;
pub mod extremities;
pub mod order;
pub mod parse;
pub mod pipeline;
pub mod schedule;
pub mod token;
pub mod trim;
pub mod units;

pub use batch::{analyze_batch, Document, DocumentResult};
pub use circle::{enclosing_circle, enclosing_circle_with_rng, CircleConfig, EnclosingCircle};
pub use error::{GeoError, GeoErrorCode, Result};
pub use extract::{extract, ExtractConfig, Extraction, Extractor, InvalidCandidate, InvalidReason};
pub use extremities::{compute_extremities, extremities, Extremities, NO_VALID_COORDINATES};
pub use haversine::{
    haversine_distance, haversine_distance_nm, EARTH_RADIUS_KM, EARTH_RADIUS_NM,
};
pub use order::{is_simple_polygon, order_points, order_polygon};
pub use parse::{dms_display, format_canonical, parse, parse_token, Axis};
pub use pipeline::{Analysis, Engine, EngineConfig};
pub use schedule::{extract_time_ranges, format_time_ranges, TimeRange};
pub use token::{CoordinateToken, TokenShape};
pub use trim::trim;
pub use units::{convert, Unit};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coord: Coordinate) -> Self {
        (coord.latitude, coord.longitude)
    }
}
