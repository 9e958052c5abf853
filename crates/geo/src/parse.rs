//! Canonical token parsing and formatting.
//!
//! Converts canonical tokens to signed decimal degrees
//! (`degrees + minutes/60 + seconds/3600`, negative for `S`/`W`) and back.

use crate::token::TokenShape;
use crate::{Coordinate, GeoError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static WITH_SECONDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{2})([NS])([0-9]{3})([0-9]{2})([0-9]{2})([EW])$")
        .unwrap()
});

static WITHOUT_SECONDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})([0-9]{2})([NS])([0-9]{3})([0-9]{2})([EW])$").unwrap()
});

/// Which half of a coordinate a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// North/south
    Latitude,
    /// East/west
    Longitude,
}

impl Axis {
    /// Largest legal whole-degree value on this axis.
    pub const fn max_degrees(self) -> u32 {
        match self {
            Axis::Latitude => 90,
            Axis::Longitude => 180,
        }
    }

    fn hemisphere(self, negative: bool) -> char {
        match (self, negative) {
            (Axis::Latitude, false) => 'N',
            (Axis::Latitude, true) => 'S',
            (Axis::Longitude, false) => 'E',
            (Axis::Longitude, true) => 'W',
        }
    }
}

/// One half of a canonical token split into its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    /// Whole degrees
    pub degrees: u32,
    /// Whole minutes
    pub minutes: u32,
    /// Whole seconds (0 for the short shape)
    pub seconds: u32,
    /// `N`, `S`, `E` or `W`
    pub hemisphere: char,
}

impl Dms {
    /// True for the southern and western hemispheres.
    #[inline]
    pub fn is_negative(&self) -> bool {
        matches!(self.hemisphere, 'S' | 'W')
    }

    /// Signed decimal degrees.
    pub fn decimal(&self) -> f64 {
        let value = f64::from(self.degrees)
            + f64::from(self.minutes) / 60.0
            + f64::from(self.seconds) / 3600.0;
        if self.is_negative() { -value } else { value }
    }

    /// Signed `DDDMMSS` integer used to rank extremes without float math.
    pub fn sort_key(&self) -> i64 {
        let key = i64::from(self.degrees) * 10_000
            + i64::from(self.minutes) * 100
            + i64::from(self.seconds);
        if self.is_negative() { -key } else { key }
    }

    /// Describes why the fields are out of range, if they are.
    pub fn range_error(&self, axis: Axis) -> Option<String> {
        let max = axis.max_degrees();
        if self.degrees > max {
            return Some(format!("degrees {} exceed {}", self.degrees, max));
        }
        if self.minutes > 59 {
            return Some(format!("minutes {} exceed 59", self.minutes));
        }
        if self.seconds > 59 {
            return Some(format!("seconds {} exceed 59", self.seconds));
        }
        if self.degrees == max && (self.minutes > 0 || self.seconds > 0) {
            return Some(format!("value exceeds {} degrees", max));
        }
        None
    }
}

/// A canonical token split into latitude and longitude fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmsPair {
    /// Latitude fields
    pub latitude: Dms,
    /// Longitude fields
    pub longitude: Dms,
    /// Layout the token was written in
    pub shape: TokenShape,
}

impl DmsPair {
    /// First out-of-range field found, if any.
    pub fn range_error(&self) -> Option<String> {
        self.latitude
            .range_error(Axis::Latitude)
            .map(|e| format!("latitude {}", e))
            .or_else(|| {
                self.longitude
                    .range_error(Axis::Longitude)
                    .map(|e| format!("longitude {}", e))
            })
    }

    /// Signed decimal degrees.
    pub fn to_coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude.decimal(), self.longitude.decimal())
    }
}

/// Splits a canonical token into its fields without any range checks.
pub fn parse_parts(token: &str) -> Result<DmsPair> {
    if let Some(caps) = WITH_SECONDS.captures(token) {
        return Ok(DmsPair {
            latitude: Dms {
                degrees: number(&caps, 1, token)?,
                minutes: number(&caps, 2, token)?,
                seconds: number(&caps, 3, token)?,
                hemisphere: letter(&caps, 4, token)?,
            },
            longitude: Dms {
                degrees: number(&caps, 5, token)?,
                minutes: number(&caps, 6, token)?,
                seconds: number(&caps, 7, token)?,
                hemisphere: letter(&caps, 8, token)?,
            },
            shape: TokenShape::WithSeconds,
        });
    }

    if let Some(caps) = WITHOUT_SECONDS.captures(token) {
        return Ok(DmsPair {
            latitude: Dms {
                degrees: number(&caps, 1, token)?,
                minutes: number(&caps, 2, token)?,
                seconds: 0,
                hemisphere: letter(&caps, 3, token)?,
            },
            longitude: Dms {
                degrees: number(&caps, 4, token)?,
                minutes: number(&caps, 5, token)?,
                seconds: 0,
                hemisphere: letter(&caps, 6, token)?,
            },
            shape: TokenShape::WithoutSeconds,
        });
    }

    Err(GeoError::UnrecognizedFormat(token.to_string()))
}

fn number(caps: &Captures<'_>, index: usize, token: &str) -> Result<u32> {
    caps[index]
        .parse()
        .map_err(|_| GeoError::UnrecognizedFormat(token.to_string()))
}

fn letter(caps: &Captures<'_>, index: usize, token: &str) -> Result<char> {
    caps[index]
        .chars()
        .next()
        .ok_or_else(|| GeoError::UnrecognizedFormat(token.to_string()))
}

/// Parses a canonical token into decimal degrees.
///
/// # Errors
/// * [`GeoError::UnrecognizedFormat`] if the token has neither canonical shape
/// * [`GeoError::InvalidCoordinate`] if the decimal value is out of range
pub fn parse_token(token: &str) -> Result<Coordinate> {
    let coord = parse_parts(token)?.to_coordinate();
    if !coord.is_valid() {
        return Err(GeoError::InvalidCoordinate(format!(
            "{} -> ({:.6}, {:.6})",
            token, coord.latitude, coord.longitude
        )));
    }
    Ok(coord)
}

/// Parses a canonical token, logging a warning and returning `None` on failure.
///
/// # Example
/// ```
/// use aerocoord_geo::parse;
///
/// let coord = parse("574706N0614453E").unwrap();
/// assert!((coord.latitude - 57.785).abs() < 1e-3);
/// assert!((coord.longitude - 61.748).abs() < 1e-3);
///
/// assert!(parse("not a coordinate").is_none());
/// ```
pub fn parse(token: &str) -> Option<Coordinate> {
    match parse_token(token) {
        Ok(coord) => Some(coord),
        Err(e) => {
            tracing::warn!(token, error = %e, "Skipping unparsable coordinate");
            None
        }
    }
}

/// Formats decimal degrees as a canonical token of the requested shape.
///
/// Values are rounded to the nearest second (or minute for the short
/// shape); a value that rounds to zero is written with `N`/`E`.
///
/// ```
/// use aerocoord_geo::{format_canonical, Coordinate, TokenShape};
///
/// let coord = Coordinate::new(-33.9461, 151.1772);
/// assert_eq!(format_canonical(coord, TokenShape::WithSeconds), "335646S1511038E");
/// assert_eq!(format_canonical(coord, TokenShape::WithoutSeconds), "3357S15111E");
/// ```
pub fn format_canonical(coord: Coordinate, shape: TokenShape) -> String {
    let lat = split(coord.latitude, shape);
    let lon = split(coord.longitude, shape);
    let lat_hemi = Axis::Latitude.hemisphere(lat.3);
    let lon_hemi = Axis::Longitude.hemisphere(lon.3);

    match shape {
        TokenShape::WithSeconds => format!(
            "{:02}{:02}{:02}{}{:03}{:02}{:02}{}",
            lat.0, lat.1, lat.2, lat_hemi, lon.0, lon.1, lon.2, lon_hemi
        ),
        TokenShape::WithoutSeconds => format!(
            "{:02}{:02}{}{:03}{:02}{}",
            lat.0, lat.1, lat_hemi, lon.0, lon.1, lon_hemi
        ),
    }
}

/// Rounds `value` to the shape's resolution and returns
/// `(degrees, minutes, seconds, negative)`.
fn split(value: f64, shape: TokenShape) -> (u64, u64, u64, bool) {
    match shape {
        TokenShape::WithSeconds => {
            let total = (value.abs() * 3600.0).round() as u64;
            (total / 3600, (total % 3600) / 60, total % 60, value < 0.0 && total > 0)
        }
        TokenShape::WithoutSeconds => {
            let total = (value.abs() * 60.0).round() as u64;
            (total / 60, total % 60, 0, value < 0.0 && total > 0)
        }
    }
}

/// Human-readable DMS text such as `57°47'06.0" N`, to a tenth of a second.
///
/// ```
/// use aerocoord_geo::{dms_display, Axis};
///
/// assert_eq!(dms_display(57.785, Axis::Latitude), "57°47'06.0\" N");
/// assert_eq!(dms_display(-0.5, Axis::Longitude), "000°30'00.0\" W");
/// ```
pub fn dms_display(value: f64, axis: Axis) -> String {
    let tenths = (value.abs() * 36_000.0).round() as u64;
    let degrees = tenths / 36_000;
    let minutes = (tenths % 36_000) / 600;
    let seconds = (tenths % 600) as f64 / 10.0;
    let hemisphere = axis.hemisphere(value < 0.0 && tenths > 0);

    match axis {
        Axis::Latitude => format!("{:02}°{:02}'{:04.1}\" {}", degrees, minutes, seconds, hemisphere),
        Axis::Longitude => format!("{:03}°{:02}'{:04.1}\" {}", degrees, minutes, seconds, hemisphere),
    }
}
