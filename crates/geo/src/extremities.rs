//! Extreme corner coordinates of a token set.

use crate::parse::parse_parts;
use crate::token::TokenShape;
use serde::Serialize;
use std::fmt;

/// Text returned by [`extremities`] when there is nothing to report.
pub const NO_VALID_COORDINATES: &str = "No valid coordinates provided.";

/// The four corners of the lat/lon bounding box, as canonical tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extremities {
    /// Northernmost latitude + westernmost longitude
    pub north_west: String,
    /// Northernmost latitude + easternmost longitude
    pub north_east: String,
    /// Southernmost latitude + easternmost longitude
    pub south_east: String,
    /// Southernmost latitude + westernmost longitude
    pub south_west: String,
}

impl fmt::Display for Extremities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}\n{}",
            self.north_west, self.north_east, self.south_east, self.south_west
        )
    }
}

/// Running extreme for one axis; the first token seen wins ties.
struct Extreme<'a> {
    max: (i64, &'a str),
    min: (i64, &'a str),
}

impl<'a> Extreme<'a> {
    fn new(key: i64, part: &'a str) -> Self {
        Self {
            max: (key, part),
            min: (key, part),
        }
    }

    fn update(&mut self, key: i64, part: &'a str) {
        if key > self.max.0 {
            self.max = (key, part);
        }
        if key < self.min.0 {
            self.min = (key, part);
        }
    }
}

/// Computes the corner tokens of the set.
///
/// Only 15-character tokens take part; others are skipped with a warning.
/// Keys are compared as signed `DDDMMSS` integers, so no floating point is
/// involved. Returns `None` if no usable token remains.
pub fn compute_extremities<S: AsRef<str>>(tokens: &[S]) -> Option<Extremities> {
    let split = TokenShape::WithSeconds.latitude_len();
    let mut lat: Option<Extreme<'_>> = None;
    let mut lon: Option<Extreme<'_>> = None;

    for token in tokens {
        let token = token.as_ref();
        let parts = match parse_parts(token) {
            Ok(parts) if parts.shape == TokenShape::WithSeconds => parts,
            _ => {
                tracing::warn!(token, "Skipping token without seconds for extremities");
                continue;
            }
        };
        let (lat_part, lon_part) = token.split_at(split);
        let (lat_key, lon_key) = (parts.latitude.sort_key(), parts.longitude.sort_key());

        match lat.as_mut() {
            Some(extreme) => extreme.update(lat_key, lat_part),
            None => lat = Some(Extreme::new(lat_key, lat_part)),
        }
        match lon.as_mut() {
            Some(extreme) => extreme.update(lon_key, lon_part),
            None => lon = Some(Extreme::new(lon_key, lon_part)),
        }
    }

    let (lat, lon) = (lat?, lon?);
    Some(Extremities {
        north_west: format!("{}{}", lat.max.1, lon.min.1),
        north_east: format!("{}{}", lat.max.1, lon.max.1),
        south_east: format!("{}{}", lat.min.1, lon.max.1),
        south_west: format!("{}{}", lat.min.1, lon.min.1),
    })
}

/// Corner tokens as four lines (NW, NE, SE, SW), or
/// [`NO_VALID_COORDINATES`].
///
/// # Example
/// ```
/// use aerocoord_geo::{extremities, NO_VALID_COORDINATES};
///
/// let corners = extremities(&["100000N0200000E", "050000S0100000W"]);
/// assert_eq!(
///     corners,
///     "100000N0100000W\n100000N0200000E\n050000S0200000E\n050000S0100000W"
/// );
/// assert_eq!(extremities::<&str>(&[]), NO_VALID_COORDINATES);
/// ```
pub fn extremities<S: AsRef<str>>(tokens: &[S]) -> String {
    compute_extremities(tokens)
        .map(|e| e.to_string())
        .unwrap_or_else(|| NO_VALID_COORDINATES.to_string())
}
