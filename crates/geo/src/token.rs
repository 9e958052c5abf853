//! Canonical coordinate tokens.
//!
//! A canonical token is a separator-free, fixed-width string in one of two
//! shapes:
//! - with seconds: `DDMMSS[N|S]DDDMMSS[E|W]` (15 characters)
//! - without seconds: `DDMM[N|S]DDDMM[E|W]` (11 characters)

use crate::parse::{parse_parts, parse_token};
use crate::Coordinate;
use serde::Serialize;

/// The two canonical token layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenShape {
    /// `DDMMSS[N|S]DDDMMSS[E|W]`
    WithSeconds,
    /// `DDMM[N|S]DDDMM[E|W]`
    WithoutSeconds,
}

impl TokenShape {
    /// Fixed width of the canonical string.
    pub const fn len(self) -> usize {
        match self {
            TokenShape::WithSeconds => 15,
            TokenShape::WithoutSeconds => 11,
        }
    }

    /// Width of the latitude half (including the hemisphere letter).
    pub const fn latitude_len(self) -> usize {
        match self {
            TokenShape::WithSeconds => 7,
            TokenShape::WithoutSeconds => 5,
        }
    }

    /// Returns the shape of `token`, or `None` if it is not canonical.
    pub fn detect(token: &str) -> Option<Self> {
        parse_parts(token).ok().map(|parts| parts.shape)
    }
}

/// A coordinate found in text, normalised to canonical form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateToken {
    /// Substring of the cleaned text that matched
    pub raw: String,
    /// Canonical fixed-width form
    pub canonical: String,
    /// Which canonical layout `canonical` uses
    pub shape: TokenShape,
    /// Decimal degrees, `None` if the canonical string does not parse
    pub decimal: Option<Coordinate>,
    /// Byte offset of `raw` in the cleaned text
    pub offset: usize,
    /// Whether the token may take part in geometry computations
    pub valid: bool,
}

impl CoordinateToken {
    /// Builds a token from an assembled canonical string.
    ///
    /// `valid` starts out as "parses to an in-range decimal"; the extractor
    /// may clear it further when range checks fail.
    pub(crate) fn new(raw: String, canonical: String, shape: TokenShape, offset: usize) -> Self {
        let decimal = parse_token(&canonical).ok();
        Self {
            raw,
            canonical,
            shape,
            valid: decimal.is_some(),
            decimal,
            offset,
        }
    }

    /// The canonical string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Latitude half of the canonical string, e.g. `574706N`.
    pub fn latitude_part(&self) -> &str {
        &self.canonical[..self.shape.latitude_len()]
    }

    /// Longitude half of the canonical string, e.g. `0614453E`.
    pub fn longitude_part(&self) -> &str {
        &self.canonical[self.shape.latitude_len()..]
    }
}

impl AsRef<str> for CoordinateToken {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl std::fmt::Display for CoordinateToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_lengths() {
        assert_eq!(TokenShape::WithSeconds.len(), 15);
        assert_eq!(TokenShape::WithoutSeconds.len(), 11);
    }

    #[test]
    fn test_detect_shapes() {
        assert_eq!(TokenShape::detect("574706N0614453E"), Some(TokenShape::WithSeconds));
        assert_eq!(TokenShape::detect("5747N06144E"), Some(TokenShape::WithoutSeconds));
        assert_eq!(TokenShape::detect("5747N0614E"), None);
        assert_eq!(TokenShape::detect(""), None);
    }

    #[test]
    fn test_token_parts() {
        let token = CoordinateToken::new(
            "574706N0614453E".into(),
            "574706N0614453E".into(),
            TokenShape::WithSeconds,
            0,
        );
        assert!(token.valid);
        assert_eq!(token.latitude_part(), "574706N");
        assert_eq!(token.longitude_part(), "0614453E");

        let short = CoordinateToken::new(
            "5747S06144W".into(),
            "5747S06144W".into(),
            TokenShape::WithoutSeconds,
            3,
        );
        assert_eq!(short.latitude_part(), "5747S");
        assert_eq!(short.longitude_part(), "06144W");
        assert!(short.decimal.unwrap().latitude < 0.0);
    }

    #[test]
    fn test_out_of_range_token_is_not_valid() {
        let token = CoordinateToken::new(
            "950000N0000000E".into(),
            "950000N0000000E".into(),
            TokenShape::WithSeconds,
            0,
        );
        assert!(!token.valid);
        assert!(token.decimal.is_none());
    }
}
