//! Coordinate extraction from free-form text.
//!
//! Extraction runs in three passes over a cleaned copy of the input:
//!
//! 1. **Cleaning** removes the noise NOTAM bodies put between coordinate
//!    fields (line breaks, spaces, `/`, `,`, `'`, `DEG`, `-`).
//! 2. **Valid pass** applies the fixed-width patterns of [`SHAPES`] in
//!    priority order. Each match is reassembled into a canonical token;
//!    matches that cannot be assembled or fail range checks become invalid
//!    candidates. Matched spans are masked so lower-priority patterns never
//!    re-read them.
//! 3. **Near-miss pass** scans what is left with the same shapes shortened by
//!    one digit in one field, surfacing probable typos as invalid candidates.
//!
//! Valid tokens come out in pattern-priority order, not text order; see
//! [`Extraction::sort_by_position`].

use crate::token::{CoordinateToken, TokenShape};
use crate::{GeoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;

/// Byte written over consumed spans. Matches none of the pattern classes.
const MASK: &str = "#";

/// How the captured groups of a pattern map onto a canonical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// `DD MM SS [NS] DDD MM SS [EW]`
    DigitsFirst,
    /// `[NS] DD MM SS [EW] DDD MM SS`
    LetterFirst,
    /// `DD MM [NS] DDD MM [EW]`
    NoSeconds,
}

/// One fixed-width field of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    /// A run of exactly `n` digits
    Digits(usize),
    /// Seconds: `int` digits, then `frac` digits, with or without a dot
    Seconds { int: usize, frac: usize, dot: bool },
    /// `[NS]`
    LatHemisphere,
    /// `[EW]`
    LonHemisphere,
}

impl Field {
    fn regex(self) -> String {
        match self {
            Field::Digits(n) => format!("([0-9]{{{}}})", n),
            Field::Seconds { int, frac: 0, .. } => format!("([0-9]{{{}}})", int),
            Field::Seconds { int, frac, dot: true } => {
                format!(r"([0-9]{{{}}}\.[0-9]{{{}}})", int, frac)
            }
            Field::Seconds { int, frac, dot: false } => format!("([0-9]{{{}}})", int + frac),
            Field::LatHemisphere => "([NS])".to_string(),
            Field::LonHemisphere => "([EW])".to_string(),
        }
    }

    /// Every way of dropping exactly one digit from this field.
    fn shortened(self) -> Vec<Field> {
        match self {
            Field::Digits(n) if n > 1 => vec![Field::Digits(n - 1)],
            Field::Seconds { int, frac, dot } => {
                let mut out = Vec::new();
                if int > 1 {
                    out.push(Field::Seconds { int: int - 1, frac, dot });
                }
                if frac > 1 {
                    out.push(Field::Seconds { int, frac: frac - 1, dot });
                }
                out
            }
            _ => Vec::new(),
        }
    }
}

/// A coordinate notation accepted by the extractor.
struct Shape {
    name: &'static str,
    layout: Layout,
    fields: Vec<Field>,
}

impl Shape {
    fn digits_first(name: &'static str, seconds: Field) -> Self {
        Self {
            name,
            layout: Layout::DigitsFirst,
            fields: vec![
                Field::Digits(2),
                Field::Digits(2),
                seconds,
                Field::LatHemisphere,
                Field::Digits(3),
                Field::Digits(2),
                seconds,
                Field::LonHemisphere,
            ],
        }
    }

    fn letter_first(name: &'static str, seconds: Field) -> Self {
        Self {
            name,
            layout: Layout::LetterFirst,
            fields: vec![
                Field::LatHemisphere,
                Field::Digits(2),
                Field::Digits(2),
                seconds,
                Field::LonHemisphere,
                Field::Digits(3),
                Field::Digits(2),
                seconds,
            ],
        }
    }

    fn no_seconds(name: &'static str) -> Self {
        Self {
            name,
            layout: Layout::NoSeconds,
            fields: vec![
                Field::Digits(2),
                Field::Digits(2),
                Field::LatHemisphere,
                Field::Digits(3),
                Field::Digits(2),
                Field::LonHemisphere,
            ],
        }
    }

    fn regex_source(fields: &[Field]) -> String {
        fields.iter().map(|f| f.regex()).collect()
    }

    /// Sources for every variant with one field shortened by one digit.
    fn near_miss_sources(&self) -> Vec<String> {
        let mut sources = Vec::new();
        for (index, field) in self.fields.iter().enumerate() {
            for shorter in field.shortened() {
                let mut fields = self.fields.clone();
                fields[index] = shorter;
                sources.push(Self::regex_source(&fields));
            }
        }
        sources
    }
}

/// Accepted notations, highest priority first.
static SHAPES: Lazy<Vec<Shape>> = Lazy::new(|| {
    let frac = |n| Field::Seconds { int: 2, frac: n, dot: true };
    vec![
        Shape::digits_first("seconds_1_decimal", frac(1)),  // 123456.7N1234567.8E
        Shape::digits_first("seconds_2_decimals", frac(2)), // 123456.78N1234567.89E
        Shape::digits_first("seconds_3_decimals", frac(3)),
        Shape::digits_first("seconds_4_decimals", frac(4)),
        Shape::digits_first(
            "seconds_implied_decimals",
            Field::Seconds { int: 2, frac: 2, dot: false },
        ), // 12345600N123456700E
        Shape::digits_first("integer_seconds", Field::Seconds { int: 2, frac: 0, dot: false }), // 123456N1234567E
        Shape::no_seconds("no_seconds"), // 1234N12345E
        Shape::letter_first("letter_first", Field::Seconds { int: 2, frac: 0, dot: false }), // N123456E1234567
        Shape::letter_first("letter_first_2_decimals", frac(2)), // N123456.78E1234567.89
    ]
});

struct CompiledPattern {
    name: &'static str,
    layout: Layout,
    regex: Regex,
}

static VALID_PATTERNS: Lazy<Vec<CompiledPattern>> = Lazy::new(|| {
    SHAPES
        .iter()
        .map(|shape| CompiledPattern {
            name: shape.name,
            layout: shape.layout,
            regex: Regex::new(&Shape::regex_source(&shape.fields)).unwrap(),
        })
        .collect()
});

static NEAR_MISS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let valid: HashSet<String> = SHAPES
        .iter()
        .map(|s| Shape::regex_source(&s.fields))
        .collect();
    let mut seen = HashSet::new();
    SHAPES
        .iter()
        .flat_map(|shape| shape.near_miss_sources())
        .filter(|source| !valid.contains(source) && seen.insert(source.clone()))
        .map(|source| Regex::new(&source).unwrap())
        .collect()
});

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Substrings removed from the input, in order, before matching
    #[serde(default = "default_noise")]
    pub noise: Vec<String>,

    /// Reject minutes/seconds above 59 and degrees beyond 90/180
    #[serde(default = "default_true")]
    pub validate_ranges: bool,

    /// Reorder valid tokens by their position in the text
    #[serde(default)]
    pub preserve_text_order: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            noise: default_noise(),
            validate_ranges: true,
            preserve_text_order: false,
        }
    }
}

fn default_noise() -> Vec<String> {
    ["\n", "\r", " ", "/", ",", "'", "DEG", "-"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_true() -> bool {
    true
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum InvalidReason {
    /// Looks like a coordinate with one digit missing
    NearMiss,
    /// Well-shaped but a field is out of range
    OutOfRange(String),
    /// Matched a pattern but could not be assembled into a token
    Unformattable(String),
}

/// A rejected piece of text that looked like a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidCandidate {
    /// Text as found in the cleaned input
    pub raw: String,
    /// Why it was rejected
    pub reason: InvalidReason,
}

impl std::fmt::Display for InvalidCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Result of scanning one text blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    /// Accepted tokens, in pattern-priority order
    pub valid: Vec<CoordinateToken>,
    /// Rejected candidates; disjoint from `valid`
    pub invalid: Vec<InvalidCandidate>,
    /// Non-fatal problems met while formatting matches
    pub warnings: Vec<String>,
}

impl Extraction {
    /// Canonical strings of the valid tokens.
    pub fn canonical(&self) -> Vec<String> {
        self.valid.iter().map(|t| t.canonical.clone()).collect()
    }

    /// Raw text of every invalid candidate.
    pub fn invalid_raw(&self) -> Vec<&str> {
        self.invalid.iter().map(|c| c.raw.as_str()).collect()
    }

    /// Returns true if no valid token was found.
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    /// Stable-sorts valid tokens into left-to-right text order.
    pub fn sort_by_position(&mut self) {
        self.valid.sort_by_key(|t| t.offset);
    }
}

/// Multi-format coordinate scanner.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Creates an extractor with the given settings.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Removes the configured noise substrings, in order.
    pub fn clean(&self, text: &str) -> String {
        self.config
            .noise
            .iter()
            .filter(|noise| !noise.is_empty())
            .fold(text.to_string(), |acc, noise| acc.replace(noise.as_str(), ""))
    }

    /// Scans `text` for coordinates.
    ///
    /// Never fails: unusable matches end up in [`Extraction::invalid`] and
    /// [`Extraction::warnings`].
    pub fn extract(&self, text: &str) -> Extraction {
        let mut work = self.clean(text);
        let mut extraction = Extraction::default();

        for pattern in VALID_PATTERNS.iter() {
            let matches: Vec<(Range<usize>, Vec<String>)> = pattern
                .regex
                .captures_iter(&work)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    let groups = caps
                        .iter()
                        .skip(1)
                        .flatten()
                        .map(|m| m.as_str().to_string())
                        .collect();
                    Some((whole.range(), groups))
                })
                .collect();

            if !matches.is_empty() {
                tracing::debug!(pattern = pattern.name, count = matches.len(), "Pattern matched");
            }

            for (span, groups) in matches {
                let raw = work[span.clone()].to_string();
                self.accept(&mut extraction, pattern.layout, raw, &groups, span.start);
                mask(&mut work, span);
            }
        }

        for regex in NEAR_MISS_PATTERNS.iter() {
            let spans: Vec<Range<usize>> = regex.find_iter(&work).map(|m| m.range()).collect();
            for span in spans {
                extraction.invalid.push(InvalidCandidate {
                    raw: work[span.clone()].to_string(),
                    reason: InvalidReason::NearMiss,
                });
                mask(&mut work, span);
            }
        }

        if self.config.preserve_text_order {
            extraction.sort_by_position();
        }

        tracing::debug!(
            valid = extraction.valid.len(),
            invalid = extraction.invalid.len(),
            "Extraction finished"
        );
        extraction
    }

    fn accept(
        &self,
        extraction: &mut Extraction,
        layout: Layout,
        raw: String,
        groups: &[String],
        offset: usize,
    ) {
        let (canonical, shape) = match format_match(layout, groups) {
            Ok(formatted) => formatted,
            Err(e) => {
                tracing::warn!(error = %e, "Coordinate formatting error");
                extraction.warnings.push(e.to_string());
                extraction.invalid.push(InvalidCandidate {
                    raw: groups.concat(),
                    reason: InvalidReason::Unformattable(e.to_string()),
                });
                return;
            }
        };

        let range_error = if self.config.validate_ranges {
            crate::parse::parse_parts(&canonical)
                .ok()
                .and_then(|parts| parts.range_error())
        } else {
            None
        };

        let token = CoordinateToken::new(raw, canonical, shape, offset);
        match range_error {
            None if token.valid => extraction.valid.push(token),
            None => extraction.invalid.push(InvalidCandidate {
                raw: token.raw,
                reason: InvalidReason::OutOfRange(format!(
                    "{} is outside latitude/longitude limits",
                    token.canonical
                )),
            }),
            Some(reason) => extraction.invalid.push(InvalidCandidate {
                raw: token.raw,
                reason: InvalidReason::OutOfRange(reason),
            }),
        }
    }
}

/// Scans `text` with the default settings.
///
/// # Example
/// ```
/// use aerocoord_geo::extract;
///
/// let extraction = extract("PSN 574706N0614453E AND 57470N0614453E");
/// assert_eq!(extraction.canonical(), vec!["574706N0614453E"]);
/// assert_eq!(extraction.invalid_raw(), vec!["57470N0614453E"]);
/// ```
pub fn extract(text: &str) -> Extraction {
    Extractor::default().extract(text)
}

/// Overwrites `span` so no later pattern can match across it.
fn mask(work: &mut String, span: Range<usize>) {
    let width = span.len();
    work.replace_range(span, &MASK.repeat(width));
}

/// Reassembles captured groups into a canonical token.
///
/// Seconds are truncated to their two integer digits.
fn format_match(layout: Layout, groups: &[String]) -> Result<(String, TokenShape)> {
    let unformattable = |reason: String| GeoError::Unformattable {
        raw: groups.concat(),
        reason,
    };
    let seconds = |value: &str| {
        value
            .get(..2)
            .map(str::to_string)
            .ok_or_else(|| unformattable(format!("seconds field '{}' too short", value)))
    };

    match (layout, groups) {
        (Layout::DigitsFirst, [lat_d, lat_m, lat_s, lat_h, lon_d, lon_m, lon_s, lon_h]) => Ok((
            format!(
                "{}{}{}{}{}{}{}{}",
                lat_d, lat_m, seconds(lat_s.as_str())?, lat_h, lon_d, lon_m, seconds(lon_s.as_str())?, lon_h
            ),
            TokenShape::WithSeconds,
        )),
        (Layout::LetterFirst, [lat_h, lat_d, lat_m, lat_s, lon_h, lon_d, lon_m, lon_s]) => Ok((
            format!(
                "{}{}{}{}{}{}{}{}",
                lat_d, lat_m, seconds(lat_s.as_str())?, lat_h, lon_d, lon_m, seconds(lon_s.as_str())?, lon_h
            ),
            TokenShape::WithSeconds,
        )),
        (Layout::NoSeconds, [lat_d, lat_m, lat_h, lon_d, lon_m, lon_h]) => Ok((
            format!("{}{}{}{}{}{}", lat_d, lat_m, lat_h, lon_d, lon_m, lon_h),
            TokenShape::WithoutSeconds,
        )),
        _ => Err(unformattable(format!(
            "unexpected group count {} for {:?} layout",
            groups.len(),
            layout
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_seconds() {
        let result = extract("574706N0614453E");
        assert_eq!(result.canonical(), vec!["574706N0614453E"]);
        assert!(result.invalid.is_empty());
        let token = &result.valid[0];
        assert_eq!(token.raw, "574706N0614453E");
        assert_eq!(token.shape, TokenShape::WithSeconds);
        assert!(token.valid);
    }

    #[test]
    fn test_fractional_seconds_are_truncated() {
        let result = extract("574706.9N0614453.9E 574706.123N0614453.456E 574706.1234N0614453.9999E");
        assert_eq!(
            result.canonical(),
            vec!["574706N0614453E", "574706N0614453E", "574706N0614453E"]
        );
    }

    #[test]
    fn test_priority_order_is_pattern_order() {
        // The integer-seconds token comes first in the text but its pattern
        // has lower priority than the decimal-seconds one.
        let result = extract("101010N0101010E 202020.5N0202020.5E");
        assert_eq!(result.canonical(), vec!["202020N0202020E", "101010N0101010E"]);
    }

    #[test]
    fn test_sort_by_position_restores_text_order() {
        let mut result = extract("101010N0101010E 202020.5N0202020.5E");
        result.sort_by_position();
        assert_eq!(result.canonical(), vec!["101010N0101010E", "202020N0202020E"]);

        let extractor = Extractor::new(ExtractConfig {
            preserve_text_order: true,
            ..ExtractConfig::default()
        });
        let ordered = extractor.extract("101010N0101010E 202020.5N0202020.5E");
        assert_eq!(ordered.canonical(), result.canonical());
    }

    #[test]
    fn test_implied_decimal_seconds() {
        let result = extract("12345678N123455789E");
        assert_eq!(result.canonical(), vec!["123456N1234557E"]);
    }

    #[test]
    fn test_no_seconds_shape() {
        let result = extract("1234N12345E");
        assert_eq!(result.canonical(), vec!["1234N12345E"]);
        assert_eq!(result.valid[0].shape, TokenShape::WithoutSeconds);
    }

    #[test]
    fn test_letter_first_shapes() {
        let result = extract("N574706E0614453 S335646.25W0703000.50");
        assert_eq!(result.canonical(), vec!["574706N0614453E", "335646S0703000W"]);
    }

    #[test]
    fn test_cleaning_joins_broken_coordinates() {
        let text = "574706N\n061-44-53E\r\n57 47 06N / 061 44 53 E, 57DEG47'06N 061DEG44'53E";
        let result = extract(text);
        assert_eq!(result.valid.len(), 3);
        assert!(result.canonical().iter().all(|c| c == "574706N0614453E"));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let result = extract("574706N0614453E 574706N0614453E");
        assert_eq!(result.valid.len(), 2);
        assert_ne!(result.valid[0].offset, result.valid[1].offset);
    }

    #[test]
    fn test_missing_seconds_digit_is_near_miss() {
        let result = extract("574706N0614453E 57470N0614453E");
        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.invalid.len(), 1);
        assert_eq!(result.invalid[0].raw, "57470N0614453E");
        assert_eq!(result.invalid[0].reason, InvalidReason::NearMiss);
    }

    #[test]
    fn test_short_fraction_is_near_miss() {
        let result = extract("N574706.7E0614453.89");
        assert!(result.valid.is_empty());
        assert_eq!(result.invalid_raw(), vec!["N574706.7E0614453.89"]);
    }

    #[test]
    fn test_malformed_implied_seconds_is_not_accepted() {
        // Longitude has one digit fewer than the implied-decimal shape needs.
        let result = extract("12345600N12345600E");
        assert!(result.valid.is_empty());
        assert_eq!(result.invalid_raw(), vec!["12345600N12345600E"]);
    }

    #[test]
    fn test_sixty_seconds_is_out_of_range() {
        let result = extract("123460N1234500E");
        assert!(result.valid.is_empty());
        assert_eq!(result.invalid.len(), 1);
        assert!(matches!(result.invalid[0].reason, InvalidReason::OutOfRange(_)));
    }

    #[test]
    fn test_range_validation_can_be_disabled() {
        let extractor = Extractor::new(ExtractConfig {
            validate_ranges: false,
            ..ExtractConfig::default()
        });
        let result = extractor.extract("123460N1234500E");
        assert_eq!(result.canonical(), vec!["123460N1234500E"]);
    }

    #[test]
    fn test_degrees_beyond_limits_are_invalid() {
        let extractor = Extractor::new(ExtractConfig {
            validate_ranges: false,
            ..ExtractConfig::default()
        });
        let result = extractor.extract("950000N0000000E");
        assert!(result.valid.is_empty());
        assert!(matches!(result.invalid[0].reason, InvalidReason::OutOfRange(_)));
    }

    #[test]
    fn test_valid_and_invalid_are_disjoint() {
        let result = extract("574706N0614453E 57470N0614453E 123460N1234500E 1234N12345E");
        let valid: HashSet<&str> = result.valid.iter().map(|t| t.raw.as_str()).collect();
        for candidate in &result.invalid {
            assert!(!valid.contains(candidate.raw.as_str()));
        }
    }

    #[test]
    fn test_idempotent() {
        let text = "AREA BOUNDED BY 574706N0614453E-574500N0620000E-57300N0615000E";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn test_unrelated_text_yields_nothing() {
        let result = extract("RWY 09L/27R CLSD DUE WIP. FL100-FL200. 2401011200");
        assert!(result.valid.is_empty());
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn test_lowercase_hemisphere_is_ignored() {
        assert!(extract("574706n0614453e").valid.is_empty());
    }

    #[test]
    fn test_custom_noise() {
        let extractor = Extractor::new(ExtractConfig {
            noise: vec![" ".into(), ":".into()],
            ..ExtractConfig::default()
        });
        assert_eq!(extractor.clean("57:47:06N 061:44:53E"), "574706N0614453E");
        assert_eq!(extractor.extract("57:47:06N 061:44:53E").valid.len(), 1);
    }

    #[test]
    fn test_format_match_rejects_unknown_group_count() {
        let groups: Vec<String> = vec!["12".into(), "34".into(), "N".into()];
        let err = format_match(Layout::DigitsFirst, &groups).unwrap_err();
        assert!(matches!(err, GeoError::Unformattable { .. }));
    }

    #[test]
    fn test_format_match_rejects_short_seconds() {
        let groups: Vec<String> = ["57", "47", "6", "N", "061", "44", "53", "E"]
            .into_iter()
            .map(String::from)
            .collect();
        assert!(format_match(Layout::DigitsFirst, &groups).is_err());
    }

    #[test]
    fn test_near_miss_patterns_exclude_valid_shapes() {
        let valid: HashSet<String> = SHAPES
            .iter()
            .map(|s| Shape::regex_source(&s.fields))
            .collect();
        for regex in NEAR_MISS_PATTERNS.iter() {
            assert!(!valid.contains(regex.as_str()));
        }
        assert!(!NEAR_MISS_PATTERNS.is_empty());
    }
}
