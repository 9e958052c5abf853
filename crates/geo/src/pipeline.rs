//! End-to-end analysis of one text blob.
//!
//! [`Engine`] owns its configuration and holds no mutable state, so one
//! instance can serve any number of calls, including from several threads.

use crate::circle::{enclosing_circle_with_rng, CircleConfig, EnclosingCircle};
use crate::extract::{ExtractConfig, Extraction, Extractor};
use crate::extremities::extremities;
use crate::order::{is_simple_polygon, order_polygon};
use crate::parse::parse;
use crate::token::TokenShape;
use crate::trim::trim;
use crate::Coordinate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Settings for every engine stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,
    /// Enclosing-circle settings
    #[serde(default)]
    pub circle: CircleConfig,
}

/// Everything the engine derives from one text blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Valid tokens and invalid candidates
    pub extraction: Extraction,
    /// Valid tokens in polygon traversal order
    pub ordered: Vec<String>,
    /// Ordered tokens with seconds dropped
    pub trimmed: Vec<String>,
    /// Four corner lines, or the no-coordinates message
    pub extremities: String,
    /// Enclosing circle, absent when there are no valid tokens
    pub circle: Option<EnclosingCircle>,
    /// Whether the ordered traversal is free of edge crossings
    pub simple_polygon: bool,
    /// Non-fatal problems, in the order they were found
    pub warnings: Vec<String>,
}

impl Analysis {
    /// Decimal coordinates of the ordered tokens.
    pub fn ordered_points(&self) -> Vec<Coordinate> {
        self.ordered.iter().filter_map(|t| parse(t)).collect()
    }
}

/// Coordinate processing facade.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
    extractor: Extractor,
}

impl Engine {
    /// Creates an engine.
    pub fn new(config: EngineConfig) -> Self {
        let extractor = Extractor::new(config.extract.clone());
        Self { config, extractor }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs extraction only.
    pub fn extract(&self, text: &str) -> Extraction {
        self.extractor.extract(text)
    }

    /// Runs the whole pipeline.
    ///
    /// The circle shuffle is seeded from `[circle] seed` when set, otherwise
    /// from fresh entropy.
    ///
    /// # Example
    /// ```
    /// use aerocoord_geo::{Engine, EngineConfig};
    ///
    /// let engine = Engine::new(EngineConfig::default());
    /// let analysis = engine.analyze("000000N0000000E 000000N0010000E 010000N0000000E");
    /// assert_eq!(analysis.ordered.len(), 3);
    /// assert!(analysis.circle.is_some());
    /// assert!(analysis.simple_polygon);
    /// ```
    pub fn analyze(&self, text: &str) -> Analysis {
        match self.config.circle.seed {
            Some(seed) => self.analyze_with_rng(text, &mut StdRng::seed_from_u64(seed)),
            None => self.analyze_with_rng(text, &mut StdRng::from_entropy()),
        }
    }

    /// Runs the whole pipeline with a seed derived from the configured one
    /// and `salt`, so independent documents get independent but
    /// reproducible shuffles.
    pub(crate) fn analyze_salted(&self, text: &str, salt: u64) -> Analysis {
        match self.config.circle.seed {
            Some(seed) => {
                let mixed = seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15);
                self.analyze_with_rng(text, &mut StdRng::seed_from_u64(mixed))
            }
            None => self.analyze_with_rng(text, &mut StdRng::from_entropy()),
        }
    }

    /// Runs the whole pipeline, shuffling with `rng`.
    pub fn analyze_with_rng<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Analysis {
        let extraction = self.extract(text);
        let mut warnings = extraction.warnings.clone();
        warnings.extend(
            extraction
                .invalid
                .iter()
                .map(|c| format!("Invalid coordinate candidate: {}", c.raw)),
        );

        let canonical = extraction.canonical();
        let ordered = order_polygon(&canonical);
        let ordered_points: Vec<Coordinate> = ordered.iter().filter_map(|t| parse(t)).collect();

        let simple_polygon = is_simple_polygon(&ordered_points);
        if !simple_polygon {
            warnings.push(
                "Ordered polygon self-intersects: points are not star-shaped about their centroid"
                    .to_string(),
            );
        }

        let short = extraction
            .valid
            .iter()
            .filter(|t| t.shape == TokenShape::WithoutSeconds)
            .count();
        if short > 0 {
            warnings.push(format!(
                "{} token(s) without seconds left out of extremities and trim",
                short
            ));
        }

        let points: Vec<Coordinate> = extraction.valid.iter().filter_map(|t| t.decimal).collect();
        let circle = if points.is_empty() {
            None
        } else {
            Some(enclosing_circle_with_rng(&points, rng))
        };

        tracing::debug!(
            valid = extraction.valid.len(),
            invalid = extraction.invalid.len(),
            warnings = warnings.len(),
            "Analysis complete"
        );

        Analysis {
            trimmed: trim(&ordered),
            extremities: extremities(&canonical),
            ordered,
            circle,
            simple_polygon,
            warnings,
            extraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extremities::NO_VALID_COORDINATES;

    fn seeded_engine(seed: u64) -> Engine {
        Engine::new(EngineConfig {
            circle: CircleConfig { seed: Some(seed) },
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_empty_text() {
        let analysis = Engine::default().analyze("");
        assert!(analysis.extraction.valid.is_empty());
        assert!(analysis.ordered.is_empty());
        assert!(analysis.circle.is_none());
        assert_eq!(analysis.extremities, NO_VALID_COORDINATES);
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_single_coordinate() {
        let analysis = Engine::default().analyze("PSN 574706N0614453E");
        assert_eq!(analysis.ordered, vec!["574706N0614453E"]);
        assert_eq!(analysis.trimmed, vec!["5747N06144E"]);
        let circle = analysis.circle.unwrap();
        assert_eq!(circle.radius_nm, 0.0);
        assert!((circle.center.latitude - 57.785).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_candidates_become_warnings() {
        let analysis = Engine::default().analyze("574706N0614453E 57470N0614453E");
        assert_eq!(analysis.extraction.valid.len(), 1);
        assert_eq!(analysis.extraction.invalid.len(), 1);
        assert!(analysis.warnings.iter().any(|w| w.contains("57470N0614453E")));
    }

    #[test]
    fn test_short_tokens_are_reported() {
        let analysis = Engine::default().analyze("5747N06144E 574706N0614453E");
        assert_eq!(analysis.ordered.len(), 2);
        assert_eq!(analysis.trimmed.len(), 1);
        assert!(analysis.warnings.iter().any(|w| w.contains("without seconds")));
    }

    #[test]
    fn test_seeded_analysis_is_reproducible() {
        let text = "010000N0010000E 020000N0030000E 030000N0010000E 015000N0020000E";
        let engine = seeded_engine(9);
        assert_eq!(engine.analyze(text), engine.analyze(text));
        assert_eq!(engine.analyze_salted(text, 3), engine.analyze_salted(text, 3));
    }

    #[test]
    fn test_text_order_option() {
        let engine = Engine::new(EngineConfig {
            extract: ExtractConfig {
                preserve_text_order: true,
                ..ExtractConfig::default()
            },
            ..EngineConfig::default()
        });
        let extraction = engine.extract("101010N0101010E 202020.5N0202020.5E");
        assert_eq!(extraction.canonical(), vec!["101010N0101010E", "202020N0202020E"]);
    }

    #[test]
    fn test_ordered_points_match_ordered_tokens() {
        let analysis = seeded_engine(1).analyze("000000N0000000E 000000N0010000E 010000N0000000E");
        assert_eq!(analysis.ordered_points().len(), analysis.ordered.len());
    }
}
