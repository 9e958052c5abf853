//! Minimal enclosing circle.
//!
//! The circle is fitted in the latitude/longitude plane with Welzl's
//! randomized incremental algorithm, written as three nested loops so stack
//! depth stays constant. The reported radius is the largest great-circle
//! distance from the planar center to any input point, in nautical miles.
//! This is a small-area approximation: the planar center is not the
//! geodesic minimax center, but the radius always covers every point.
//!
//! Distances use a spherical Earth (haversine, mean radius). Against an
//! ellipsoidal WGS84 geodesic the radius can differ by up to about 0.5%.

use crate::haversine::haversine_distance_nm;
use crate::units::KM_TO_NM;
use crate::Coordinate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Determinants smaller than this are treated as collinear.
const COLLINEAR_EPSILON: f64 = 1e-12;

/// Slack, in degrees, when testing planar containment.
const CONTAINS_EPSILON: f64 = 1e-9;

/// Enclosing-circle settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleConfig {
    /// Fixed shuffle seed; `None` draws fresh entropy per call
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CircleConfig {
    /// Fits the circle, seeding the shuffle from `seed` when set.
    pub fn fit(&self, points: &[Coordinate]) -> EnclosingCircle {
        match self.seed {
            Some(seed) => enclosing_circle_with_rng(points, &mut StdRng::seed_from_u64(seed)),
            None => enclosing_circle(points),
        }
    }
}

/// Result of [`enclosing_circle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnclosingCircle {
    /// Planar center, in decimal degrees
    pub center: Coordinate,
    /// Great-circle radius in nautical miles
    pub radius_nm: f64,
}

impl EnclosingCircle {
    /// Radius in kilometers.
    pub fn radius_km(&self) -> f64 {
        self.radius_nm / KM_TO_NM
    }

    /// Returns true if `point` lies within the radius (with 1 mm of slack).
    pub fn contains(&self, point: &Coordinate) -> bool {
        haversine_distance_nm(&self.center, point) <= self.radius_nm + 1e-6
    }
}

/// A circle in the lat/lon plane; `radius` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlanarCircle {
    lat: f64,
    lon: f64,
    radius: f64,
}

impl PlanarCircle {
    fn at(p: Coordinate) -> Self {
        Self {
            lat: p.latitude,
            lon: p.longitude,
            radius: 0.0,
        }
    }

    fn diameter(a: Coordinate, b: Coordinate) -> Self {
        let lat = (a.latitude + b.latitude) / 2.0;
        let lon = (a.longitude + b.longitude) / 2.0;
        Self {
            lat,
            lon,
            radius: planar_distance(lat, lon, a),
        }
    }

    /// Circumcircle, or `None` for (nearly) collinear points.
    fn circumcircle(a: Coordinate, b: Coordinate, c: Coordinate) -> Option<Self> {
        let (ax, ay) = (a.latitude, a.longitude);
        let (bx, by) = (b.latitude, b.longitude);
        let (cx, cy) = (c.latitude, c.longitude);

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() < COLLINEAR_EPSILON {
            return None;
        }

        let a_sq = ax * ax + ay * ay;
        let b_sq = bx * bx + by * by;
        let c_sq = cx * cx + cy * cy;
        let lat = (a_sq * (by - cy) + b_sq * (cy - ay) + c_sq * (ay - by)) / d;
        let lon = (a_sq * (cx - bx) + b_sq * (ax - cx) + c_sq * (bx - ax)) / d;

        Some(Self {
            lat,
            lon,
            radius: planar_distance(lat, lon, a),
        })
    }

    /// Circle with all three points on or inside its boundary.
    fn through(a: Coordinate, b: Coordinate, c: Coordinate) -> Self {
        Self::circumcircle(a, b, c).unwrap_or_else(|| {
            [
                Self::diameter(a, b),
                Self::diameter(a, c),
                Self::diameter(b, c),
            ]
            .into_iter()
            .fold(Self::at(a), |best, candidate| {
                if candidate.radius > best.radius { candidate } else { best }
            })
        })
    }

    fn contains(&self, p: Coordinate) -> bool {
        planar_distance(self.lat, self.lon, p) <= self.radius + CONTAINS_EPSILON
    }
}

fn planar_distance(lat: f64, lon: f64, p: Coordinate) -> f64 {
    (p.latitude - lat).hypot(p.longitude - lon)
}

/// Removes exact duplicates, keeping first occurrences in order.
fn dedup_points(points: &[Coordinate]) -> Vec<Coordinate> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| seen.insert((p.latitude.to_bits(), p.longitude.to_bits())))
        .copied()
        .collect()
}

/// Welzl over already-shuffled points.
fn welzl(points: &[Coordinate]) -> Option<PlanarCircle> {
    let (&first, _) = points.split_first()?;
    let mut circle = PlanarCircle::at(first);

    for i in 1..points.len() {
        if circle.contains(points[i]) {
            continue;
        }
        circle = PlanarCircle::at(points[i]);
        for j in 0..i {
            if circle.contains(points[j]) {
                continue;
            }
            circle = PlanarCircle::diameter(points[i], points[j]);
            for k in 0..j {
                if !circle.contains(points[k]) {
                    circle = PlanarCircle::through(points[i], points[j], points[k]);
                }
            }
        }
    }
    Some(circle)
}

/// Fits the minimal enclosing circle using a freshly seeded random shuffle.
///
/// # Example
/// ```
/// use aerocoord_geo::{enclosing_circle, Coordinate};
///
/// let circle = enclosing_circle(&[
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(1.0, 0.0),
/// ]);
/// assert!((circle.center.latitude - 0.5).abs() < 1e-9);
/// assert!((circle.center.longitude - 0.5).abs() < 1e-9);
/// ```
pub fn enclosing_circle(points: &[Coordinate]) -> EnclosingCircle {
    enclosing_circle_with_rng(points, &mut StdRng::from_entropy())
}

/// Fits the minimal enclosing circle, shuffling with `rng`.
///
/// An empty input yields a zero circle at `(0, 0)`.
pub fn enclosing_circle_with_rng<R: Rng + ?Sized>(
    points: &[Coordinate],
    rng: &mut R,
) -> EnclosingCircle {
    let mut unique = dedup_points(points);
    unique.shuffle(rng);

    let Some(planar) = welzl(&unique) else {
        return EnclosingCircle {
            center: Coordinate::new(0.0, 0.0),
            radius_nm: 0.0,
        };
    };

    let center = Coordinate::new(planar.lat, planar.lon);
    let radius_nm = unique
        .iter()
        .map(|p| haversine_distance_nm(&center, p))
        .fold(0.0, f64::max);

    tracing::debug!(
        points = unique.len(),
        lat = center.latitude,
        lon = center.longitude,
        radius_nm,
        "Enclosing circle fitted"
    );

    EnclosingCircle { center, radius_nm }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seeded(points: &[Coordinate], seed: u64) -> EnclosingCircle {
        enclosing_circle_with_rng(points, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_empty_is_zero_circle() {
        let circle = enclosing_circle(&[]);
        assert_eq!(circle.center, Coordinate::new(0.0, 0.0));
        assert_eq!(circle.radius_nm, 0.0);
    }

    #[test]
    fn test_single_point() {
        let p = Coordinate::new(57.785, 61.748);
        let circle = enclosing_circle(&[p]);
        assert_eq!(circle.center, p);
        assert_eq!(circle.radius_nm, 0.0);
    }

    #[test]
    fn test_duplicates_collapse_to_single_point() {
        let p = Coordinate::new(10.0, 20.0);
        let circle = seeded(&[p, p, p], 7);
        assert_eq!(circle.center, p);
        assert_eq!(circle.radius_nm, 0.0);
    }

    #[test]
    fn test_right_triangle() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ];
        let circle = seeded(&points, 1);
        assert!((circle.center.latitude - 0.5).abs() < 1e-9);
        assert!((circle.center.longitude - 0.5).abs() < 1e-9);

        let farthest = points
            .iter()
            .map(|p| haversine_distance_nm(&circle.center, p))
            .fold(0.0, f64::max);
        assert!((circle.radius_nm - farthest).abs() < 1e-9);
        // Half the diagonal of a 1° square at the equator is ~42.4 NM
        assert!((circle.radius_nm - 42.4).abs() < 0.5);
    }

    #[test]
    fn test_collinear_points_use_widest_pair() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(0.0, 3.0),
        ];
        let circle = seeded(&points, 3);
        assert!(circle.center.latitude.abs() < 1e-9);
        assert!((circle.center.longitude - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_interior_points_do_not_move_circle() {
        let corners = [
            Coordinate::new(-1.0, -1.0),
            Coordinate::new(-1.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, -1.0),
        ];
        let mut points = corners.to_vec();
        points.extend([Coordinate::new(0.2, 0.1), Coordinate::new(-0.5, 0.3)]);
        let circle = seeded(&points, 11);
        assert!(circle.center.latitude.abs() < 1e-9);
        assert!(circle.center.longitude.abs() < 1e-9);
    }

    #[test]
    fn test_planar_through_collinear_fallback() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 1.0);
        let c = Coordinate::new(2.0, 2.0);
        assert!(PlanarCircle::circumcircle(a, b, c).is_none());
        let circle = PlanarCircle::through(a, b, c);
        assert!((circle.lat - 1.0).abs() < 1e-12);
        assert!((circle.lon - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_result() {
        let points: Vec<Coordinate> = (0..25)
            .map(|i| Coordinate::new(50.0 + (i as f64 * 0.37).sin(), 8.0 + (i as f64 * 0.91).cos()))
            .collect();
        assert_eq!(seeded(&points, 42), seeded(&points, 42));

        let other = seeded(&points, 4242);
        let first = seeded(&points, 42);
        assert!((other.radius_nm - first.radius_nm).abs() < 1e-6);
    }

    #[test]
    fn test_config_fit_uses_seed() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(-1.0, 1.0),
        ];
        let config = CircleConfig { seed: Some(17) };
        assert_eq!(config.fit(&points), seeded(&points, 17));
        assert!((CircleConfig::default().fit(&points).center.longitude - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_radius_is_spherical_great_circle() {
        // Half a degree of longitude on the equator, mean-radius sphere
        let circle = seeded(&[Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)], 1);
        assert!((circle.center.longitude - 0.5).abs() < 1e-9);
        assert!((circle.radius_nm - 30.0202).abs() < 0.001);
    }

    #[test]
    fn test_radius_km() {
        let circle = EnclosingCircle {
            center: Coordinate::new(0.0, 0.0),
            radius_nm: 10.0,
        };
        assert!((circle.radius_km() - 18.52).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn prop_circle_contains_every_point(
            points in prop::collection::vec((-60.0f64..60.0, -170.0f64..170.0), 1..30),
            seed in any::<u64>(),
        ) {
            let coords: Vec<Coordinate> = points.into_iter().map(Coordinate::from).collect();
            let circle = seeded(&coords, seed);
            for p in &coords {
                let d = haversine_distance_nm(&circle.center, p);
                prop_assert!(d <= circle.radius_nm + 0.01, "{} > {}", d, circle.radius_nm);
                prop_assert!(circle.contains(p));
            }
        }

        #[test]
        fn prop_planar_circle_encloses_points(
            points in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..40),
            seed in any::<u64>(),
        ) {
            let mut coords: Vec<Coordinate> = points.into_iter().map(Coordinate::from).collect();
            coords.shuffle(&mut StdRng::seed_from_u64(seed));
            let circle = welzl(&coords).unwrap();
            for p in &coords {
                prop_assert!(planar_distance(circle.lat, circle.lon, *p) <= circle.radius + 1e-6);
            }
        }
    }
}
