//! Centroid-angle polygon ordering.
//!
//! Points are sorted by the bearing-like angle `atan2(Δlon, Δlat)` of the
//! vector from the arithmetic-mean centroid. This yields a simple polygon
//! only for point sets that are star-shaped about their centroid;
//! [`is_simple_polygon`] reports when it does not.

use crate::parse::parse;
use crate::Coordinate;

/// Arithmetic mean of latitudes and longitudes.
fn centroid(points: &[Coordinate]) -> Option<Coordinate> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.latitude, lon + p.longitude));
    Some(Coordinate::new(lat / n, lon / n))
}

/// Returns the permutation that sorts `points` by angle about their centroid.
///
/// The sort is stable: points at equal angles (including duplicates) keep
/// their input order.
pub fn order_points(points: &[Coordinate]) -> Vec<usize> {
    let Some(center) = centroid(points) else {
        return Vec::new();
    };

    let mut keyed: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let angle = (p.longitude - center.longitude).atan2(p.latitude - center.latitude);
            (i, angle)
        })
        .collect();
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Orders canonical tokens into a polygon traversal.
///
/// Zero or one token is returned unchanged. Tokens that fail to parse are
/// dropped with a warning; every other token appears exactly once, so
/// duplicate coordinates map back to distinct input strings.
///
/// # Example
/// ```
/// use aerocoord_geo::order_polygon;
///
/// let square = ["0100N00100E", "0100S00100W", "0100N00100W", "0100S00100E"];
/// let ordered = order_polygon(&square);
/// assert_eq!(ordered, vec!["0100S00100W", "0100N00100W", "0100N00100E", "0100S00100E"]);
/// ```
pub fn order_polygon<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    if tokens.len() < 2 {
        return tokens.iter().map(|t| t.as_ref().to_string()).collect();
    }

    let (kept, points): (Vec<&str>, Vec<Coordinate>) = tokens
        .iter()
        .filter_map(|t| {
            let token = t.as_ref();
            parse(token).map(|coord| (token, coord))
        })
        .unzip();

    if kept.len() < tokens.len() {
        tracing::debug!(
            dropped = tokens.len() - kept.len(),
            "Dropped unparsable tokens before ordering"
        );
    }

    order_points(&points)
        .into_iter()
        .map(|i| kept[i].to_string())
        .collect()
}

/// Returns true if the closed traversal of `points` has no two
/// non-adjacent edges that cross or touch.
///
/// A vertex lying on a non-adjacent edge and collinear overlapping edges
/// both count as self-intersection. Overlap between adjacent edges (a
/// spike back along the previous edge) is not detected.
///
/// Fewer than four points can never self-intersect.
pub fn is_simple_polygon(points: &[Coordinate]) -> bool {
    let n = points.len();
    if n < 4 {
        return true;
    }

    let edge = |i: usize| (points[i], points[(i + 1) % n]);
    for i in 0..n {
        for j in (i + 2)..n {
            // First and last edges share a vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a, b) = edge(i);
            let (c, d) = edge(j);
            if segments_cross(a, b, c, d) {
                return false;
            }
        }
    }
    true
}

/// Signed area of the triangle `(a, b, c)` in the lat/lon plane.
fn orientation(a: Coordinate, b: Coordinate, c: Coordinate) -> f64 {
    (b.latitude - a.latitude) * (c.longitude - a.longitude)
        - (b.longitude - a.longitude) * (c.latitude - a.latitude)
}

/// Orientations within this of zero are treated as collinear.
const COLLINEAR_EPSILON: f64 = 1e-12;

/// True if `p`, already known to be collinear with `a`-`b`, lies on it.
fn on_segment(a: Coordinate, b: Coordinate, p: Coordinate) -> bool {
    p.latitude >= a.latitude.min(b.latitude)
        && p.latitude <= a.latitude.max(b.latitude)
        && p.longitude >= a.longitude.min(b.longitude)
        && p.longitude <= a.longitude.max(b.longitude)
}

fn segments_cross(a: Coordinate, b: Coordinate, c: Coordinate, d: Coordinate) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);
    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return true;
    }

    let touches = |o: f64, from: Coordinate, to: Coordinate, p: Coordinate| {
        o.abs() < COLLINEAR_EPSILON && on_segment(from, to, p)
    };
    touches(d1, c, d, a) || touches(d2, c, d, b) || touches(d3, a, b, c) || touches(d4, a, b, d)
}
