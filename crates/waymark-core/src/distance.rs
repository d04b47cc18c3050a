//! Distance metrics for lines and closed rings.

use crate::coords::{GeoCoord, ProjectedCoord};

/// Whole meters.
pub type Meters = u64;

/// Mean earth radius in meters, matching the map engine's sphere module.
pub const EARTH_RADIUS_M: f64 = 6371008.8;

/// Great-circle distance between two geographic points, in meters (haversine).
pub fn great_circle_distance(from: GeoCoord, to: GeoCoord) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

fn round_meters(d: f64) -> Meters {
    d.round().max(0.0) as Meters
}

/// Leg lengths along an open line: element 0 is 0, element i is the leg from i-1 to i.
pub fn line_distances(points: &[GeoCoord]) -> Vec<Meters> {
    legs(points, great_circle_distance)
}

/// Leg lengths around a closed ring, with the closing leg appended.
///
/// Rings with fewer than two points have no closing edge and yield an empty sequence.
pub fn ring_distances(points: &[GeoCoord]) -> Vec<Meters> {
    closed_legs(points, great_circle_distance)
}

/// Leg lengths around a closed ring measured directly in the projected plane.
pub fn planar_ring_distances(points: &[ProjectedCoord]) -> Vec<Meters> {
    closed_legs(points, |a, b| a.distance(b))
}

fn legs<T: Copy>(points: &[T], measure: impl Fn(T, T) -> f64) -> Vec<Meters> {
    let mut out = Vec::with_capacity(points.len());
    if !points.is_empty() {
        out.push(0);
    }
    out.extend(points.windows(2).map(|w| round_meters(measure(w[0], w[1]))));
    out
}

fn closed_legs<T: Copy>(points: &[T], measure: impl Fn(T, T) -> f64) -> Vec<Meters> {
    match (points.first(), points.last()) {
        (Some(&first), Some(&last)) if points.len() >= 2 => {
            let mut out = legs(points, &measure);
            out.push(round_meters(measure(last, first)));
            out
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn triangle() -> Vec<GeoCoord> {
        vec![
            GeoCoord::new(0.0, 0.0),
            GeoCoord::new(0.0, 1.0),
            GeoCoord::new(1.0, 1.0),
        ]
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = great_circle_distance(GeoCoord::new(0.0, 0.0), GeoCoord::new(0.0, 1.0));
        assert!((d - 111195.08).abs() < 0.01);
    }

    #[test]
    fn test_line_distances_three_points() {
        assert_eq!(line_distances(&triangle()), vec![0, 111195, 111178]);
    }

    #[test]
    fn test_line_distances_degenerate() {
        assert!(line_distances(&[]).is_empty());
        assert_eq!(line_distances(&[GeoCoord::new(5.0, 5.0)]), vec![0]);
    }

    #[test]
    fn test_line_distances_shape() {
        let points: Vec<GeoCoord> = (0..12)
            .map(|i| GeoCoord::new(i as f64 * 7.5 - 40.0, (i as f64 * 3.1).sin() * 60.0))
            .collect();
        let d = line_distances(&points);
        assert_eq!(d.len(), points.len());
        assert_eq!(d[0], 0);
    }

    #[test]
    fn test_ring_distances_closing_edge() {
        let d = ring_distances(&triangle());
        assert_eq!(d, vec![0, 111195, 111178, 157250]);
    }

    #[test]
    fn test_ring_distances_two_points() {
        let d = ring_distances(&[GeoCoord::new(0.0, 0.0), GeoCoord::new(1.0, 0.0)]);
        assert_eq!(d, vec![0, 111195, 111195]);
    }

    #[test]
    fn test_ring_distances_degenerate() {
        assert!(ring_distances(&[]).is_empty());
        assert!(ring_distances(&[GeoCoord::new(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_planar_ring_distances() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        assert_eq!(planar_ring_distances(&square), vec![0, 100, 100, 100, 100]);
        assert!(planar_ring_distances(&square[..1]).is_empty());
    }
}
