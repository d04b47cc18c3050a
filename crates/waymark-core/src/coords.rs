//! Coordinate types and the Web Mercator projection.
//!
//! The map engine works in projected (EPSG:3857) meters; the mission model stores
//! geographic (EPSG:4326) longitude/latitude pairs.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use thiserror::Error;

/// A point in the projected planar system, in meters.
pub type ProjectedCoord = Point;

/// Spherical radius used by the Web Mercator projection.
pub const MERCATOR_RADIUS: f64 = 6378137.0;

/// Half the width of the projected world extent.
pub const MERCATOR_EXTENT: f64 = 20037508.342789244;

/// Latitude at which the projected extent becomes square.
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// Coordinate conversion errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("Invalid coordinate: ({0}, {1})")]
    InvalidCoordinate(f64, f64),
}

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lon: f64,
    pub lat: f64,
}

impl GeoCoord {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Check whether the coordinate can be projected.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.lat)
    }
}

/// Check whether a projected point lies inside the world extent.
pub fn is_valid_projected(p: ProjectedCoord) -> bool {
    p.x.is_finite()
        && p.y.is_finite()
        && p.x.abs() <= MERCATOR_EXTENT
        && p.y.abs() <= MERCATOR_EXTENT
}

/// Convert a projected point to longitude/latitude.
pub fn to_geographic(p: ProjectedCoord) -> Result<GeoCoord, TransformError> {
    if !is_valid_projected(p) {
        return Err(TransformError::InvalidCoordinate(p.x, p.y));
    }
    let lon = (p.x / MERCATOR_RADIUS).to_degrees();
    let lat = (2.0 * (p.y / MERCATOR_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
    Ok(GeoCoord::new(lon, lat))
}

/// Convert longitude/latitude to a projected point.
pub fn to_projected(g: GeoCoord) -> Result<ProjectedCoord, TransformError> {
    if !g.is_valid() {
        return Err(TransformError::InvalidCoordinate(g.lon, g.lat));
    }
    let x = MERCATOR_RADIUS * g.lon.to_radians();
    let y = MERCATOR_RADIUS * (FRAC_PI_4 + g.lat.to_radians() / 2.0).tan().ln();
    Ok(Point::new(x, y))
}

/// Convert a batch of projected points, dropping any that cannot be converted.
///
/// Each kept point is returned alongside its projected source.
pub fn convert_valid(points: &[ProjectedCoord]) -> Vec<(ProjectedCoord, GeoCoord)> {
    points
        .iter()
        .filter_map(|&p| match to_geographic(p) {
            Ok(g) => Some((p, g)),
            Err(e) => {
                log::warn!("Dropping point: {}", e);
                None
            }
        })
        .collect()
}

/// Convert a batch of projected points, dropping any that cannot be converted.
pub fn to_geographic_lossy(points: &[ProjectedCoord]) -> Vec<GeoCoord> {
    convert_valid(points).into_iter().map(|(_, g)| g).collect()
}
