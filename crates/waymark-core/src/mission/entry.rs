//! Entry types stored in a mission sequence.

use crate::coords::GeoCoord;
use crate::distance::{self, Meters};
use serde::{Deserialize, Serialize};

/// Where a polygon goes relative to its anchor waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    Before,
    After,
}

/// A closed shape. The closing edge back to the first point is implied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonRing {
    points: Vec<GeoCoord>,
}

impl PolygonRing {
    /// Create a ring from its vertices.
    ///
    /// Draw tools usually repeat the first vertex at the end; that duplicate is dropped.
    pub fn from_points(mut points: Vec<GeoCoord>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    pub fn points(&self) -> &[GeoCoord] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Leg lengths around the ring including the closing leg.
    pub fn distances(&self) -> Vec<Meters> {
        distance::ring_distances(&self.points)
    }
}

/// A sequence slot standing in for a whole polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonReference {
    /// Position of this reference in the owning sequence.
    pub(crate) index: usize,
    pub(crate) ring: PolygonRing,
}

impl PolygonReference {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn ring(&self) -> &PolygonRing {
        &self.ring
    }
}

/// One slot of a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MissionEntry {
    Waypoint(GeoCoord),
    Polygon(PolygonReference),
}

impl MissionEntry {
    pub fn is_waypoint(&self) -> bool {
        matches!(self, MissionEntry::Waypoint(_))
    }

    pub fn as_waypoint(&self) -> Option<GeoCoord> {
        match self {
            MissionEntry::Waypoint(coord) => Some(*coord),
            MissionEntry::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&PolygonReference> {
        match self {
            MissionEntry::Polygon(reference) => Some(reference),
            MissionEntry::Waypoint(_) => None,
        }
    }
}
