//! Interaction modes of an editing session.

use crate::mission::Placement;
use serde::{Deserialize, Serialize};

/// Geometry the operator is drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawKind {
    Line,
    Polygon,
}

/// Where a polygon being drawn will be spliced into the mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpliceTarget {
    /// Waypoint number the polygon is placed next to.
    pub anchor: usize,
    pub placement: Placement,
}

/// Why a polygon is on the review surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewOrigin {
    /// Freshly drawn, not bound to the mission.
    Normal,
    /// Freshly drawn for insertion next to a waypoint.
    Splice(SpliceTarget),
    /// An existing polygon reference opened from the mission review.
    ViewOnly { slot: usize },
}

impl ReviewOrigin {
    /// Only polygons drawn for a splice can be imported.
    pub fn can_import(&self) -> bool {
        matches!(self, ReviewOrigin::Splice(_))
    }

    /// Whether closing the polygon review goes back to the mission review.
    pub fn returns_to_mission(&self) -> bool {
        !matches!(self, ReviewOrigin::Normal)
    }
}

/// The mode an editing session is in. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    TypeSelected(DrawKind),
    Drawing {
        kind: DrawKind,
        target: Option<SpliceTarget>,
    },
    ReviewingMission,
    ReviewingPolygon(ReviewOrigin),
}

impl InteractionMode {
    pub fn is_drawing(&self) -> bool {
        matches!(self, InteractionMode::Drawing { .. })
    }
}
