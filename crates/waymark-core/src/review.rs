//! Read-only snapshots for the mission and polygon review surfaces.

use crate::coords::GeoCoord;
use crate::distance::Meters;
use crate::mission::{MissionEntry, MissionSequence, PolygonRing};
use crate::session::{Intent, ReviewOrigin};

/// Format a coordinate pair the way the review tables show it.
pub fn format_coord(coord: GeoCoord) -> String {
    format!("{:.6}°, {:.6}°", coord.lon, coord.lat)
}

/// What a mission row stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum MissionRowKind {
    Waypoint {
        /// Operator-facing waypoint number, unaffected by polygon slots.
        number: usize,
        coord: GeoCoord,
    },
    Polygon {
        index: usize,
        points: usize,
    },
}

/// One row of the mission table.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionRow {
    /// Slot in the mission sequence.
    pub slot: usize,
    pub kind: MissionRowKind,
    /// Leg length from the previous waypoint. Absent for the first waypoint and polygons.
    pub distance: Option<Meters>,
}

impl MissionRow {
    pub fn label(&self) -> String {
        match self.kind {
            MissionRowKind::Waypoint { number, .. } => format!("WP({:02})", number),
            MissionRowKind::Polygon { index, .. } => format!("Polygon Ref ({})", index),
        }
    }

    /// Coordinate text for waypoint rows.
    pub fn coordinates(&self) -> Option<String> {
        match self.kind {
            MissionRowKind::Waypoint { coord, .. } => Some(format_coord(coord)),
            MissionRowKind::Polygon { .. } => None,
        }
    }

    /// Intents offered from this row.
    pub fn actions(&self) -> Vec<Intent> {
        match self.kind {
            MissionRowKind::Waypoint { number, .. } => vec![
                Intent::InsertPolygonBefore(number),
                Intent::InsertPolygonAfter(number),
            ],
            MissionRowKind::Polygon { .. } => vec![Intent::ViewPolygon(self.slot)],
        }
    }
}

/// Snapshot of the mission for review.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissionView {
    pub rows: Vec<MissionRow>,
    /// Leg lengths between consecutive waypoints, indexed by waypoint number.
    pub distances: Vec<Meters>,
}

impl MissionView {
    pub fn build(mission: &MissionSequence) -> Self {
        let distances = mission.waypoint_distances();
        let mut number = 0;
        let rows = mission
            .entries()
            .enumerate()
            .map(|(slot, entry)| match entry {
                MissionEntry::Waypoint(coord) => {
                    let row = MissionRow {
                        slot,
                        kind: MissionRowKind::Waypoint {
                            number,
                            coord: *coord,
                        },
                        distance: (number > 0).then(|| distances[number]),
                    };
                    number += 1;
                    row
                }
                MissionEntry::Polygon(reference) => MissionRow {
                    slot,
                    kind: MissionRowKind::Polygon {
                        index: reference.index(),
                        points: reference.ring().len(),
                    },
                    distance: None,
                },
            })
            .collect();
        Self { rows, distances }
    }
}

/// One vertex row of the polygon table.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPointRow {
    pub label: String,
    pub latitude: String,
    pub longitude: String,
    /// Leg length to the next vertex, wrapping to the first.
    ///
    /// This is the outgoing leg, so the closing edge sits on the last row. The drawing
    /// component showed the incoming leg instead, with 0 on the first row.
    pub distance_to_next: Option<Meters>,
}

/// Snapshot of a polygon under review.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonView {
    pub ring: Vec<GeoCoord>,
    pub ring_distances: Vec<Meters>,
    pub can_import: bool,
    pub origin: ReviewOrigin,
}

impl PolygonView {
    pub fn new(ring: &PolygonRing, ring_distances: &[Meters], origin: ReviewOrigin) -> Self {
        Self {
            ring: ring.points().to_vec(),
            ring_distances: ring_distances.to_vec(),
            can_import: origin.can_import(),
            origin,
        }
    }

    pub fn rows(&self) -> Vec<PolygonPointRow> {
        self.ring
            .iter()
            .enumerate()
            .map(|(i, coord)| PolygonPointRow {
                label: format!("P{}", i + 1),
                latitude: format!("{:.6}°", coord.lat),
                longitude: format!("{:.6}°", coord.lon),
                distance_to_next: self.ring_distances.get(i + 1).copied(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::Placement;

    fn mission_with_polygon() -> MissionSequence {
        let mut mission = MissionSequence::new();
        mission
            .append_waypoints(&[
                GeoCoord::new(0.0, 0.0),
                GeoCoord::new(0.0, 1.0),
                GeoCoord::new(1.0, 1.0),
            ])
            .unwrap();
        let ring = PolygonRing::from_points(vec![
            GeoCoord::new(0.5, 0.5),
            GeoCoord::new(0.6, 0.5),
            GeoCoord::new(0.55, 0.6),
        ]);
        mission.splice_ring(ring, 0, Placement::After).unwrap();
        mission
    }

    #[test]
    fn test_mission_rows() {
        let view = MissionView::build(&mission_with_polygon());
        assert_eq!(view.rows.len(), 4);
        assert_eq!(view.distances, vec![0, 111195, 111178]);

        let labels: Vec<String> = view.rows.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["WP(00)", "Polygon Ref (1)", "WP(01)", "WP(02)"]);

        let distances: Vec<Option<Meters>> = view.rows.iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![None, None, Some(111195), Some(111178)]);
    }

    #[test]
    fn test_mission_row_actions() {
        let view = MissionView::build(&mission_with_polygon());
        assert_eq!(
            view.rows[2].actions(),
            vec![Intent::InsertPolygonBefore(1), Intent::InsertPolygonAfter(1)]
        );
        assert_eq!(view.rows[1].actions(), vec![Intent::ViewPolygon(1)]);
        assert_eq!(view.rows[3].coordinates().as_deref(), Some("1.000000°, 1.000000°"));
        assert!(view.rows[1].coordinates().is_none());
    }

    #[test]
    fn test_empty_mission_view() {
        let view = MissionView::build(&MissionSequence::new());
        assert!(view.rows.is_empty());
        assert!(view.distances.is_empty());
    }

    #[test]
    fn test_polygon_rows_wrap_to_first() {
        let ring = PolygonRing::from_points(vec![
            GeoCoord::new(0.0, 0.0),
            GeoCoord::new(0.0, 1.0),
            GeoCoord::new(1.0, 1.0),
        ]);
        let view = PolygonView::new(&ring, &ring.distances(), ReviewOrigin::Normal);
        assert!(!view.can_import);

        let rows = view.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "P1");
        assert_eq!(rows[1].latitude, "1.000000°");
        assert_eq!(rows[2].longitude, "1.000000°");
        let legs: Vec<Option<Meters>> = rows.iter().map(|r| r.distance_to_next).collect();
        assert_eq!(legs, vec![Some(111195), Some(111178), Some(157250)]);
    }
}
