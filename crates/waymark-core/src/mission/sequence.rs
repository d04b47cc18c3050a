//! The canonical ordered mission list.

use super::entry::{MissionEntry, Placement, PolygonReference, PolygonRing};
use super::{SequenceError, SequenceResult};
use crate::coords::GeoCoord;
use crate::distance::{self, Meters};

/// Ordered mission of waypoints and polygon references.
///
/// Every polygon reference records its own slot index; the sequence keeps those indices
/// in step with actual positions across every mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissionSequence {
    entries: Vec<MissionEntry>,
}

impl MissionSequence {
    /// Create an empty mission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append waypoints to the end of the mission.
    pub fn append_waypoints(&mut self, points: &[GeoCoord]) -> SequenceResult<()> {
        if points.is_empty() {
            return Err(SequenceError::EmptyGeometry);
        }
        self.entries
            .extend(points.iter().copied().map(MissionEntry::Waypoint));
        debug_assert!(self.is_index_consistent());
        Ok(())
    }

    /// Splice a polygon into the mission next to waypoint number `anchor`.
    ///
    /// `anchor` counts waypoints only. Polygon slots passed while walking towards the
    /// target push the insertion point one slot further, and every reference that ends up
    /// behind the new one is renumbered. Returns the slot the polygon now occupies.
    pub fn splice_ring(
        &mut self,
        ring: PolygonRing,
        anchor: usize,
        placement: Placement,
    ) -> SequenceResult<usize> {
        if ring.is_empty() {
            return Err(SequenceError::NoPendingRing);
        }
        let waypoints = self.waypoint_count();
        if anchor >= waypoints {
            return Err(SequenceError::AnchorOutOfRange { anchor, waypoints });
        }

        let mut position = match placement {
            Placement::Before => anchor,
            Placement::After => anchor + 1,
        };
        let mut slot = 0;
        while slot < position && slot < self.entries.len() {
            if !self.entries[slot].is_waypoint() {
                position += 1;
            }
            slot += 1;
        }
        let position = position.min(self.entries.len());

        for entry in &mut self.entries[position..] {
            if let MissionEntry::Polygon(reference) = entry {
                reference.index += 1;
            }
        }
        let points = ring.len();
        self.entries.insert(
            position,
            MissionEntry::Polygon(PolygonReference {
                index: position,
                ring,
            }),
        );
        debug_assert!(self.is_index_consistent());

        log::info!(
            "Spliced {}-point polygon {:?} waypoint {} at slot {}",
            points,
            placement,
            anchor,
            position
        );
        Ok(position)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get the entry in a slot.
    pub fn entry_at(&self, index: usize) -> Option<&MissionEntry> {
        self.entries.get(index)
    }

    /// Number of slots, polygons included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of waypoint entries.
    pub fn waypoint_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_waypoint()).count()
    }

    /// Iterate over the current entries in order.
    ///
    /// Each call starts a fresh pass over the sequence as it is now.
    pub fn entries(&self) -> impl Iterator<Item = &MissionEntry> + '_ {
        self.entries.iter()
    }

    /// Iterate over waypoint coordinates, skipping polygon slots.
    pub fn waypoints(&self) -> impl Iterator<Item = GeoCoord> + '_ {
        self.entries.iter().filter_map(MissionEntry::as_waypoint)
    }

    /// Iterate over polygon references.
    pub fn polygon_references(&self) -> impl Iterator<Item = &PolygonReference> + '_ {
        self.entries.iter().filter_map(MissionEntry::as_polygon)
    }

    /// Leg lengths between consecutive waypoints, ignoring polygon slots.
    pub fn waypoint_distances(&self) -> Vec<Meters> {
        let points: Vec<GeoCoord> = self.waypoints().collect();
        distance::line_distances(&points)
    }

    /// Check that every polygon reference records its actual slot.
    pub fn is_index_consistent(&self) -> bool {
        self.entries.iter().enumerate().all(|(slot, entry)| match entry {
            MissionEntry::Polygon(reference) => reference.index == slot,
            MissionEntry::Waypoint(_) => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> MissionSequence {
        let mut seq = MissionSequence::new();
        seq.append_waypoints(&[
            GeoCoord::new(0.0, 0.0),
            GeoCoord::new(0.0, 1.0),
            GeoCoord::new(1.0, 1.0),
        ])
        .unwrap();
        seq
    }

    fn triangle() -> PolygonRing {
        PolygonRing::from_points(vec![
            GeoCoord::new(0.5, 0.5),
            GeoCoord::new(0.6, 0.5),
            GeoCoord::new(0.55, 0.6),
        ])
    }

    fn kinds(seq: &MissionSequence) -> String {
        seq.entries()
            .map(|e| match e {
                MissionEntry::Waypoint(_) => "W".to_string(),
                MissionEntry::Polygon(p) => format!("P{}", p.index()),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_append_waypoints() {
        let seq = abc();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.waypoint_count(), 3);
        assert_eq!(seq.waypoint_distances(), vec![0, 111195, 111178]);
    }

    #[test]
    fn test_append_empty_fails() {
        let mut seq = abc();
        assert_eq!(seq.append_waypoints(&[]), Err(SequenceError::EmptyGeometry));
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_splice_after_middle() {
        let mut seq = abc();
        let slot = seq.splice_ring(triangle(), 1, Placement::After).unwrap();
        assert_eq!(slot, 2);
        assert_eq!(kinds(&seq), "W,W,P2,W");
        assert_eq!(seq.entry_at(3).and_then(|e| e.as_waypoint()), Some(GeoCoord::new(1.0, 1.0)));
    }

    #[test]
    fn test_splice_before_first() {
        let mut seq = abc();
        assert_eq!(seq.splice_ring(triangle(), 0, Placement::Before), Ok(0));
        assert_eq!(kinds(&seq), "P0,W,W,W");
    }

    #[test]
    fn test_splice_after_last() {
        let mut seq = abc();
        assert_eq!(seq.splice_ring(triangle(), 2, Placement::After), Ok(3));
        assert_eq!(kinds(&seq), "W,W,W,P3");
    }

    #[test]
    fn test_splice_skips_existing_polygons() {
        let mut seq = abc();
        seq.splice_ring(triangle(), 0, Placement::After).unwrap();
        assert_eq!(kinds(&seq), "W,P1,W,W");

        // Waypoint 1 is still the second waypoint even though it now sits in slot 2.
        let slot = seq.splice_ring(triangle(), 1, Placement::After).unwrap();
        assert_eq!(slot, 3);
        assert_eq!(kinds(&seq), "W,P1,W,P3,W");
    }

    #[test]
    fn test_splice_renumbers_later_references() {
        let mut seq = abc();
        seq.splice_ring(triangle(), 2, Placement::After).unwrap();
        seq.splice_ring(triangle(), 1, Placement::After).unwrap();
        assert_eq!(kinds(&seq), "W,W,P2,W,P4");
        seq.splice_ring(triangle(), 0, Placement::Before).unwrap();
        assert_eq!(kinds(&seq), "P0,W,W,P3,W,P5");
        assert!(seq.is_index_consistent());
    }

    #[test]
    fn test_splice_empty_ring() {
        let mut seq = abc();
        let result = seq.splice_ring(PolygonRing::default(), 0, Placement::Before);
        assert_eq!(result, Err(SequenceError::NoPendingRing));
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_splice_anchor_out_of_range() {
        let mut seq = abc();
        let result = seq.splice_ring(triangle(), 3, Placement::Before);
        assert_eq!(
            result,
            Err(SequenceError::AnchorOutOfRange { anchor: 3, waypoints: 3 })
        );
        assert!(MissionSequence::new()
            .splice_ring(triangle(), 0, Placement::After)
            .is_err());
    }

    #[test]
    fn test_many_splices_keep_invariants() {
        let mut seq = MissionSequence::new();
        let line: Vec<GeoCoord> = (0..8).map(|i| GeoCoord::new(i as f64, 0.0)).collect();
        seq.append_waypoints(&line).unwrap();

        // Deterministic LCG so the walk covers varied anchors and placements.
        let mut state: u32 = 12345;
        for round in 0..40 {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            let anchor = (state >> 16) as usize % line.len();
            let placement = if state & 1 == 0 { Placement::Before } else { Placement::After };
            seq.splice_ring(triangle(), anchor, placement).unwrap();

            assert!(seq.is_index_consistent(), "round {}", round);
            assert_eq!(seq.waypoint_count(), line.len());
            assert_eq!(seq.len(), line.len() + round + 1);
            assert_eq!(seq.waypoints().collect::<Vec<_>>(), line);
        }
    }

    #[test]
    fn test_waypoint_distances_ignore_polygons() {
        let mut seq = abc();
        let before = seq.waypoint_distances();
        seq.splice_ring(triangle(), 1, Placement::Before).unwrap();
        assert_eq!(seq.waypoint_distances(), before);
    }

    #[test]
    fn test_entries_is_restartable() {
        let mut seq = abc();
        assert_eq!(seq.entries().count(), 3);
        seq.splice_ring(triangle(), 0, Placement::After).unwrap();
        assert_eq!(seq.entries().count(), 4);
        assert_eq!(seq.polygon_references().count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut seq = abc();
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.waypoint_distances(), Vec::<Meters>::new());
    }
}
