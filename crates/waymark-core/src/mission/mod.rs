//! Mission model: an ordered list of waypoints with polygon references spliced in.
//!
//! A polygon occupies a single slot in the sequence regardless of how many points its
//! ring holds, so the operator-facing waypoint numbering is not disturbed by splices.

mod entry;
mod sequence;

pub use entry::{MissionEntry, Placement, PolygonReference, PolygonRing};
pub use sequence::MissionSequence;

use thiserror::Error;

/// Mission sequence errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("No points to add")]
    EmptyGeometry,
    #[error("No pending polygon ring to splice")]
    NoPendingRing,
    #[error("Waypoint {anchor} does not exist (mission has {waypoints} waypoints)")]
    AnchorOutOfRange { anchor: usize, waypoints: usize },
}

/// Result type for mission sequence operations.
pub type SequenceResult<T> = Result<T, SequenceError>;
