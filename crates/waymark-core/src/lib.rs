//! Waymark Core Library
//!
//! Mission model and drawing interaction logic for the Waymark mission planner.
//! Map rendering, geometry capture and the modal presentation layer live outside this
//! crate and talk to it through [`MapEngine`], [`MapEvent`] and [`Intent`].

pub mod config;
pub mod coords;
pub mod distance;
pub mod mission;
pub mod review;
pub mod session;

pub use config::{ConfigError, DistanceBasis, LineCompletion, SessionConfig};
pub use coords::{GeoCoord, ProjectedCoord, TransformError, to_geographic, to_projected};
pub use distance::{Meters, line_distances, planar_ring_distances, ring_distances};
pub use mission::{MissionEntry, MissionSequence, Placement, PolygonReference, PolygonRing, SequenceError};
pub use review::{MissionRow, MissionRowKind, MissionView, PolygonPointRow, PolygonView};
pub use session::{
    DrawKind, DrawToolHandle, EngineError, Intent, InteractionMode, KeyEvent, KeyListenerHandle,
    MapEngine, MapEvent, ReviewOrigin, Session, SessionError, SessionResult, SpliceTarget,
};
