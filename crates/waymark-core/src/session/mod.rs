//! Editing session: the draw-interaction state machine.
//!
//! A session owns the mission, the current interaction mode and the map engine. Events
//! are handled one at a time, each to completion. Every change of mode goes through a
//! single transition point which gives the draw registration back to the engine whenever
//! a drawing ends, however it ends.

mod engine;
mod intent;
mod mode;

pub use engine::{DrawToolHandle, EngineError, KeyEvent, KeyListenerHandle, MapEngine, MapEvent};
pub use intent::Intent;
pub use mode::{DrawKind, InteractionMode, ReviewOrigin, SpliceTarget};

use crate::config::{ConfigError, DistanceBasis, LineCompletion, SessionConfig};
use crate::coords::{self, ProjectedCoord};
use crate::distance::{self, Meters};
use crate::mission::{MissionSequence, Placement, PolygonRing, SequenceError};
use crate::review::{MissionView, PolygonView};
use engine::DrawRegistration;
use thiserror::Error;

/// Session errors. All are recoverable; the mission is left as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Please select a draw type first (Line or Polygon)")]
    NoDrawTypeSelected,
    #[error("Drawing produced no usable points")]
    EmptyGeometry,
    #[error("Event for a drawing that is no longer active")]
    StaleInteractionEvent,
    #[error("Slot {0} is not a polygon reference")]
    NotAPolygon(usize),
    #[error("Only polygons drawn for insertion can be imported")]
    ImportUnavailable,
    #[error("{intent:?} is not available while {mode:?}")]
    UnexpectedIntent {
        intent: Intent,
        mode: InteractionMode,
    },
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error("Draw tool error: {0}")]
    DrawTool(#[from] EngineError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// A polygon waiting on the review surface.
#[derive(Debug)]
struct PendingPolygon {
    ring: PolygonRing,
    ring_distances: Vec<Meters>,
    origin: ReviewOrigin,
}

#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Idle,
    TypeSelected(DrawKind),
    Drawing {
        kind: DrawKind,
        target: Option<SpliceTarget>,
        registration: DrawRegistration,
    },
    ReviewingMission,
    ReviewingPolygon(PendingPolygon),
}

impl SessionState {
    fn mode(&self) -> InteractionMode {
        match self {
            SessionState::Idle => InteractionMode::Idle,
            SessionState::TypeSelected(kind) => InteractionMode::TypeSelected(*kind),
            SessionState::Drawing { kind, target, .. } => InteractionMode::Drawing {
                kind: *kind,
                target: *target,
            },
            SessionState::ReviewingMission => InteractionMode::ReviewingMission,
            SessionState::ReviewingPolygon(pending) => {
                InteractionMode::ReviewingPolygon(pending.origin)
            }
        }
    }
}

/// An interactive mission editing session.
pub struct Session<M: MapEngine> {
    engine: M,
    config: SessionConfig,
    mission: MissionSequence,
    state: SessionState,
    /// Whether the drawing instructions prompt is showing.
    instructions_visible: bool,
}

impl<M: MapEngine> Session<M> {
    /// Create a session with the default configuration.
    pub fn new(engine: M) -> Self {
        Self::from_parts(engine, SessionConfig::default())
    }

    /// Create a session with a caller-supplied configuration, rejecting invalid ones.
    pub fn with_config(engine: M, config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(engine, config))
    }

    fn from_parts(engine: M, config: SessionConfig) -> Self {
        Self {
            engine,
            config,
            mission: MissionSequence::new(),
            state: SessionState::Idle,
            instructions_visible: false,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.mode()
    }

    pub fn mission(&self) -> &MissionSequence {
        &self.mission
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> &M {
        &self.engine
    }

    pub fn instructions_visible(&self) -> bool {
        self.instructions_visible
    }

    /// Snapshot for the mission review surface, while it is open.
    pub fn mission_view(&self) -> Option<MissionView> {
        match self.state {
            SessionState::ReviewingMission => Some(MissionView::build(&self.mission)),
            _ => None,
        }
    }

    /// Snapshot for the polygon review surface, while it is open.
    pub fn polygon_view(&self) -> Option<PolygonView> {
        match &self.state {
            SessionState::ReviewingPolygon(pending) => Some(PolygonView::new(
                &pending.ring,
                &pending.ring_distances,
                pending.origin,
            )),
            _ => None,
        }
    }

    /// Handle an operator intent.
    pub fn handle_intent(&mut self, intent: Intent) -> SessionResult<()> {
        match intent {
            Intent::SelectDrawType(kind) => match self.state {
                SessionState::Idle | SessionState::TypeSelected(_) => {
                    self.transition(SessionState::TypeSelected(kind));
                    Ok(())
                }
                _ => Err(self.unexpected(intent)),
            },
            Intent::StartDrawing => match self.state {
                SessionState::TypeSelected(kind) => {
                    self.begin_drawing(kind, None)?;
                    self.instructions_visible = self.config.show_instructions;
                    Ok(())
                }
                SessionState::Idle => Err(SessionError::NoDrawTypeSelected),
                _ => Err(self.unexpected(intent)),
            },
            Intent::StopDrawing => {
                match self.state {
                    SessionState::Drawing { .. } => self.cancel_drawing(),
                    SessionState::TypeSelected(_) => self.transition(SessionState::Idle),
                    _ => log::debug!("Stop drawing ignored in {:?}", self.mode()),
                }
                Ok(())
            }
            Intent::InsertPolygonBefore(anchor) => {
                self.begin_splice(intent, anchor, Placement::Before)
            }
            Intent::InsertPolygonAfter(anchor) => {
                self.begin_splice(intent, anchor, Placement::After)
            }
            Intent::ViewPolygon(slot) => self.view_polygon(intent, slot),
            Intent::ImportPoints => self.import_points(intent),
            Intent::CloseModal => {
                self.close_modal();
                Ok(())
            }
            Intent::DismissInstructions => {
                self.instructions_visible = false;
                Ok(())
            }
            Intent::ResetMission => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Handle an event delivered by the map engine.
    ///
    /// Events for a drawing that has already ended are logged and dropped.
    pub fn handle_map_event(&mut self, event: MapEvent) -> SessionResult<()> {
        let result = match event {
            MapEvent::DrawComplete {
                handle,
                coordinates,
            } => self.on_draw_complete(handle, &coordinates),
            MapEvent::Key { listener, event } => self.on_key(listener, event),
        };
        match result {
            Err(SessionError::StaleInteractionEvent) => {
                log::debug!("Ignoring stale map event in {:?}", self.mode());
                Ok(())
            }
            Err(e) => {
                if self.mode().is_drawing() {
                    self.transition(SessionState::Idle);
                }
                Err(e)
            }
            ok => ok,
        }
    }

    /// Discard the mission and return to idle.
    pub fn reset(&mut self) {
        self.transition(SessionState::Idle);
        self.mission.clear();
        self.instructions_visible = false;
        log::info!("Mission reset");
    }

    /// Move to a new state, releasing the draw registration if a drawing ends.
    fn transition(&mut self, next: SessionState) {
        let previous = std::mem::replace(&mut self.state, next);
        let from = previous.mode();
        if let SessionState::Drawing { registration, .. } = previous {
            registration.release(&mut self.engine);
        }
        log::debug!("Mode {:?} -> {:?}", from, self.state.mode());
    }

    fn unexpected(&self, intent: Intent) -> SessionError {
        SessionError::UnexpectedIntent {
            intent,
            mode: self.mode(),
        }
    }

    fn begin_drawing(&mut self, kind: DrawKind, target: Option<SpliceTarget>) -> SessionResult<()> {
        let registration = DrawRegistration::acquire(&mut self.engine, kind).map_err(|e| {
            log::warn!("Could not register {:?} draw tool: {}", kind, e);
            e
        })?;
        self.transition(SessionState::Drawing {
            kind,
            target,
            registration,
        });
        Ok(())
    }

    fn begin_splice(&mut self, intent: Intent, anchor: usize, placement: Placement) -> SessionResult<()> {
        if !matches!(self.state, SessionState::ReviewingMission) {
            return Err(self.unexpected(intent));
        }
        let waypoints = self.mission.waypoint_count();
        if anchor >= waypoints {
            return Err(SequenceError::AnchorOutOfRange { anchor, waypoints }.into());
        }
        self.begin_drawing(DrawKind::Polygon, Some(SpliceTarget { anchor, placement }))
    }

    fn cancel_drawing(&mut self) {
        log::debug!("Drawing cancelled");
        self.instructions_visible = false;
        self.transition(SessionState::Idle);
    }

    fn on_draw_complete(&mut self, handle: DrawToolHandle, raw: &[ProjectedCoord]) -> SessionResult<()> {
        let (kind, target) = match &self.state {
            SessionState::Drawing {
                kind,
                target,
                registration,
            } if registration.tool == handle => (*kind, *target),
            _ => return Err(SessionError::StaleInteractionEvent),
        };
        self.instructions_visible = false;
        match kind {
            DrawKind::Line => self.complete_line(raw),
            DrawKind::Polygon => self.complete_polygon(raw, target),
        }
    }

    fn on_key(&mut self, listener: KeyListenerHandle, event: KeyEvent) -> SessionResult<()> {
        match &self.state {
            SessionState::Drawing { registration, .. } if registration.keys == listener => {}
            _ => return Err(SessionError::StaleInteractionEvent),
        }
        if let KeyEvent::Pressed(key) = event {
            if self.config.is_cancel_key(&key) {
                self.cancel_drawing();
            }
        }
        Ok(())
    }

    fn complete_line(&mut self, raw: &[ProjectedCoord]) -> SessionResult<()> {
        let points = coords::to_geographic_lossy(raw);
        if points.is_empty() {
            return Err(SessionError::EmptyGeometry);
        }
        if self.config.line_completion == LineCompletion::Replace {
            self.mission.clear();
        }
        self.mission.append_waypoints(&points)?;
        log::info!("Mission line with {} waypoints", points.len());
        self.transition(SessionState::ReviewingMission);
        Ok(())
    }

    fn complete_polygon(&mut self, raw: &[ProjectedCoord], target: Option<SpliceTarget>) -> SessionResult<()> {
        let (projected, geographic): (Vec<ProjectedCoord>, Vec<_>) =
            coords::convert_valid(raw).into_iter().unzip();
        let ring = PolygonRing::from_points(geographic);
        if ring.len() < 2 {
            log::warn!("Polygon collapsed to {} usable points", ring.len());
            return Err(SessionError::EmptyGeometry);
        }

        let origin = match target {
            Some(target) => ReviewOrigin::Splice(target),
            None => ReviewOrigin::Normal,
        };
        let ring_distances = match (origin, self.config.polygon_preview_basis) {
            (ReviewOrigin::Normal, DistanceBasis::Planar) => {
                distance::planar_ring_distances(&projected[..ring.len()])
            }
            _ => ring.distances(),
        };
        log::debug!("Polygon with {} points ready for review", ring.len());
        self.transition(SessionState::ReviewingPolygon(PendingPolygon {
            ring,
            ring_distances,
            origin,
        }));
        Ok(())
    }

    fn view_polygon(&mut self, intent: Intent, slot: usize) -> SessionResult<()> {
        if !matches!(self.state, SessionState::ReviewingMission) {
            return Err(self.unexpected(intent));
        }
        let ring = self
            .mission
            .entry_at(slot)
            .and_then(|entry| entry.as_polygon())
            .map(|reference| reference.ring().clone())
            .ok_or(SessionError::NotAPolygon(slot))?;
        let ring_distances = ring.distances();
        self.transition(SessionState::ReviewingPolygon(PendingPolygon {
            ring,
            ring_distances,
            origin: ReviewOrigin::ViewOnly { slot },
        }));
        Ok(())
    }

    fn import_points(&mut self, intent: Intent) -> SessionResult<()> {
        let (ring, target) = match &self.state {
            SessionState::ReviewingPolygon(pending) => match pending.origin {
                ReviewOrigin::Splice(target) => (pending.ring.clone(), target),
                _ => return Err(SessionError::ImportUnavailable),
            },
            _ => return Err(self.unexpected(intent)),
        };
        self.mission
            .splice_ring(ring, target.anchor, target.placement)?;
        self.transition(SessionState::ReviewingMission);
        Ok(())
    }

    fn close_modal(&mut self) {
        let next = match &self.state {
            SessionState::ReviewingMission => SessionState::Idle,
            SessionState::ReviewingPolygon(pending) if pending.origin.returns_to_mission() => {
                SessionState::ReviewingMission
            }
            SessionState::ReviewingPolygon(_) => SessionState::Idle,
            _ => {
                self.instructions_visible = false;
                return;
            }
        };
        self.transition(next);
    }
}

impl<M: MapEngine> Drop for Session<M> {
    fn drop(&mut self) {
        if let SessionState::Drawing { registration, .. } = std::mem::take(&mut self.state) {
            registration.release(&mut self.engine);
        }
    }
}
