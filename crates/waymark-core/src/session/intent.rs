//! Operator intents emitted by the review surfaces and toolbar.

use super::mode::DrawKind;
use serde::{Deserialize, Serialize};

/// Actions the operator can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Choose what to draw next.
    SelectDrawType(DrawKind),
    /// Begin drawing the selected kind.
    StartDrawing,
    /// Abort the current drawing.
    StopDrawing,
    /// Draw a polygon to place before the given waypoint number.
    InsertPolygonBefore(usize),
    /// Draw a polygon to place after the given waypoint number.
    InsertPolygonAfter(usize),
    /// Open the polygon referenced in a mission slot.
    ViewPolygon(usize),
    /// Splice the reviewed polygon into the mission.
    ImportPoints,
    /// Close the open review surface.
    CloseModal,
    /// Hide the drawing instructions prompt.
    DismissInstructions,
    /// Discard the mission and return to idle.
    ResetMission,
}
