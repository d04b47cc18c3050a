//! Boundary to the map engine that captures drawn geometry.

use super::mode::DrawKind;
use crate::coords::ProjectedCoord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The map engine refused or failed a registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

/// Identifies a draw tool registered with the map engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawToolHandle(pub Uuid);

/// Identifies a key listener registered with the map engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyListenerHandle(pub Uuid);

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Events delivered by the map engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// The draw tool finished a shape. Coordinates are in the projected system.
    DrawComplete {
        handle: DrawToolHandle,
        coordinates: Vec<ProjectedCoord>,
    },
    /// A key event seen by a registered listener.
    Key {
        listener: KeyListenerHandle,
        event: KeyEvent,
    },
}

/// Map engine operations the session drives.
pub trait MapEngine {
    /// Start capturing geometry of the given kind.
    fn register_draw_tool(&mut self, kind: DrawKind) -> Result<DrawToolHandle, EngineError>;

    /// Stop capturing geometry. Nothing is delivered for the handle afterwards.
    fn deregister_draw_tool(&mut self, handle: DrawToolHandle);

    /// Start forwarding key events.
    fn register_key_listener(&mut self) -> Result<KeyListenerHandle, EngineError>;

    /// Stop forwarding key events.
    fn deregister_key_listener(&mut self, handle: KeyListenerHandle);
}

/// The engine resources held for one drawing.
///
/// Acquired as a unit when drawing starts and consumed by `release`, so a registration
/// can only be given back once.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DrawRegistration {
    pub(crate) tool: DrawToolHandle,
    pub(crate) keys: KeyListenerHandle,
}

impl DrawRegistration {
    pub(crate) fn acquire<M: MapEngine>(engine: &mut M, kind: DrawKind) -> Result<Self, EngineError> {
        let tool = engine.register_draw_tool(kind)?;
        match engine.register_key_listener() {
            Ok(keys) => Ok(Self { tool, keys }),
            Err(e) => {
                engine.deregister_draw_tool(tool);
                Err(e)
            }
        }
    }

    pub(crate) fn release<M: MapEngine>(self, engine: &mut M) {
        engine.deregister_key_listener(self.keys);
        engine.deregister_draw_tool(self.tool);
    }
}
