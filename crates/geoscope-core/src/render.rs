//! Output contract toward the rendering collaborator.
//!
//! Data flow is push-only: the engine emits commands, the renderer is never
//! queried. Commands are plain serde data so any renderer binding can
//! consume them without adopting the engine's memory model.

use glam::DMat4;
use serde::{Deserialize, Serialize};

use crate::enums::DetailTier;
use crate::types::EntityId;

/// Tessellation parameters for a tier-sensitive attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttachmentDetail {
    /// Sensor volume mesh resolution (surface entities).
    SensorMesh {
        azimuth_step_deg: u32,
        elevation_step_deg: u32,
    },
    /// Track line smoothness (air entities).
    TrackLine { layers: u32 },
}

/// One instruction to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderCommand {
    /// Earth-relative placement of the entity (recomputed position).
    WorldTransform { entity_id: EntityId, matrix: DMat4 },
    /// Local rotation + scale of the entity (recomputed attitude/scale).
    LocalTransform { entity_id: EntityId, matrix: DMat4 },
    /// Show or hide the entity's whole subgraph.
    Visibility { entity_id: EntityId, visible: bool },
    /// New detail tier for the entity's representation selector.
    DetailTier {
        entity_id: EntityId,
        tier: DetailTier,
    },
    /// Re-tessellation request for a tier-sensitive attachment.
    AttachmentDetail {
        entity_id: EntityId,
        detail: AttachmentDetail,
    },
    /// Master switch for the entity's attachments (sensor volumes or
    /// track lines), independent of entity visibility.
    AttachmentVisibility { entity_id: EntityId, visible: bool },
}

/// Receiver for render commands. Implemented by renderer bindings;
/// the engine only ever pushes into it.
pub trait RenderSink {
    fn submit(&mut self, command: RenderCommand);
}

/// Buffering sink: collects commands in order for draining by a host
/// or inspection by tests.
#[derive(Debug, Default)]
pub struct RenderLog {
    commands: Vec<RenderCommand>,
}

impl RenderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Take all buffered commands, leaving the log empty.
    pub fn drain(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderSink for RenderLog {
    fn submit(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }
}
