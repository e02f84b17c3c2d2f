//! Error taxonomy for registry operations.
//!
//! Nothing here is fatal: every failure degrades to "entity keeps its
//! previous visual state" and the tick loop continues.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Non-fatal, reportable registry errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum RegistryError {
    /// Create was called with an id that is already live.
    /// The existing entity is untouched.
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    /// An update or removal addressed an id that is not live.
    /// No entity is implicitly created.
    #[error("entity {0} not found")]
    UnknownEntity(EntityId),

    /// Malformed telemetry (non-finite coordinates or angles).
    /// The record is skipped; the rest of a batch still applies.
    #[error("invalid record for entity {entity_id}: {reason}")]
    InvalidRecord { entity_id: EntityId, reason: String },

    /// The geodesy service could not convert a coordinate. The entity
    /// keeps its last good transform and retries next due tick.
    #[error("geodesy failure for entity {entity_id}: {message}")]
    Geodesy { entity_id: EntityId, message: String },
}
