//! Telemetry ingress records pushed by the upstream data source.
//!
//! Records are applied independently: a batch of N records is equivalent to
//! N sequential single updates, and a malformed record affects only its own
//! entity.

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::types::{Attitude, EntityId, Geodetic, TimeMillis};

/// One timestamped position/attitude report for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub entity_id: EntityId,
    pub kind: EntityKind,
    pub position: Geodetic,
    pub attitude: Attitude,
    /// Producer timestamp (milliseconds). Carried for diagnostics;
    /// scheduling uses the host tick clock, not this.
    pub timestamp_ms: TimeMillis,
}

impl StateUpdate {
    /// Whether every coordinate and angle is a finite number.
    /// Non-finite records are rejected as `InvalidRecord`.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.attitude.is_finite()
    }
}
