//! Diagnostic reports produced by the per-tick pass.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::types::TimeMillis;

/// What one tick did, for diagnostics and host display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Host clock at the start of the tick.
    pub now_ms: TimeMillis,
    /// Live entities visited.
    pub total: usize,
    /// Entities shown to the renderer after this tick.
    pub visible: usize,
    /// Entities whose transforms were refreshed this tick.
    pub refreshed: usize,
    /// Entity count per tier (Near/Mid/Far/Culled) as classified this tick.
    pub tier_counts: [usize; 4],
    /// Non-fatal failures encountered during the pass (geodesy retries).
    pub errors: Vec<RegistryError>,
}

/// Rolling one-second statistics window (tick rate, refresh volume).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsWindow {
    /// Ticks completed in the last whole second.
    pub ticks_per_sec: u32,
    /// Transform refreshes performed in the last whole second.
    pub refreshes_per_sec: u32,
}
