//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Entity category. Closed set: the scheduling and classification logic is
/// kind-agnostic, so adding a variant only touches attachment dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Surface vehicle (ship). Carries sensor-volume attachments.
    #[default]
    Surface,
    /// Airborne vehicle (missile, aircraft). Carries a track line attachment.
    Air,
}

/// Level-of-detail tier derived from distance to the viewpoint.
/// Ordered: lower tier = nearer = more detail, more frequent refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DetailTier {
    /// Nearest band: full geometry, highest refresh rate.
    Near,
    /// Middle band: reduced geometry, medium refresh rate.
    Mid,
    /// Far band: coarse geometry, lowest refresh rate.
    Far,
    /// Beyond the far cut point: hidden and never refreshed.
    Culled,
}

impl DetailTier {
    /// Tier index 0..=3 (Near..Culled) for tables and reports.
    pub fn index(self) -> usize {
        match self {
            DetailTier::Near => 0,
            DetailTier::Mid => 1,
            DetailTier::Far => 2,
            DetailTier::Culled => 3,
        }
    }

    /// Whether entities in this tier are shown at all.
    pub fn is_visible(self) -> bool {
        self != DetailTier::Culled
    }
}
