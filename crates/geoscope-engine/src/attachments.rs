//! Tier-sensitive attachments carried by entities.
//!
//! Surface entities carry sensor-volume meshes whose tessellation
//! coarsens with distance; air entities carry a track line whose layer
//! count drops. The scheduling pass stays kind-agnostic; the kind enum
//! is matched in exactly one place, at tier propagation.

use geoscope_core::constants::{
    SENSOR_AZIMUTH_STEP_DEG, SENSOR_ELEVATION_STEP_DEG, TRACK_LINE_LAYERS,
};
use geoscope_core::enums::{DetailTier, EntityKind};
use geoscope_core::render::AttachmentDetail;

/// Kind-specific attachment payload. Closed set, dispatched by a single
/// match, with no downcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentSet {
    /// Sensor volume suite (surface entities).
    Sensors {
        visible: bool,
        applied_tier: Option<DetailTier>,
    },
    /// Track line (air entities).
    Trail {
        visible: bool,
        applied_tier: Option<DetailTier>,
    },
}

impl AttachmentSet {
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Surface => AttachmentSet::Sensors {
                visible: true,
                applied_tier: None,
            },
            EntityKind::Air => AttachmentSet::Trail {
                visible: true,
                applied_tier: None,
            },
        }
    }

    /// Tessellation parameters for a tier. Culled entities carry no
    /// detail request (they are hidden outright).
    pub fn detail_for(&self, tier: DetailTier) -> Option<AttachmentDetail> {
        if tier == DetailTier::Culled {
            return None;
        }
        let index = tier.index();
        Some(match self {
            AttachmentSet::Sensors { .. } => AttachmentDetail::SensorMesh {
                azimuth_step_deg: SENSOR_AZIMUTH_STEP_DEG[index],
                elevation_step_deg: SENSOR_ELEVATION_STEP_DEG[index],
            },
            AttachmentSet::Trail { .. } => AttachmentDetail::TrackLine {
                layers: TRACK_LINE_LAYERS[index],
            },
        })
    }

    /// Propagate a new tier. Returns the re-tessellation request only when
    /// the applied tier actually changes, so repeated refreshes in the same
    /// tier cost nothing downstream.
    pub fn retier(&mut self, tier: DetailTier) -> Option<AttachmentDetail> {
        let applied = match self {
            AttachmentSet::Sensors { applied_tier, .. }
            | AttachmentSet::Trail { applied_tier, .. } => applied_tier,
        };
        if *applied == Some(tier) {
            return None;
        }
        let detail = self.detail_for(tier)?;
        match self {
            AttachmentSet::Sensors { applied_tier, .. }
            | AttachmentSet::Trail { applied_tier, .. } => *applied_tier = Some(tier),
        }
        Some(detail)
    }

    /// Master switch. Returns whether the flag changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let flag = match self {
            AttachmentSet::Sensors { visible, .. } | AttachmentSet::Trail { visible, .. } => {
                visible
            }
        };
        if *flag == visible {
            return false;
        }
        *flag = visible;
        true
    }

    pub fn is_visible(&self) -> bool {
        match self {
            AttachmentSet::Sensors { visible, .. } | AttachmentSet::Trail { visible, .. } => {
                *visible
            }
        }
    }
}
