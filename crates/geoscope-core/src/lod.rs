//! Distance-tiered level-of-detail classification.
//!
//! Pure: `classify` is a total function of distance with no state or side
//! effects, cheap enough to call once per entity per tick. Ties at a cut
//! point belong to the farther tier (comparisons are strict `<` against
//! each upper bound).

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::DetailTier;

/// Distance thresholds and per-tier refresh intervals.
/// Built once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodConfig {
    /// Upper bound of tier Near (meters).
    near_m: f64,
    /// Upper bound of tier Mid (meters).
    mid_m: f64,
    /// Upper bound of tier Far (meters); at or beyond, entities are culled.
    far_m: f64,
    /// Minimum milliseconds between refreshes for tiers Near/Mid/Far.
    refresh_intervals_ms: [u64; 3],
}

/// Rejected LOD configuration.
#[derive(Debug, thiserror::Error)]
pub enum LodConfigError {
    /// Thresholds must be positive and strictly ascending.
    #[error("thresholds must be positive and strictly ascending: {near} / {mid} / {far}")]
    ThresholdOrder { near: f64, mid: f64, far: f64 },

    /// A refresh interval of zero would refresh every tick regardless of tier.
    #[error("refresh interval for tier {tier} must be non-zero")]
    ZeroInterval { tier: usize },
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            near_m: DISTANCE_NEAR_M,
            mid_m: DISTANCE_MID_M,
            far_m: DISTANCE_FAR_M,
            refresh_intervals_ms: [
                REFRESH_INTERVAL_NEAR_MS,
                REFRESH_INTERVAL_MID_MS,
                REFRESH_INTERVAL_FAR_MS,
            ],
        }
    }
}

impl LodConfig {
    /// Build a validated configuration from explicit cut points and intervals.
    pub fn new(
        near_m: f64,
        mid_m: f64,
        far_m: f64,
        refresh_intervals_ms: [u64; 3],
    ) -> Result<Self, LodConfigError> {
        if !(near_m > 0.0 && near_m < mid_m && mid_m < far_m) {
            return Err(LodConfigError::ThresholdOrder {
                near: near_m,
                mid: mid_m,
                far: far_m,
            });
        }
        if let Some(tier) = refresh_intervals_ms.iter().position(|&ms| ms == 0) {
            return Err(LodConfigError::ZeroInterval { tier });
        }
        Ok(Self {
            near_m,
            mid_m,
            far_m,
            refresh_intervals_ms,
        })
    }

    /// Classify a distance into a detail tier.
    pub fn classify(&self, distance_m: f64) -> DetailTier {
        if distance_m < self.near_m {
            DetailTier::Near
        } else if distance_m < self.mid_m {
            DetailTier::Mid
        } else if distance_m < self.far_m {
            DetailTier::Far
        } else {
            DetailTier::Culled
        }
    }

    /// Minimum milliseconds between refreshes for a tier.
    /// `None` for Culled: those entities are never refreshed.
    pub fn refresh_interval_ms(&self, tier: DetailTier) -> Option<u64> {
        match tier {
            DetailTier::Culled => None,
            _ => Some(self.refresh_intervals_ms[tier.index()]),
        }
    }

    /// The far cut point beyond which entities are hidden.
    pub fn far_m(&self) -> f64 {
        self.far_m
    }
}
