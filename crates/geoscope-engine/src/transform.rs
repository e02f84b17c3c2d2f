//! Per-entity transform state with epsilon-gated dirty flags.
//!
//! Setters only flip flags; the expensive work happens in `apply_pending`,
//! and only for the flags that are actually set. Calling `apply_pending`
//! with no dirty flags is a guaranteed no-op; this is the central
//! performance invariant of the engine.

use glam::DMat4;

use geoscope_core::constants::{ATTITUDE_EPSILON, POSITION_EPSILON, SCALE_EPSILON};
use geoscope_core::types::{Attitude, Geodetic};
use geoscope_geodesy::attitude;
use geoscope_geodesy::{Geodesy, GeodesyError};

/// Transforms recomputed by one `apply_pending` call. `None` means the
/// corresponding transform was clean and untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformDelta {
    /// Earth-relative placement (recomputed when position was dirty).
    pub world: Option<DMat4>,
    /// Local rotation + scale (recomputed when attitude or scale was dirty).
    pub local: Option<DMat4>,
}

impl TransformDelta {
    /// Nothing was recomputed.
    pub fn is_empty(&self) -> bool {
        self.world.is_none() && self.local.is_none()
    }
}

/// Logical position/attitude/scale of one entity, plus the dirty flags
/// that gate recomputation of its derived transforms.
///
/// Logical state is authoritative: getters always return the last-set
/// values, whether or not `apply_pending` has run since.
#[derive(Debug, Clone)]
pub struct TransformState {
    position: Geodetic,
    attitude: Attitude,
    scale: f64,
    visible: bool,
    position_dirty: bool,
    attitude_dirty: bool,
    scale_dirty: bool,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformState {
    /// Fresh state with every flag set, so the first apply always
    /// computes both transforms.
    pub fn new() -> Self {
        Self {
            position: Geodetic::default(),
            attitude: Attitude::default(),
            scale: 1.0,
            visible: true,
            position_dirty: true,
            attitude_dirty: true,
            scale_dirty: true,
        }
    }

    /// Update the position. Sets the position-dirty flag iff any coordinate
    /// moved by at least the position epsilon; sub-epsilon deltas leave
    /// state and flags untouched.
    pub fn set_position(&mut self, position: Geodetic) {
        if (self.position.lon_deg - position.lon_deg).abs() < POSITION_EPSILON
            && (self.position.lat_deg - position.lat_deg).abs() < POSITION_EPSILON
            && (self.position.alt_m - position.alt_m).abs() < POSITION_EPSILON
        {
            return;
        }
        self.position = position;
        self.position_dirty = true;
    }

    /// Update the attitude. Same epsilon gating as `set_position`.
    pub fn set_attitude(&mut self, attitude: Attitude) {
        if (self.attitude.heading_deg - attitude.heading_deg).abs() < ATTITUDE_EPSILON
            && (self.attitude.pitch_deg - attitude.pitch_deg).abs() < ATTITUDE_EPSILON
            && (self.attitude.roll_deg - attitude.roll_deg).abs() < ATTITUDE_EPSILON
        {
            return;
        }
        self.attitude = attitude;
        self.attitude_dirty = true;
    }

    /// Update the uniform scale. Scale feeds the same local transform as
    /// attitude, so it shares that recomputation pass.
    pub fn set_scale(&mut self, scale: f64) {
        if (self.scale - scale).abs() < SCALE_EPSILON {
            return;
        }
        self.scale = scale;
        self.scale_dirty = true;
    }

    /// Toggle visibility. Returns whether the flag changed: the caller
    /// propagates a change to the renderer immediately; this is the only
    /// setter with an immediate output side effect.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        true
    }

    pub fn position(&self) -> Geodetic {
        self.position
    }

    pub fn attitude(&self) -> Attitude {
        self.attitude
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Any recomputation pending?
    pub fn has_pending(&self) -> bool {
        self.position_dirty || self.attitude_dirty || self.scale_dirty
    }

    /// Recompute whatever is dirty and clear exactly the serviced flags.
    ///
    /// On a geodesy failure nothing is cleared: the entity keeps its last
    /// good transforms and the next due tick retries.
    pub fn apply_pending<G: Geodesy>(
        &mut self,
        geodesy: &G,
    ) -> Result<TransformDelta, GeodesyError> {
        let mut delta = TransformDelta::default();

        if self.position_dirty {
            delta.world = Some(geodesy.local_to_world(self.position)?);
            self.position_dirty = false;
        }

        if self.attitude_dirty || self.scale_dirty {
            delta.local = Some(attitude::local_transform(self.attitude, self.scale));
            self.attitude_dirty = false;
            self.scale_dirty = false;
        }

        Ok(delta)
    }
}
