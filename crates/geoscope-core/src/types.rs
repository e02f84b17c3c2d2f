//! Fundamental geometric and timing types.

use serde::{Deserialize, Serialize};

/// External entity identifier, unique among live entities at any time.
/// Assigned by the upstream telemetry source, not by the registry.
pub type EntityId = u32;

/// Monotonic wall-clock time in milliseconds, supplied by the host.
pub type TimeMillis = i64;

/// Geodetic position on the WGS84 ellipsoid.
/// Longitude/latitude in degrees, altitude in meters above the ellipsoid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geodetic {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub alt_m: f64,
}

/// Attitude as heading/pitch/roll Euler angles in degrees.
/// Heading rotates around the local up axis (0 = North, clockwise positive),
/// pitch around the local east axis, roll around the forward axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
}

impl Geodetic {
    pub fn new(lon_deg: f64, lat_deg: f64, alt_m: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            alt_m,
        }
    }

    /// All three coordinates are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.lon_deg.is_finite() && self.lat_deg.is_finite() && self.alt_m.is_finite()
    }
}

impl Attitude {
    pub fn new(heading_deg: f64, pitch_deg: f64, roll_deg: f64) -> Self {
        Self {
            heading_deg,
            pitch_deg,
            roll_deg,
        }
    }

    /// All three angles are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.heading_deg.is_finite() && self.pitch_deg.is_finite() && self.roll_deg.is_finite()
    }
}
