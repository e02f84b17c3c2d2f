//! LOD and update-scheduling tuning parameters.

// --- Distance thresholds (meters) ---

/// Upper bound of the near band; full detail inside this distance.
pub const DISTANCE_NEAR_M: f64 = 500_000.0;

/// Upper bound of the middle band.
pub const DISTANCE_MID_M: f64 = 2_000_000.0;

/// Upper bound of the far band. Beyond this, entities are hidden
/// and excluded from refresh entirely.
pub const DISTANCE_FAR_M: f64 = 5_000_000.0;

// --- Refresh intervals (milliseconds) ---

/// Near entities: 20 refreshes/sec.
pub const REFRESH_INTERVAL_NEAR_MS: u64 = 50;

/// Mid entities: 10 refreshes/sec.
pub const REFRESH_INTERVAL_MID_MS: u64 = 100;

/// Far entities: 5 refreshes/sec.
pub const REFRESH_INTERVAL_FAR_MS: u64 = 200;

// --- Change-detection epsilons ---

/// Minimum position change (degrees for lon/lat, meters for altitude)
/// that counts as movement. Smaller deltas are floating-point noise.
pub const POSITION_EPSILON: f64 = 1e-9;

/// Minimum attitude change in degrees that counts as rotation.
pub const ATTITUDE_EPSILON: f64 = 1e-6;

/// Minimum scale change that counts.
pub const SCALE_EPSILON: f64 = 1e-6;

// --- Sensor volume tessellation (surface entities) ---

/// Azimuth step angles in degrees per tier (Near/Mid/Far).
pub const SENSOR_AZIMUTH_STEP_DEG: [u32; 3] = [10, 20, 40];

/// Elevation step angles in degrees per tier (Near/Mid/Far).
pub const SENSOR_ELEVATION_STEP_DEG: [u32; 3] = [10, 20, 40];

// --- Track line tessellation (air entities) ---

/// Track line layer counts per tier (Near/Mid/Far). More layers = smoother.
pub const TRACK_LINE_LAYERS: [u32; 3] = [150, 80, 40];

// --- Statistics ---

/// Interval between diagnostic statistics emissions (milliseconds).
pub const STATS_INTERVAL_MS: i64 = 1000;
