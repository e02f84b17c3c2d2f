//! WGS84 ellipsoid model: geodetic → ECEF conversion and local frames.

use glam::{DMat4, DVec3, DVec4};

use geoscope_core::types::Geodetic;

/// WGS84 semi-major axis (meters).
pub const WGS84_SEMI_MAJOR_M: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// First eccentricity squared, e² = f(2 - f).
const ECCENTRICITY_SQ: f64 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);

/// Conversion failure. Non-fatal: callers keep the last good transform
/// and retry later.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeodesyError {
    /// Input coordinates contain NaN or infinity.
    #[error("non-finite geodetic input (lon {lon_deg}, lat {lat_deg}, alt {alt_m})")]
    NonFiniteInput {
        lon_deg: f64,
        lat_deg: f64,
        alt_m: f64,
    },
}

/// Conversion service between geodetic coordinates and a common Cartesian
/// (ECEF) frame. Injected into the registry at construction.
pub trait Geodesy {
    /// Geodetic position to an ECEF position vector (meters).
    fn to_ecef(&self, position: Geodetic) -> Result<DVec3, GeodesyError>;

    /// Geodetic position to a local-to-world placement matrix: local
    /// east/north/up axes as columns, ECEF position as translation.
    fn local_to_world(&self, position: Geodetic) -> Result<DMat4, GeodesyError>;

    /// Euclidean distance between two ECEF positions (meters).
    fn distance_m(&self, a: DVec3, b: DVec3) -> f64 {
        a.distance(b)
    }
}

/// The standard WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wgs84;

impl Wgs84 {
    fn check(position: Geodetic) -> Result<(), GeodesyError> {
        if position.is_finite() {
            Ok(())
        } else {
            Err(GeodesyError::NonFiniteInput {
                lon_deg: position.lon_deg,
                lat_deg: position.lat_deg,
                alt_m: position.alt_m,
            })
        }
    }
}

impl Geodesy for Wgs84 {
    fn to_ecef(&self, position: Geodetic) -> Result<DVec3, GeodesyError> {
        Self::check(position)?;

        let lon = position.lon_deg.to_radians();
        let lat = position.lat_deg.to_radians();
        let alt = position.alt_m;

        let sin_lat = lat.sin();
        let cos_lat = lat.cos();

        // Prime vertical radius of curvature.
        let n = WGS84_SEMI_MAJOR_M / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();

        Ok(DVec3::new(
            (n + alt) * cos_lat * lon.cos(),
            (n + alt) * cos_lat * lon.sin(),
            (n * (1.0 - ECCENTRICITY_SQ) + alt) * sin_lat,
        ))
    }

    fn local_to_world(&self, position: Geodetic) -> Result<DMat4, GeodesyError> {
        let ecef = self.to_ecef(position)?;

        let lon = position.lon_deg.to_radians();
        let lat = position.lat_deg.to_radians();
        let (sin_lon, cos_lon) = lon.sin_cos();
        let (sin_lat, cos_lat) = lat.sin_cos();

        // Local tangent frame at the position: east, north, up.
        let east = DVec3::new(-sin_lon, cos_lon, 0.0);
        let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
        let up = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

        Ok(DMat4::from_cols(
            DVec4::from((east, 0.0)),
            DVec4::from((north, 0.0)),
            DVec4::from((up, 0.0)),
            DVec4::from((ecef, 1.0)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WGS84_SEMI_MINOR_M: f64 = WGS84_SEMI_MAJOR_M * (1.0 - WGS84_FLATTENING);

    #[test]
    fn test_ecef_at_equator_prime_meridian() {
        let ecef = Wgs84.to_ecef(Geodetic::new(0.0, 0.0, 0.0)).unwrap();
        assert!((ecef.x - WGS84_SEMI_MAJOR_M).abs() < 1e-6);
        assert!(ecef.y.abs() < 1e-6);
        assert!(ecef.z.abs() < 1e-6);
    }

    #[test]
    fn test_ecef_at_north_pole() {
        let ecef = Wgs84.to_ecef(Geodetic::new(0.0, 90.0, 0.0)).unwrap();
        assert!(ecef.x.abs() < 1e-3);
        assert!(ecef.y.abs() < 1e-3);
        assert!((ecef.z - WGS84_SEMI_MINOR_M).abs() < 1e-3);
    }

    #[test]
    fn test_altitude_extends_along_up() {
        let surface = Wgs84.to_ecef(Geodetic::new(0.0, 0.0, 0.0)).unwrap();
        let raised = Wgs84.to_ecef(Geodetic::new(0.0, 0.0, 1000.0)).unwrap();
        assert!((raised.x - surface.x - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_is_euclidean() {
        let a = DVec3::new(0.0, 0.0, 0.0);
        let b = DVec3::new(3.0, 4.0, 0.0);
        assert!((Wgs84.distance_m(a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_local_frame_is_orthonormal() {
        let matrix = Wgs84
            .local_to_world(Geodetic::new(121.5, 31.0, 50.0))
            .unwrap();
        let east = matrix.x_axis.truncate();
        let north = matrix.y_axis.truncate();
        let up = matrix.z_axis.truncate();

        assert!((east.length() - 1.0).abs() < 1e-12);
        assert!((north.length() - 1.0).abs() < 1e-12);
        assert!((up.length() - 1.0).abs() < 1e-12);
        assert!(east.dot(north).abs() < 1e-12);
        assert!(east.dot(up).abs() < 1e-12);
        assert!(north.dot(up).abs() < 1e-12);

        // Right-handed: east x north = up.
        assert!((east.cross(north) - up).length() < 1e-12);
    }

    #[test]
    fn test_local_frame_translation_matches_ecef() {
        let position = Geodetic::new(-70.0, 42.0, 120.0);
        let ecef = Wgs84.to_ecef(position).unwrap();
        let matrix = Wgs84.local_to_world(position).unwrap();
        assert!((matrix.w_axis.truncate() - ecef).length() < 1e-9);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let result = Wgs84.to_ecef(Geodetic::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(result, Err(GeodesyError::NonFiniteInput { .. })));

        let result = Wgs84.local_to_world(Geodetic::new(0.0, f64::INFINITY, 0.0));
        assert!(matches!(result, Err(GeodesyError::NonFiniteInput { .. })));
    }
}
