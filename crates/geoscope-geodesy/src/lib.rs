//! Geodesy service: WGS84 ellipsoid conversions and attitude math.
//!
//! The engine treats this as a stateless pure service injected at
//! construction: geodetic coordinates in, ECEF placements and distances
//! out. No global singleton; build one `Wgs84` and share it by reference.

pub mod attitude;
pub mod ellipsoid;

pub use ellipsoid::{Geodesy, GeodesyError, Wgs84};
