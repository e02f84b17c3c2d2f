//! Attitude math: heading/pitch/roll Euler angles to rotations.

use glam::{DMat4, DQuat, DVec3};

use geoscope_core::types::Attitude;

/// Convert heading/pitch/roll (degrees) to a quaternion.
/// Composition order: roll around X, then pitch around Y, then heading
/// around Z, matching the local east/north/up frame convention.
pub fn euler_to_quat(attitude: Attitude) -> DQuat {
    let heading = DQuat::from_axis_angle(DVec3::Z, attitude.heading_deg.to_radians());
    let pitch = DQuat::from_axis_angle(DVec3::Y, attitude.pitch_deg.to_radians());
    let roll = DQuat::from_axis_angle(DVec3::X, attitude.roll_deg.to_radians());
    heading * pitch * roll
}

/// Rotation matrix for an attitude.
pub fn rotation_matrix(attitude: Attitude) -> DMat4 {
    DMat4::from_quat(euler_to_quat(attitude))
}

/// Local rotation + uniform scale transform (scale applied first).
pub fn local_transform(attitude: Attitude, scale: f64) -> DMat4 {
    rotation_matrix(attitude) * DMat4::from_scale(DVec3::splat(scale))
}

/// Normalize an angle in degrees to the [-180, 180] range.
pub fn normalize_angle_deg(mut angle_deg: f64) -> f64 {
    angle_deg %= 360.0;
    if angle_deg > 180.0 {
        angle_deg -= 360.0;
    } else if angle_deg < -180.0 {
        angle_deg += 360.0;
    }
    angle_deg
}

/// Signed angular difference `to - from` in degrees, in [-180, 180].
pub fn angle_difference_deg(from_deg: f64, to_deg: f64) -> f64 {
    normalize_angle_deg(to_deg - from_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_attitude() {
        let quat = euler_to_quat(Attitude::default());
        assert!((quat.w - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_heading_rotates_about_z() {
        let quat = euler_to_quat(Attitude::new(90.0, 0.0, 0.0));
        let rotated = quat * DVec3::X;
        assert!((rotated - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_roll_applied_before_heading() {
        // Roll 90 about X takes Y to Z; heading 90 about Z then leaves Z fixed.
        let quat = euler_to_quat(Attitude::new(90.0, 0.0, 90.0));
        let rotated = quat * DVec3::Y;
        assert!((rotated - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_local_transform_scales_then_rotates() {
        let matrix = local_transform(Attitude::new(90.0, 0.0, 0.0), 2.0);
        let moved = matrix.transform_point3(DVec3::X);
        assert!((moved - DVec3::Y * 2.0).length() < 1e-12);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle_deg(0.0), 0.0);
        assert_eq!(normalize_angle_deg(180.0), 180.0);
        assert_eq!(normalize_angle_deg(190.0), -170.0);
        assert_eq!(normalize_angle_deg(-190.0), 170.0);
        assert_eq!(normalize_angle_deg(720.0), 0.0);
        assert_eq!(normalize_angle_deg(359.0), -1.0);
    }

    #[test]
    fn test_angle_difference() {
        assert_eq!(angle_difference_deg(350.0, 10.0), 20.0);
        assert_eq!(angle_difference_deg(10.0, 350.0), -20.0);
        assert_eq!(angle_difference_deg(0.0, 180.0), 180.0);
    }
}
