//! Head-orientation cosmetics: Euler extraction and the two marker
//! placements driven by it.

use glam::{Quat, Vec3};

/// Pitch/yaw/roll in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerDegrees {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Yaw range the gaze marker tracks before pinning to the edge.
pub const GAZE_YAW_LIMIT_DEG: f64 = 60.0;

/// Radius of the sphere the gaze marker sits on.
pub const GAZE_SPHERE_RADIUS: f64 = 4.0;

/// Distance of the indicator cube ahead of the viewer.
const INDICATOR_CUBE_DEPTH: f32 = -10.0;

/// Closed-form Euler extraction from a unit quaternion (w, x, y, z).
///
/// Pitch looks up at +90 and down at -90; yaw is +90 at full left.
/// Near +-90 degrees of pitch the yaw/roll terms degenerate (gimbal
/// lock); the outputs only place decorative models.
pub fn euler_from_quat(q: Quat) -> EulerDegrees {
    let w = q.w as f64;
    let x = q.x as f64;
    let y = q.y as f64;
    let z = q.z as f64;

    let sqw = w * w;
    let sqx = x * x;
    let sqy = y * y;
    let sqz = z * z;

    let yaw = (-2.0 * (x * z - y * w)).asin().to_degrees();
    let roll = (2.0 * (x * y + z * w))
        .atan2(sqx - sqy - sqz + sqw)
        .to_degrees();
    let pitch = (2.0 * (y * z + x * w))
        .atan2(-sqx - sqy + sqz + sqw)
        .to_degrees();

    EulerDegrees { pitch, yaw, roll }
}

/// Cube position mirroring the head: yaw pans it, pitch lifts it, depth is
/// fixed. Uses the unclamped yaw.
pub fn indicator_cube_position(euler: &EulerDegrees) -> Vec3 {
    Vec3::new(
        (-euler.yaw / 10.0) as f32,
        (euler.pitch / 10.0) as f32,
        INDICATOR_CUBE_DEPTH,
    )
}

/// Clamps yaw to the gaze marker's tracked range.
pub fn clamp_gaze_yaw(yaw: f64) -> f64 {
    yaw.clamp(-GAZE_YAW_LIMIT_DEG, GAZE_YAW_LIMIT_DEG)
}

/// Spherical placement of the gaze marker from clamped yaw and unclamped
/// pitch.
pub fn gaze_marker_position(euler: &EulerDegrees) -> Vec3 {
    let yaw = clamp_gaze_yaw(euler.yaw);

    let phi = (yaw + 90.0).to_radians();
    let theta = (90.0 - euler.pitch).to_radians();

    let r = GAZE_SPHERE_RADIUS;
    Vec3::new(
        (r * theta.sin() * phi.cos()) as f32,
        (r * theta.cos()) as f32,
        (-r * theta.sin() * phi.sin()) as f32,
    )
}
