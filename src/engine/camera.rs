use glam::{Mat4, Quat, Vec3};

use crate::engine::hmd::{Fov, Pose};

/// Camera pose in world space.
///
/// Mutated by keyboard movement each frame; created at session start and
/// dropped with the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Camera {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Camera composed with a tracked eye pose: the eye position is rotated
    /// into camera space and the eye orientation applies first.
    pub fn with_eye(&self, eye: &Pose) -> Camera {
        Camera {
            position: self.position + self.orientation * eye.position,
            orientation: self.orientation * eye.orientation,
        }
    }

    /// Inverse of the camera's rigid transform.
    ///
    /// Assumptions:
    /// - Column-major mat4, right-handed, camera forward is -Z.
    /// - Pairs with `projection_from_fov` (NDC depth in [0, 1]).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Asymmetric-frustum projection from per-eye fov half-angles.
///
/// Right-handed, NDC depth in [0, 1]. The fov follows the usual sign
/// convention (left/down negative), so `tan_right - tan_left` spans the
/// full horizontal tangent width.
pub fn projection_from_fov(fov: &Fov, z_near: f32, z_far: f32) -> Mat4 {
    let tan_left = fov.angle_left.tan();
    let tan_right = fov.angle_right.tan();
    let tan_up = fov.angle_up.tan();
    let tan_down = fov.angle_down.tan();

    let width = tan_right - tan_left;
    let height = tan_up - tan_down;

    // Column-major:
    // [ 2/w, 0,   (r+l)/w,            0              ]
    // [ 0,   2/h, (u+d)/h,            0              ]
    // [ 0,   0,   -f/(f-n),           -f*n/(f-n)     ]
    // [ 0,   0,   -1,                 0              ]
    Mat4::from_cols_array(&[
        2.0 / width,
        0.0,
        0.0,
        0.0,
        0.0,
        2.0 / height,
        0.0,
        0.0,
        (tan_right + tan_left) / width,
        (tan_up + tan_down) / height,
        -z_far / (z_far - z_near),
        -1.0,
        0.0,
        0.0,
        -(z_far * z_near) / (z_far - z_near),
        0.0,
    ])
}
