//! Simulated HMD session — deterministic stand-in used when no runtime is
//! connected, by headless runs, and by tests.

use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_4;

use glam::{Quat, Vec3};
use tracing::debug;

use super::{
    Eye, EyeRenderDesc, Fov, HmdSession, Pose, SessionStatus, StereoLayer, SubmitError, Viewport,
};

/// Simulated stereo session.
///
/// Defaults: always visible, identity head pose, symmetric 90-degree fov,
/// 1344x1600 per-eye targets, 64 mm IPD, submissions always succeed.
/// Everything interesting is scriptable through the builder methods.
pub struct SimulatedHmd {
    eye_size: (i32, i32),
    fov: Fov,
    ipd: f32,
    head: Pose,
    animate_head: bool,
    scripted_status: VecDeque<SessionStatus>,
    fail_submit_at: Option<i64>,
    frames_submitted: u64,
    eyes_committed: u64,
    recenter_count: u32,
}

impl SimulatedHmd {
    pub fn new() -> Self {
        Self {
            eye_size: (1344, 1600),
            fov: Fov {
                angle_left: -FRAC_PI_4,
                angle_right: FRAC_PI_4,
                angle_up: FRAC_PI_4,
                angle_down: -FRAC_PI_4,
            },
            ipd: 0.064,
            head: Pose::IDENTITY,
            animate_head: false,
            scripted_status: VecDeque::new(),
            fail_submit_at: None,
            frames_submitted: 0,
            eyes_committed: 0,
            recenter_count: 0,
        }
    }

    pub fn with_eye_size(mut self, width: i32, height: i32) -> Self {
        self.eye_size = (width, height);
        self
    }

    pub fn with_head_orientation(mut self, orientation: Quat) -> Self {
        self.head.orientation = orientation;
        self
    }

    /// Head sweeps a gentle yaw/pitch curve instead of staying at identity.
    pub fn with_head_animation(mut self) -> Self {
        self.animate_head = true;
        self
    }

    /// Queue a status for the next `status()` poll. Once the queue drains,
    /// polls return the default visible status.
    pub fn script_status(mut self, status: SessionStatus) -> Self {
        self.scripted_status.push_back(status);
        self
    }

    /// Make submissions with `frame_index >= frame` report a lost device.
    pub fn fail_submit_at(mut self, frame: i64) -> Self {
        self.fail_submit_at = Some(frame);
        self
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    pub fn eyes_committed(&self) -> u64 {
        self.eyes_committed
    }

    pub fn recenter_count(&self) -> u32 {
        self.recenter_count
    }

    fn head_orientation_at(&self, frame_index: i64) -> Quat {
        if !self.animate_head {
            return self.head.orientation;
        }
        let t = frame_index as f32 * 0.01;
        Quat::from_rotation_y(t.sin() * 0.5) * Quat::from_rotation_x((t * 0.7).cos() * 0.2)
    }
}

impl Default for SimulatedHmd {
    fn default() -> Self {
        Self::new()
    }
}

impl HmdSession for SimulatedHmd {
    fn status(&mut self) -> SessionStatus {
        self.scripted_status.pop_front().unwrap_or(SessionStatus {
            is_visible: true,
            should_quit: false,
            should_recenter: false,
        })
    }

    fn recenter_tracking_origin(&mut self) {
        self.recenter_count += 1;
        debug!("tracking origin recentered");
    }

    fn eye_render_descs(&mut self) -> [EyeRenderDesc; 2] {
        let (width, height) = self.eye_size;
        let viewport = Viewport {
            x: 0,
            y: 0,
            width,
            height,
        };
        let half_ipd = self.ipd / 2.0;

        [
            EyeRenderDesc {
                fov: self.fov,
                hmd_to_eye_offset: Vec3::new(-half_ipd, 0.0, 0.0),
                viewport,
            },
            EyeRenderDesc {
                fov: self.fov,
                hmd_to_eye_offset: Vec3::new(half_ipd, 0.0, 0.0),
                viewport,
            },
        ]
    }

    fn predicted_eye_poses(&mut self, frame_index: i64, offsets: [Vec3; 2]) -> ([Pose; 2], f64) {
        let orientation = self.head_orientation_at(frame_index);
        let poses = offsets.map(|offset| Pose {
            position: self.head.position + orientation * offset,
            orientation,
        });

        // Sample time advances at the simulated 90 Hz display rate.
        (poses, frame_index as f64 / 90.0)
    }

    fn commit_eye(&mut self, _eye: Eye) {
        self.eyes_committed += 1;
    }

    fn submit_frame(&mut self, frame_index: i64, _layer: &StereoLayer) -> Result<(), SubmitError> {
        if let Some(fail_at) = self.fail_submit_at {
            if frame_index >= fail_at {
                return Err(SubmitError::DeviceLost);
            }
        }
        self.frames_submitted += 1;
        Ok(())
    }
}
