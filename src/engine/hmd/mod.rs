//! HMD subsystem — the device-side collaborator behind the frame loop.
//!
//! The frame loop never talks to a vendor runtime directly; it drives an
//! injected [`HmdSession`]. Provides:
//! - `sim`: deterministic simulated session (always available)
//! - `openxr_runtime`: OpenXR runtime/HMD discovery (gated behind the
//!   `openxr` feature)

use glam::{Quat, Vec3};
use tracing::info;

use crate::engine::EngineResult;

pub mod sim;

#[cfg(feature = "openxr")]
pub mod openxr_runtime;

pub use sim::SimulatedHmd;

/// Left/right eye selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    pub fn index(self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }
}

/// A rigid pose: position + orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };
}

/// Per-eye field of view as half-angles in radians.
///
/// Sign convention: `angle_left` and `angle_down` are negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fov {
    pub angle_left: f32,
    pub angle_right: f32,
    pub angle_up: f32,
    pub angle_down: f32,
}

/// Render-target sub-rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Session flags polled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub is_visible: bool,
    pub should_quit: bool,
    pub should_recenter: bool,
}

/// Everything needed to render one eye this frame.
#[derive(Debug, Clone, Copy)]
pub struct EyeRenderDesc {
    pub fov: Fov,
    pub hmd_to_eye_offset: Vec3,
    pub viewport: Viewport,
}

/// One eye's contribution to a composited layer.
#[derive(Debug, Clone, Copy)]
pub struct EyeLayer {
    pub viewport: Viewport,
    pub fov: Fov,
    pub pose: Pose,
}

/// A full stereo layer handed to the compositor.
#[derive(Debug, Clone, Copy)]
pub struct StereoLayer {
    pub eyes: [EyeLayer; 2],
    pub sensor_sample_time: f64,
}

/// Frame-submission failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The device went away; the caller must tear down and reconnect.
    DeviceLost,
    Runtime(String),
}

/// Device-context object injected into the frame loop.
///
/// One implementor per runtime. The loop owns the session for the lifetime
/// of one run and drops it on exit, including the device-lost path.
pub trait HmdSession {
    fn status(&mut self) -> SessionStatus;

    /// Reset the tracking origin to the current head pose.
    fn recenter_tracking_origin(&mut self);

    /// Queried every frame: the eye offsets can change at runtime
    /// (IPD adjustment).
    fn eye_render_descs(&mut self) -> [EyeRenderDesc; 2];

    /// Predicted poses for both eyes at the display time of `frame_index`,
    /// with the eye offsets applied, plus the sensor sample time that is
    /// fed back into the layer at submission.
    fn predicted_eye_poses(&mut self, frame_index: i64, offsets: [Vec3; 2]) -> ([Pose; 2], f64);

    /// Commit the eye's swap-chain texture after rendering into it.
    fn commit_eye(&mut self, eye: Eye);

    /// Hand the composed frame to the compositor.
    fn submit_frame(&mut self, frame_index: i64, layer: &StereoLayer) -> Result<(), SubmitError>;
}

/// Connect to the best available session.
///
/// With the `openxr` feature enabled, the runtime and HMD are discovered
/// first and their parameters size the session; creating a rendering
/// session against the runtime additionally requires a graphics binding,
/// which lives behind the `SceneRenderer` seam.
pub fn connect() -> EngineResult<Box<dyn HmdSession>> {
    #[cfg(feature = "openxr")]
    {
        match openxr_runtime::discover() {
            Ok(Some(hmd)) => {
                return Ok(Box::new(SimulatedHmd::new().with_eye_size(
                    hmd.recommended_width as i32,
                    hmd.recommended_height as i32,
                )));
            }
            Ok(None) => info!("no OpenXR runtime or HMD available, using simulated session"),
            Err(e) => info!("OpenXR discovery failed ({e}), using simulated session"),
        }
    }

    #[cfg(not(feature = "openxr"))]
    info!("compiled without the openxr feature, using simulated session");

    Ok(Box::new(SimulatedHmd::new()))
}
