//! The per-frame control loop.
//!
//! One `FrameLoop` owns the state that lives for a single session run:
//! camera, tile streamer, frame counter. The HMD session and renderer are
//! injected; the scene is owned by the caller alongside the loop, and all
//! of it is rebuilt when a lost device forces a retry.

use std::time::Duration;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::engine::EngineResult;
use crate::engine::camera::{Camera, projection_from_fov};
use crate::engine::config::AppConfig;
use crate::engine::graphics::renderer::{RecordingRenderer, SceneRenderer};
use crate::engine::hmd::{self, Eye, EyeLayer, HmdSession, StereoLayer, SubmitError};
use crate::engine::orientation::{euler_from_quat, gaze_marker_position, indicator_cube_position};
use crate::engine::scene::{ModelTag, Scene};
use crate::engine::tiles::TileStreamer;
use crate::engine::user_input::InputState;

/// Pause between session retries after a lost device.
const RETRY_DELAY: Duration = Duration::from_millis(10);

/// What a single frame step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Session not visible; nothing rendered.
    Idle,
    /// Full render + submit.
    Rendered,
    /// The session asked the application to quit.
    QuitRequested,
    /// Frame submission failed; `device_lost` distinguishes a lost device
    /// from other runtime failures.
    SubmitFailed { device_lost: bool },
}

/// How a session run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopExit {
    /// Tear everything down and run a new session.
    pub retry: bool,
}

pub struct FrameLoop {
    camera: Camera,
    streamer: TileStreamer,
    rng: StdRng,
    frame_index: i64,
    config: AppConfig,
}

impl FrameLoop {
    pub fn new(config: &AppConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            camera: Camera::default(),
            streamer: TileStreamer::new(),
            rng,
            frame_index: 0,
            config: config.clone(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn streamer(&self) -> &TileStreamer {
        &self.streamer
    }

    pub fn frame_index(&self) -> i64 {
        self.frame_index
    }

    /// Advance one frame.
    pub fn frame(
        &mut self,
        session: &mut dyn HmdSession,
        renderer: &mut dyn SceneRenderer,
        scene: &mut Scene,
        input: &InputState,
    ) -> FrameOutcome {
        let status = session.status();
        if status.should_quit {
            return FrameOutcome::QuitRequested;
        }
        if status.should_recenter {
            session.recenter_tracking_origin();
        }
        if !status.is_visible {
            renderer.present_mirror();
            return FrameOutcome::Idle;
        }

        // Refreshed every frame: the eye offsets can change at runtime
        // (IPD adjustment).
        let descs = session.eye_render_descs();
        let offsets = [descs[0].hmd_to_eye_offset, descs[1].hmd_to_eye_offset];
        let (eye_poses, sensor_sample_time) =
            session.predicted_eye_poses(self.frame_index, offsets);

        let head_orientation = eye_poses[Eye::Left.index()].orientation;

        // Keyboard translation in head space.
        let axes = input.movement_axes();
        let step = self.config.move_step;
        let forward = head_orientation * Vec3::new(0.0, 0.0, -step);
        let right = head_orientation * Vec3::new(step, 0.0, 0.0);
        self.camera.position += forward * axes.advance + right * axes.strafe;

        self.streamer.step(
            self.camera.position.x,
            scene,
            &self.config.tile_textures,
            &mut self.rng,
        );

        // Decorative models tracking the head.
        let euler = euler_from_quat(head_orientation);
        scene.set_tagged_position(ModelTag::IndicatorCube, indicator_cube_position(&euler));
        scene.set_tagged_position(ModelTag::GazeMarker, gaze_marker_position(&euler));

        for eye in Eye::BOTH {
            let i = eye.index();
            renderer.set_and_clear_eye_target(eye, descs[i].viewport);

            let eye_camera = self.camera.with_eye(&eye_poses[i]);
            let view = eye_camera.view_matrix();
            let proj = projection_from_fov(&descs[i].fov, self.config.clip.near, self.config.clip.far);
            renderer.render_scene(scene, proj * view, [1.0, 1.0, 1.0, 1.0], true);

            session.commit_eye(eye);
        }

        let layer = StereoLayer {
            eyes: [0usize, 1].map(|i| EyeLayer {
                viewport: descs[i].viewport,
                fov: descs[i].fov,
                pose: eye_poses[i],
            }),
            sensor_sample_time,
        };

        if let Err(e) = session.submit_frame(self.frame_index, &layer) {
            let device_lost = e == SubmitError::DeviceLost;
            warn!("frame submission failed: {e:?}");
            return FrameOutcome::SubmitFailed { device_lost };
        }

        self.frame_index += 1;
        renderer.present_mirror();
        FrameOutcome::Rendered
    }
}

/// Run one session to completion.
///
/// Owns the session-scoped state (scene + frame loop), which is built on
/// entry and dropped on every exit path. `retry_requested` is the caller's
/// standing request to retry; a lost device forces `retry` regardless.
/// `max_frames` bounds the run (headless and tests); `None` runs until the
/// session quits or fails.
pub fn run_session(
    config: &AppConfig,
    session: &mut dyn HmdSession,
    renderer: &mut dyn SceneRenderer,
    input: &InputState,
    retry_requested: bool,
    max_frames: Option<u64>,
) -> LoopExit {
    let mut scene = Scene::room();
    let mut frame_loop = FrameLoop::new(config);
    let mut iterations: u64 = 0;

    loop {
        if let Some(cap) = max_frames {
            if iterations >= cap {
                return LoopExit { retry: false };
            }
        }
        iterations += 1;

        match frame_loop.frame(session, renderer, &mut scene, input) {
            FrameOutcome::Idle | FrameOutcome::Rendered => {}
            FrameOutcome::QuitRequested => return LoopExit { retry: false },
            FrameOutcome::SubmitFailed { device_lost } => {
                return LoopExit {
                    retry: retry_requested || device_lost,
                };
            }
        }
    }
}

/// Drive the loop without a window: simulated input, recording renderer.
///
/// Mirrors the windowed driver's retry behavior, bounded by `max_frames`
/// per session so runs terminate.
pub fn run_headless(config: &AppConfig, max_frames: u64) -> EngineResult<()> {
    let input = InputState::default();

    loop {
        let mut session = hmd::connect()?;
        let mut renderer = RecordingRenderer::new();

        let exit = run_session(
            config,
            session.as_mut(),
            &mut renderer,
            &input,
            true,
            Some(max_frames),
        );

        info!(
            "session ended after {} draw call(s), retry={}",
            renderer.draws.len(),
            exit.retry
        );

        if !exit.retry {
            return Ok(());
        }
        std::thread::sleep(RETRY_DELAY);
    }
}
