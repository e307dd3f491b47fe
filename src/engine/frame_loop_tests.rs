#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::{Quat, Vec3};
    use winit::keyboard::KeyCode;

    use crate::engine::config::AppConfig;
    use crate::engine::frame_loop::{FrameLoop, FrameOutcome, LoopExit, run_session};
    use crate::engine::graphics::renderer::RecordingRenderer;
    use crate::engine::hmd::{Eye, SessionStatus, SimulatedHmd};
    use crate::engine::scene::{ModelTag, Scene};
    use crate::engine::user_input::InputState;

    fn config() -> AppConfig {
        AppConfig {
            rng_seed: Some(7),
            ..AppConfig::default()
        }
    }

    fn input_holding(keys: &[KeyCode]) -> InputState {
        let mut input = InputState::default();
        for key in keys {
            input.keys_down.insert(*key);
        }
        input
    }

    fn assert_vec3_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn visible_frame_renders_both_eyes_and_submits_once() {
        let mut session = SimulatedHmd::new();
        let mut renderer = RecordingRenderer::new();
        let mut scene = Scene::room();
        let mut frame_loop = FrameLoop::new(&config());

        let outcome = frame_loop.frame(
            &mut session,
            &mut renderer,
            &mut scene,
            &InputState::default(),
        );

        assert_eq!(outcome, FrameOutcome::Rendered);
        assert_eq!(renderer.targets_bound, 2);
        assert_eq!(renderer.draws.len(), 2);
        assert_eq!(renderer.draws[0].eye, Some(Eye::Left));
        assert_eq!(renderer.draws[1].eye, Some(Eye::Right));
        assert_eq!(session.eyes_committed(), 2);
        assert_eq!(session.frames_submitted(), 1);
        assert_eq!(renderer.mirror_presents, 1);
        assert_eq!(frame_loop.frame_index(), 1);
    }

    #[test]
    fn hidden_session_skips_rendering_but_presents_the_mirror() {
        let mut session = SimulatedHmd::new().script_status(SessionStatus {
            is_visible: false,
            ..SessionStatus::default()
        });
        let mut renderer = RecordingRenderer::new();
        let mut scene = Scene::room();
        let mut frame_loop = FrameLoop::new(&config());

        let outcome = frame_loop.frame(
            &mut session,
            &mut renderer,
            &mut scene,
            &InputState::default(),
        );

        assert_eq!(outcome, FrameOutcome::Idle);
        assert!(renderer.draws.is_empty());
        assert_eq!(renderer.mirror_presents, 1);
        assert_eq!(frame_loop.frame_index(), 0);
    }

    #[test]
    fn holding_w_advances_along_negative_z() {
        let mut session = SimulatedHmd::new();
        let mut renderer = RecordingRenderer::new();
        let mut scene = Scene::room();
        let mut frame_loop = FrameLoop::new(&config());
        let input = input_holding(&[KeyCode::KeyW]);

        frame_loop.frame(&mut session, &mut renderer, &mut scene, &input);
        assert_vec3_close(frame_loop.camera().position, Vec3::new(0.0, 0.0, -0.5));

        frame_loop.frame(&mut session, &mut renderer, &mut scene, &input);
        assert_vec3_close(frame_loop.camera().position, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn strafe_keys_move_along_x_and_opposing_keys_cancel() {
        let mut session = SimulatedHmd::new();
        let mut renderer = RecordingRenderer::new();
        let mut scene = Scene::room();
        let mut frame_loop = FrameLoop::new(&config());

        let input = input_holding(&[KeyCode::KeyD]);
        frame_loop.frame(&mut session, &mut renderer, &mut scene, &input);
        assert_vec3_close(frame_loop.camera().position, Vec3::new(0.5, 0.0, 0.0));

        let input = input_holding(&[KeyCode::KeyA, KeyCode::KeyD]);
        frame_loop.frame(&mut session, &mut renderer, &mut scene, &input);
        assert_vec3_close(frame_loop.camera().position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn movement_follows_the_head_orientation() {
        // Head yawed 90 degrees left: forward is -X in world space.
        let mut session =
            SimulatedHmd::new().with_head_orientation(Quat::from_rotation_y(FRAC_PI_2));
        let mut renderer = RecordingRenderer::new();
        let mut scene = Scene::room();
        let mut frame_loop = FrameLoop::new(&config());
        let input = input_holding(&[KeyCode::KeyW]);

        frame_loop.frame(&mut session, &mut renderer, &mut scene, &input);

        assert_vec3_close(frame_loop.camera().position, Vec3::new(-0.5, 0.0, 0.0));
    }

    #[test]
    fn recenter_is_delegated_without_disturbing_local_state() {
        let mut session = SimulatedHmd::new().script_status(SessionStatus {
            is_visible: true,
            should_recenter: true,
            ..SessionStatus::default()
        });
        let mut renderer = RecordingRenderer::new();
        let mut scene = Scene::room();
        let mut frame_loop = FrameLoop::new(&config());

        let outcome = frame_loop.frame(
            &mut session,
            &mut renderer,
            &mut scene,
            &InputState::default(),
        );

        assert_eq!(outcome, FrameOutcome::Rendered);
        assert_eq!(session.recenter_count(), 1);
        assert_vec3_close(frame_loop.camera().position, Vec3::ZERO);
    }

    #[test]
    fn indicator_models_track_the_head_orientation() {
        let mut session =
            SimulatedHmd::new().with_head_orientation(Quat::from_rotation_y(30f32.to_radians()));
        let mut renderer = RecordingRenderer::new();
        let mut scene = Scene::room();
        let mut frame_loop = FrameLoop::new(&config());

        frame_loop.frame(
            &mut session,
            &mut renderer,
            &mut scene,
            &InputState::default(),
        );

        let cube = scene.tagged(ModelTag::IndicatorCube).unwrap();
        assert_vec3_close(cube.position, Vec3::new(-3.0, 0.0, -10.0));

        // Yaw 30 is inside the gaze limit: phi = 120 degrees on the
        // radius-4 sphere.
        let marker = scene.tagged(ModelTag::GazeMarker).unwrap();
        assert_vec3_close(marker.position, Vec3::new(-2.0, 0.0, -3.4641));
    }

    #[test]
    fn tiles_stream_in_as_the_camera_walks() {
        // Head yawed 90 degrees right: forward is +X, straight across the
        // tile boundaries.
        let mut session =
            SimulatedHmd::new().with_head_orientation(Quat::from_rotation_y(-FRAC_PI_2));
        let mut renderer = RecordingRenderer::new();
        let mut scene = Scene::room();
        let mut frame_loop = FrameLoop::new(&config());
        let input = input_holding(&[KeyCode::KeyW]);

        let room_models = scene.len();

        for _ in 0..25 {
            frame_loop.frame(&mut session, &mut renderer, &mut scene, &input);
        }
        assert_eq!(frame_loop.streamer().current_tile().x, 1);
        assert_eq!(frame_loop.streamer().generated_count(), 9);
        assert_eq!(scene.len(), room_models + 9);

        for _ in 0..40 {
            frame_loop.frame(&mut session, &mut renderer, &mut scene, &input);
        }
        assert_eq!(frame_loop.streamer().current_tile().x, 2);
        assert_eq!(frame_loop.streamer().generated_count(), 12);
        assert_eq!(scene.len(), room_models + 12);
    }

    #[test]
    fn quit_request_clears_the_retry_flag() {
        let mut session = SimulatedHmd::new().script_status(SessionStatus {
            should_quit: true,
            ..SessionStatus::default()
        });
        let mut renderer = RecordingRenderer::new();

        let exit = run_session(
            &config(),
            &mut session,
            &mut renderer,
            &InputState::default(),
            true,
            None,
        );

        assert_eq!(exit, LoopExit { retry: false });
        assert!(renderer.draws.is_empty());
    }

    #[test]
    fn device_lost_forces_retry_even_when_not_requested() {
        let mut session = SimulatedHmd::new().fail_submit_at(3);
        let mut renderer = RecordingRenderer::new();

        let exit = run_session(
            &config(),
            &mut session,
            &mut renderer,
            &InputState::default(),
            false,
            Some(100),
        );

        assert_eq!(exit, LoopExit { retry: true });
        // Three good frames, then the failing one rendered but never
        // submitted.
        assert_eq!(session.frames_submitted(), 3);
        assert_eq!(renderer.draws.len(), 8);
    }

    #[test]
    fn frame_budget_ends_the_run_without_retry() {
        let mut session = SimulatedHmd::new();
        let mut renderer = RecordingRenderer::new();

        let exit = run_session(
            &config(),
            &mut session,
            &mut renderer,
            &InputState::default(),
            true,
            Some(5),
        );

        assert_eq!(exit, LoopExit { retry: false });
        assert_eq!(session.frames_submitted(), 5);
        assert_eq!(renderer.draws.len(), 10);
    }
}
