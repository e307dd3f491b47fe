use glam::Mat4;

use crate::engine::hmd::{Eye, Viewport};
use crate::engine::scene::Scene;

/// Graphics-side collaborator driven by the frame loop.
///
/// The loop binds one eye target at a time, renders the scene once per eye,
/// and presents the mirror window after submission.
pub trait SceneRenderer {
    /// Bind and clear the render target for one eye.
    fn set_and_clear_eye_target(&mut self, eye: Eye, viewport: Viewport);

    /// Draw every model with the combined view-projection matrix.
    ///
    /// `color_scale` multiplies the output color; `standard_uniforms`
    /// selects the default uniform layout.
    fn render_scene(
        &mut self,
        scene: &Scene,
        view_proj: Mat4,
        color_scale: [f32; 4],
        standard_uniforms: bool,
    );

    /// Copy the latest composited frame into the mirror window.
    fn present_mirror(&mut self) {}
}

/// One recorded `render_scene` call.
#[derive(Debug, Clone, Copy)]
pub struct DrawRecord {
    pub eye: Option<Eye>,
    pub viewport: Option<Viewport>,
    pub model_count: usize,
    pub view_proj: Mat4,
}

/// Records the draw stream instead of touching a GPU.
///
/// Keeps a real backend's control flow (target bind -> scene draws ->
/// mirror present) so the frame loop can be exercised headless and in
/// tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    current_eye: Option<Eye>,
    current_viewport: Option<Viewport>,
    pub draws: Vec<DrawRecord>,
    pub targets_bound: usize,
    pub mirror_presents: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.current_eye = None;
        self.current_viewport = None;
        self.draws.clear();
        self.targets_bound = 0;
        self.mirror_presents = 0;
    }
}

impl SceneRenderer for RecordingRenderer {
    fn set_and_clear_eye_target(&mut self, eye: Eye, viewport: Viewport) {
        self.current_eye = Some(eye);
        self.current_viewport = Some(viewport);
        self.targets_bound += 1;
    }

    fn render_scene(
        &mut self,
        scene: &Scene,
        view_proj: Mat4,
        _color_scale: [f32; 4],
        _standard_uniforms: bool,
    ) {
        self.draws.push(DrawRecord {
            eye: self.current_eye,
            viewport: self.current_viewport,
            model_count: scene.len(),
            view_proj,
        });
    }

    fn present_mirror(&mut self) {
        self.mirror_presents += 1;
    }
}
