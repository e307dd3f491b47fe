use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::engine::EngineResult;
use crate::engine::config::AppConfig;
use crate::engine::frame_loop::{FrameLoop, FrameOutcome};
use crate::engine::graphics::renderer::SceneRenderer;
use crate::engine::hmd::HmdSession;
use crate::engine::scene::Scene;
use crate::engine::user_input::UserInput;

/// Builds a fresh session after a device loss.
pub type SessionFactory = Box<dyn FnMut() -> EngineResult<Box<dyn HmdSession>>>;

/// Minimal winit wrapper (2025 winit style: ApplicationHandler) owning the
/// mirror window and driving one frame per redraw.
pub struct Windowing;

impl Windowing {
    pub fn run_app(
        config: AppConfig,
        session: Box<dyn HmdSession>,
        renderer: Box<dyn SceneRenderer>,
        connect: SessionFactory,
    ) -> EngineResult<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let frame_loop = FrameLoop::new(&config);
        let mut app = App {
            window: None,
            config,
            session,
            renderer,
            connect,
            scene: Scene::room(),
            frame_loop,
            user_input: UserInput::new(),
        };

        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

struct App {
    window: Option<Arc<Window>>,
    config: AppConfig,
    session: Box<dyn HmdSession>,
    renderer: Box<dyn SceneRenderer>,
    connect: SessionFactory,
    scene: Scene,
    frame_loop: FrameLoop,
    user_input: UserInput,
}

impl App {
    /// Drop everything tied to the lost device, then rebuild the
    /// session-scoped state and re-enter the loop.
    fn reconnect(&mut self) -> bool {
        std::thread::sleep(Duration::from_millis(10));
        match (self.connect)() {
            Ok(session) => {
                self.session = session;
                self.scene = Scene::room();
                self.frame_loop = FrameLoop::new(&self.config);
                info!("session reconnected");
                true
            }
            Err(e) => {
                error!("failed to reconnect session: {e}");
                false
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs: WindowAttributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = event_loop
            .create_window(attrs)
            .expect("failed to create window");
        self.window = Some(Arc::new(window));

        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::KeyboardInput { .. } => {
                self.user_input.handle_window_event(&event);
            }

            WindowEvent::RedrawRequested => {
                let outcome = self.frame_loop.frame(
                    self.session.as_mut(),
                    self.renderer.as_mut(),
                    &mut self.scene,
                    self.user_input.state(),
                );
                self.user_input.begin_frame();

                match outcome {
                    FrameOutcome::Idle | FrameOutcome::Rendered => {}
                    FrameOutcome::QuitRequested => {
                        info!("session requested quit");
                        event_loop.exit();
                        return;
                    }
                    FrameOutcome::SubmitFailed { device_lost } => {
                        if device_lost {
                            warn!("device lost, reconnecting");
                        }
                        if !self.reconnect() {
                            event_loop.exit();
                            return;
                        }
                    }
                }

                if let Some(w) = &self.window {
                    w.pre_present_notify();
                    w.request_redraw();
                }
            }

            _ => {}
        }
    }
}
