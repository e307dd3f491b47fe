//! Input handling (winit -> engine state).
//!
//! Goal: keep `Windowing` focused on window lifecycle + frame driving, while
//! `UserInput` owns interpreting window events into a small, reusable
//! `InputState` the frame loop can query by key code.

use std::collections::HashSet;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Movement intent derived from the held movement keys.
///
/// Both axes are -1, 0, or +1; opposing keys cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveAxes {
    /// +1 forward (W / Up), -1 backward (S / Down).
    pub advance: f32,
    /// +1 right (D), -1 left (A).
    pub strafe: f32,
}

/// Snapshot of keyboard state.
///
/// Tracks current key state (`down`) and per-frame transitions
/// (`pressed`/`released`), keyed by physical key code so layout changes
/// don't move the movement cluster.
#[derive(Default, Debug, Clone)]
pub struct InputState {
    pub keys_down: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,
}

impl InputState {
    /// Clears per-frame transition state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    #[inline]
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    #[inline]
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Movement axes from the held WASD / arrow keys.
    pub fn movement_axes(&self) -> MoveAxes {
        let forward = self.key_down(KeyCode::KeyW) || self.key_down(KeyCode::ArrowUp);
        let backward = self.key_down(KeyCode::KeyS) || self.key_down(KeyCode::ArrowDown);
        let right = self.key_down(KeyCode::KeyD);
        let left = self.key_down(KeyCode::KeyA);

        MoveAxes {
            advance: (forward as i32 - backward as i32) as f32,
            strafe: (right as i32 - left as i32) as f32,
        }
    }
}

/// Stateful input event processor.
#[derive(Default, Debug, Clone)]
pub struct UserInput {
    state: InputState,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn begin_frame(&mut self) {
        self.state.begin_frame();
    }

    /// Feed a winit event into this input handler.
    ///
    /// Returns `true` if the event was recognized/consumed as input.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return false;
                };
                match event.state {
                    ElementState::Pressed => {
                        let was_down = self.state.keys_down.contains(&code);
                        self.state.keys_down.insert(code);
                        if !was_down {
                            self.state.keys_pressed.insert(code);
                        }
                    }
                    ElementState::Released => {
                        self.state.keys_down.remove(&code);
                        self.state.keys_released.insert(code);
                    }
                }
                true
            }

            _ => false,
        }
    }
}
