pub mod camera;
pub mod cli;
pub mod config;
pub mod frame_loop;
pub mod graphics;
pub mod hmd;
pub mod orientation;
pub mod scene;
pub mod tiles;
pub mod user_input;
pub mod windowing;

#[cfg(test)]
mod frame_loop_tests;
#[cfg(test)]
mod tiles_tests;

use thiserror::Error;

/// Engine-level error type.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("window system error: {0}")]
    Window(#[from] winit::error::EventLoopError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HMD runtime error: {0}")]
    Device(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
