//! Run configuration.
//!
//! Everything has a baked-in default; an optional JSON file overrides
//! individual fields.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::engine::tiles::TexturePolicy;
use crate::engine::{EngineError, EngineResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "little-room".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ClipPlanes {
    pub near: f32,
    pub far: f32,
}

impl Default for ClipPlanes {
    fn default() -> Self {
        Self {
            near: 0.2,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    /// World units moved per frame while a movement key is held.
    pub move_step: f32,
    pub clip: ClipPlanes,
    pub tile_textures: TexturePolicy,
    /// Seed for texture-variant selection; OS entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            move_step: 0.5,
            clip: ClipPlanes::default(),
            tile_textures: TexturePolicy::default(),
            rng_seed: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> EngineResult<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))
    }
}
