//! Lazy floor-tile streaming.
//!
//! The world is divided into 20-unit square tiles along X/Z. As the camera
//! crosses out of the current tile's band, every not-yet-generated tile in
//! the 3x3 neighborhood of the new current tile gets one floor slab added
//! to the scene.
//!
//! Contract:
//! - `step` moves the current tile index at most one step per call.
//! - A tile's generated flag is set exactly once and never reset, so
//!   re-entering a neighborhood emits no duplicate models.
//! - Coordinates are signed and unbounded (sparse set, no fixed extent).

use std::collections::HashSet;

use glam::Vec3;
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::engine::graphics::mesh::MeshFactory;
use crate::engine::graphics::texture::TexturePattern;
use crate::engine::scene::{Model, Scene};

/// Side length of one world tile.
pub const TILE_EXTENT: f32 = 20.0;

/// Floor slab tint (ARGB).
const FLOOR_COLOR: u32 = 0xff40_4040;

/// Signed tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i32,
    pub z: i32,
}

/// Half-open texture-variant range `[base, base + count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VariantRange {
    pub base: u32,
    pub count: u32,
}

impl VariantRange {
    fn pick<R: Rng>(&self, rng: &mut R) -> u32 {
        self.base + rng.random_range(0..self.count.max(1))
    }
}

/// Which texture variants floor tiles get, per crossing direction.
///
/// The two sides differ by default; the ranges are data, not a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TexturePolicy {
    /// Used when the camera crosses toward negative X.
    pub negative_x: VariantRange,
    /// Used when the camera crosses toward positive X.
    pub positive_x: VariantRange,
}

impl Default for TexturePolicy {
    fn default() -> Self {
        Self {
            negative_x: VariantRange { base: 6, count: 1 },
            positive_x: VariantRange { base: 1, count: 6 },
        }
    }
}

/// Streams floor tiles in as the camera wanders along X.
#[derive(Debug, Default)]
pub struct TileStreamer {
    curr_x: i32,
    /// Movement is tracked along X only; the Z index stays put.
    curr_z: i32,
    generated: HashSet<TileCoord>,
}

impl TileStreamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tile(&self) -> TileCoord {
        TileCoord {
            x: self.curr_x,
            z: self.curr_z,
        }
    }

    pub fn is_generated(&self, coord: TileCoord) -> bool {
        self.generated.contains(&coord)
    }

    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    /// Advances the current tile index by at most one step based on the
    /// camera's world X, generating the new 3x3 neighborhood on a
    /// crossing.
    ///
    /// The bands overlap by half a tile on each side (`curr_x*20 +- 10`),
    /// so small oscillations near a boundary don't re-trigger. Returns the
    /// number of floor models emitted.
    pub fn step<R: Rng>(
        &mut self,
        camera_x: f32,
        scene: &mut Scene,
        policy: &TexturePolicy,
        rng: &mut R,
    ) -> usize {
        let center = self.curr_x as f32 * TILE_EXTENT;
        let half = TILE_EXTENT / 2.0;

        if camera_x < center - half {
            self.curr_x -= 1;
            self.generate_neighborhood(scene, policy.negative_x, rng)
        } else if camera_x > center + half {
            self.curr_x += 1;
            self.generate_neighborhood(scene, policy.positive_x, rng)
        } else {
            0
        }
    }

    fn generate_neighborhood<R: Rng>(
        &mut self,
        scene: &mut Scene,
        variants: VariantRange,
        rng: &mut R,
    ) -> usize {
        let mut emitted = 0;
        for i in self.curr_x - 1..=self.curr_x + 1 {
            for j in self.curr_z - 1..=self.curr_z + 1 {
                let coord = TileCoord { x: i, z: j };
                if self.generated.contains(&coord) {
                    continue;
                }
                self.generated.insert(coord);
                scene.add_model(Self::floor_model(coord, variants.pick(rng)));
                emitted += 1;
            }
        }

        if emitted > 0 {
            debug!(
                "crossed into tile ({}, {}), generated {emitted} floor tile(s)",
                self.curr_x, self.curr_z
            );
        }
        emitted
    }

    fn floor_model(coord: TileCoord, texture_variant: u32) -> Model {
        let half = TILE_EXTENT / 2.0;
        let center_x = coord.x as f32 * TILE_EXTENT;
        let center_z = coord.z as f32 * TILE_EXTENT;

        let mesh = MeshFactory::solid_color_box(
            Vec3::new(center_x - half, -0.1, center_z - half),
            Vec3::new(center_x + half, 0.0, center_z + half),
            FLOOR_COLOR,
        );
        Model::new(mesh, TexturePattern::from_variant(texture_variant))
    }
}
