use std::collections::HashMap;

use glam::{Quat, Vec3};
use slotmap::{SlotMap, new_key_type};

use crate::engine::graphics::mesh::{CpuMesh, MeshFactory};
use crate::engine::graphics::texture::TexturePattern;

new_key_type! {
    /// Stable key for a model in a [`Scene`].
    pub struct ModelKey;
}

/// Well-known models the frame loop repositions every frame, looked up by
/// tag rather than by insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTag {
    /// Cube floating ahead of the viewer, mirroring head yaw/pitch.
    IndicatorCube,
    /// Dot positioned on a sphere around the viewer along the gaze
    /// direction.
    GazeMarker,
}

/// One renderable: mesh + texture + world transform.
#[derive(Debug, Clone)]
pub struct Model {
    pub mesh: CpuMesh,
    pub texture: TexturePattern,
    pub position: Vec3,
    pub orientation: Quat,
}

impl Model {
    pub fn new(mesh: CpuMesh, texture: TexturePattern) -> Self {
        Self {
            mesh,
            texture,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }
}

/// Model store for one session run.
///
/// Models appended by the tile streamer stay until the scene is dropped;
/// there is no eviction.
#[derive(Default)]
pub struct Scene {
    models: SlotMap<ModelKey, Model>,
    tags: HashMap<ModelTag, ModelKey>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo room: two tagged marker models plus the static fixtures
    /// (wall ring, floor, ceiling, table).
    pub fn room() -> Self {
        let mut scene = Scene::new();

        scene.add_tagged(
            ModelTag::IndicatorCube,
            Model::new(
                MeshFactory::solid_color_box(Vec3::splat(-0.5), Vec3::splat(0.5), 0xff80_80ff),
                TexturePattern::Gradient,
            )
            .at(Vec3::new(0.0, 0.0, -10.0)),
        );

        scene.add_tagged(
            ModelTag::GazeMarker,
            Model::new(
                MeshFactory::solid_color_box(Vec3::splat(-0.1), Vec3::splat(0.1), 0xffff_0000),
                TexturePattern::SolidColor(0xffff_0000),
            )
            .at(Vec3::new(0.0, 0.0, -4.0)),
        );

        // Four wall slabs merged into one model.
        let mut walls =
            MeshFactory::solid_color_box(Vec3::new(-10.0, 0.0, -10.1), Vec3::new(10.0, 4.0, -10.0), 0xff80_8080);
        walls.extend(&MeshFactory::solid_color_box(
            Vec3::new(-10.0, 0.0, 10.0),
            Vec3::new(10.0, 4.0, 10.1),
            0xff80_8080,
        ));
        walls.extend(&MeshFactory::solid_color_box(
            Vec3::new(-10.1, 0.0, -10.0),
            Vec3::new(-10.0, 4.0, 10.0),
            0xff80_8080,
        ));
        walls.extend(&MeshFactory::solid_color_box(
            Vec3::new(10.0, 0.0, -10.0),
            Vec3::new(10.1, 4.0, 10.0),
            0xff80_8080,
        ));
        scene.add_model(Model::new(walls, TexturePattern::Bricks));

        scene.add_model(Model::new(
            MeshFactory::solid_color_box(Vec3::new(-10.0, -0.1, -10.0), Vec3::new(10.0, 0.0, 10.0), 0xff40_4040),
            TexturePattern::Checker,
        ));

        scene.add_model(Model::new(
            MeshFactory::solid_color_box(Vec3::new(-10.0, 4.0, -10.0), Vec3::new(10.0, 4.1, 10.0), 0xff50_5050),
            TexturePattern::Panels,
        ));

        // Table: top slab + four legs.
        let mut table =
            MeshFactory::solid_color_box(Vec3::new(1.0, 0.7, 1.0), Vec3::new(2.6, 0.8, 2.6), 0xff80_8050);
        for (x, z) in [(1.0, 1.0), (2.5, 1.0), (1.0, 2.5), (2.5, 2.5)] {
            table.extend(&MeshFactory::solid_color_box(
                Vec3::new(x, 0.0, z),
                Vec3::new(x + 0.1, 0.7, z + 0.1),
                0xff80_8050,
            ));
        }
        scene.add_model(Model::new(table, TexturePattern::SolidWhite));

        scene
    }

    pub fn add_model(&mut self, model: Model) -> ModelKey {
        self.models.insert(model)
    }

    pub fn add_tagged(&mut self, tag: ModelTag, model: Model) -> ModelKey {
        let key = self.models.insert(model);
        self.tags.insert(tag, key);
        key
    }

    pub fn tagged(&self, tag: ModelTag) -> Option<&Model> {
        self.tags.get(&tag).and_then(|key| self.models.get(*key))
    }

    pub fn tagged_mut(&mut self, tag: ModelTag) -> Option<&mut Model> {
        let key = *self.tags.get(&tag)?;
        self.models.get_mut(key)
    }

    pub fn set_tagged_position(&mut self, tag: ModelTag, position: Vec3) {
        if let Some(model) = self.tagged_mut(tag) {
            model.position = position;
        }
    }

    pub fn get(&self, key: ModelKey) -> Option<&Model> {
        self.models.get(key)
    }

    pub fn models(&self) -> impl Iterator<Item = (ModelKey, &Model)> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
