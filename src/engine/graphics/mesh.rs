//! CPU-side procedural mesh generation.
//!
//! These meshes are authoring / staging data. A GPU backend behind the
//! `SceneRenderer` seam uploads them into vertex/index buffers; the
//! recording backend only counts them.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
}

/// A minimal CPU vertex format.
///
/// - `pos`: model-space position
/// - `uv`: texture coordinates; tiling surfaces scale these by world extent
/// - `col`: RGBA tint
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct CpuVertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
    pub col: [f32; 4],
}

/// CPU-side mesh data.
///
/// Contract:
/// - `vertices` + `indices_u32` fully define geometry.
/// - Triangles are counter-clockwise in object space for front faces.
#[derive(Debug, Clone)]
pub struct CpuMesh {
    pub vertices: Vec<CpuVertex>,
    pub indices_u32: Vec<u32>,
    pub primitive_topology: PrimitiveTopology,
}

impl CpuMesh {
    pub fn new(vertices: Vec<CpuVertex>, indices_u32: Vec<u32>) -> Self {
        Self {
            vertices,
            indices_u32,
            primitive_topology: PrimitiveTopology::TriangleList,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices_u32.len() as u32
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Appends another mesh, rebasing its indices.
    pub fn extend(&mut self, other: &CpuMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices_u32
            .extend(other.indices_u32.iter().map(|i| i + base));
    }
}

/// One texture repeat per this many world units on tiling faces.
const UV_WORLD_SCALE: f32 = 0.25;

fn unpack_argb(color: u32) -> [f32; 4] {
    let a = ((color >> 24) & 0xff) as f32 / 255.0;
    let r = ((color >> 16) & 0xff) as f32 / 255.0;
    let g = ((color >> 8) & 0xff) as f32 / 255.0;
    let b = (color & 0xff) as f32 / 255.0;
    [r, g, b, a]
}

/// Procedural mesh constructors.
pub struct MeshFactory;

impl MeshFactory {
    /// Axis-aligned box from `min` to `max` in one flat ARGB color.
    ///
    /// 24 vertices (4 per face, so UVs don't bleed across edges),
    /// 12 triangles, CCW seen from outside. Face UVs are the two in-plane
    /// world coordinates scaled by `UV_WORLD_SCALE`.
    pub fn solid_color_box(min: Vec3, max: Vec3, color: u32) -> CpuMesh {
        let col = unpack_argb(color);
        let mut vertices: Vec<CpuVertex> = Vec::with_capacity(24);
        let mut indices: Vec<u32> = Vec::with_capacity(36);

        let mut quad = |corners: [Vec3; 4], uvs: [[f32; 2]; 4]| {
            let base = vertices.len() as u32;
            for (corner, uv) in corners.iter().zip(uvs.iter()) {
                vertices.push(CpuVertex {
                    pos: corner.to_array(),
                    uv: [uv[0] * UV_WORLD_SCALE, uv[1] * UV_WORLD_SCALE],
                    col,
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        };

        let (lo, hi) = (min, max);

        // -Z face
        quad(
            [
                Vec3::new(lo.x, lo.y, lo.z),
                Vec3::new(lo.x, hi.y, lo.z),
                Vec3::new(hi.x, hi.y, lo.z),
                Vec3::new(hi.x, lo.y, lo.z),
            ],
            [[lo.x, lo.y], [lo.x, hi.y], [hi.x, hi.y], [hi.x, lo.y]],
        );
        // +Z face
        quad(
            [
                Vec3::new(lo.x, lo.y, hi.z),
                Vec3::new(hi.x, lo.y, hi.z),
                Vec3::new(hi.x, hi.y, hi.z),
                Vec3::new(lo.x, hi.y, hi.z),
            ],
            [[lo.x, lo.y], [hi.x, lo.y], [hi.x, hi.y], [lo.x, hi.y]],
        );
        // -X face
        quad(
            [
                Vec3::new(lo.x, lo.y, lo.z),
                Vec3::new(lo.x, lo.y, hi.z),
                Vec3::new(lo.x, hi.y, hi.z),
                Vec3::new(lo.x, hi.y, lo.z),
            ],
            [[lo.z, lo.y], [hi.z, lo.y], [hi.z, hi.y], [lo.z, hi.y]],
        );
        // +X face
        quad(
            [
                Vec3::new(hi.x, lo.y, lo.z),
                Vec3::new(hi.x, hi.y, lo.z),
                Vec3::new(hi.x, hi.y, hi.z),
                Vec3::new(hi.x, lo.y, hi.z),
            ],
            [[lo.z, lo.y], [lo.z, hi.y], [hi.z, hi.y], [hi.z, lo.y]],
        );
        // -Y face
        quad(
            [
                Vec3::new(lo.x, lo.y, lo.z),
                Vec3::new(hi.x, lo.y, lo.z),
                Vec3::new(hi.x, lo.y, hi.z),
                Vec3::new(lo.x, lo.y, hi.z),
            ],
            [[lo.x, lo.z], [hi.x, lo.z], [hi.x, hi.z], [lo.x, hi.z]],
        );
        // +Y face
        quad(
            [
                Vec3::new(lo.x, hi.y, lo.z),
                Vec3::new(lo.x, hi.y, hi.z),
                Vec3::new(hi.x, hi.y, hi.z),
                Vec3::new(hi.x, hi.y, lo.z),
            ],
            [[lo.x, lo.z], [lo.x, hi.z], [hi.x, hi.z], [hi.x, lo.z]],
        );

        CpuMesh::new(vertices, indices)
    }
}
