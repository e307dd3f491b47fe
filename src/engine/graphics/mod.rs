pub mod mesh;
pub mod renderer;
pub mod texture;


pub use mesh::{CpuMesh, CpuVertex, MeshFactory};
pub use renderer::{RecordingRenderer, SceneRenderer};
pub use texture::TexturePattern;
