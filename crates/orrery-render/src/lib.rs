//! wgpu rendering backend for the orrery.
//!
//! Owns the GPU device and surface, the textured body pipeline, mesh and
//! texture upload, the startup texture loader, and the camera rig. The scene
//! graph never touches wgpu directly — it draws through the
//! [`orrery_scene::BodyRenderer`] capability, implemented here by
//! [`GpuSceneRenderer`].

mod buffer;
mod camera;
mod depth;
mod gpu;
mod loader;
mod pass;
mod pipeline;
mod scene_gpu;
mod texture;

pub use buffer::{BodyVertex, MeshBuffer};
pub use camera::CameraRig;
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use loader::{DecodedTexture, TextureLoadError, load_all};
pub use pass::{FrameEncoder, SPACE_CLEAR_COLOR};
pub use pipeline::{BODY_SHADER_SOURCE, BodyPipeline, TransformUniform};
pub use scene_gpu::{GpuSceneRenderer, SceneStore};
pub use texture::{ManagedTexture, TextureError, TextureManager};
