//! The rendering capability the scene graph draws through.

use glam::Mat4;
use orrery_mesh::SphereMesh;

/// Opaque handle to a mesh uploaded through a [`BodyRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u32);

impl MeshHandle {
    /// Wrap a raw registry index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// The registry index this handle refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque handle to a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// Wrap a raw registry index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// The registry index this handle refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Rendering backend capability consumed by the scene graph.
///
/// `upload_sphere` is called once per node at build time; `submit` is called
/// once per node per frame during the draw traversal. Implementations decide
/// what a submit means — the GPU backend records it into the frame's draw
/// list, test doubles just remember it.
pub trait BodyRenderer {
    /// Upload a sphere mesh and return its handle.
    fn upload_sphere(&mut self, label: &str, mesh: &SphereMesh) -> MeshHandle;

    /// Submit one textured draw with the given projection and model-view.
    fn submit(
        &mut self,
        mesh: MeshHandle,
        texture: TextureHandle,
        projection: Mat4,
        model_view: Mat4,
    );
}
