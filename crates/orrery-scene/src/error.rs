//! Scene construction and traversal errors.

use orrery_mesh::MeshError;

/// Errors from building or driving the scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A body references a texture key with no loaded texture behind it.
    /// Construction fails closed: no nodes are created.
    #[error("no texture loaded for key {0:?}")]
    UnknownTexture(String),

    /// Sphere generation failed for a body.
    #[error("sphere generation failed: {0}")]
    Sphere(#[from] MeshError),

    /// A frame was driven before the scene existed.
    #[error("scene has not been built yet")]
    NotInitialized,
}
