//! Scene construction from the declarative body tree.

use std::collections::HashMap;

use glam::Mat4;
use orrery_config::{BodyConfig, SystemConfig};
use orrery_mesh::generate_uv_sphere;

use crate::body::CelestialBody;
use crate::error::SceneError;
use crate::renderer::{BodyRenderer, TextureHandle};

/// Scaling and tessellation parameters for scene construction.
#[derive(Debug, Clone, Copy)]
pub struct SceneParams {
    /// Scalar converting body units to scene units.
    pub global_scale: f32,
    /// Latitude bands for generated spheres.
    pub lat_bands: u32,
    /// Longitude bands for generated spheres.
    pub long_bands: u32,
}

impl SceneParams {
    /// Extract the construction parameters from a system config.
    pub fn from_system(system: &SystemConfig) -> Self {
        Self {
            global_scale: system.global_scale,
            lat_bands: system.lat_bands,
            long_bands: system.long_bands,
        }
    }
}

/// A built forest of celestial bodies, drawn in descriptor order.
#[derive(Debug)]
pub struct Scene {
    roots: Vec<CelestialBody>,
}

impl Scene {
    /// Advance every body's animation state by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: f64) {
        for root in &mut self.roots {
            root.update(elapsed_ms);
        }
    }

    /// Draw every root with the camera's view transform as the base
    /// model-view, in descriptor order.
    pub fn draw(&self, renderer: &mut dyn BodyRenderer, projection: Mat4, view: Mat4) {
        for root in &self.roots {
            root.draw(renderer, projection, view);
        }
    }

    /// Root bodies in descriptor order.
    pub fn roots(&self) -> &[CelestialBody] {
        &self.roots
    }

    /// Total number of bodies in the scene.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(CelestialBody::subtree_len).sum()
    }
}

/// Build the scene forest from the configured body tree.
///
/// Every texture key in the whole tree is resolved before any mesh is
/// uploaded, so a missing key fails the build with zero nodes created.
pub fn build_system(
    bodies: &[BodyConfig],
    textures: &HashMap<String, TextureHandle>,
    params: &SceneParams,
    renderer: &mut dyn BodyRenderer,
) -> Result<Scene, SceneError> {
    check_textures(bodies, textures)?;

    let mut roots = Vec::with_capacity(bodies.len());
    for body in bodies {
        roots.push(build_body(body, textures, params, renderer)?);
    }
    Ok(Scene { roots })
}

/// Fail with the first texture key the table cannot resolve.
fn check_textures(
    bodies: &[BodyConfig],
    textures: &HashMap<String, TextureHandle>,
) -> Result<(), SceneError> {
    for body in bodies {
        if !textures.contains_key(&body.texture) {
            return Err(SceneError::UnknownTexture(body.texture.clone()));
        }
        check_textures(&body.moons, textures)?;
    }
    Ok(())
}

fn build_body(
    body: &BodyConfig,
    textures: &HashMap<String, TextureHandle>,
    params: &SceneParams,
    renderer: &mut dyn BodyRenderer,
) -> Result<CelestialBody, SceneError> {
    let texture = textures[&body.texture];
    let mesh = generate_uv_sphere(
        params.lat_bands,
        params.long_bands,
        body.radius * params.global_scale,
    )?;
    let handle = renderer.upload_sphere(&body.name, &mesh);

    let mut node = CelestialBody::new(
        &body.name,
        handle,
        texture,
        body.radius * params.global_scale,
        body.distance * params.global_scale,
        body.orbital_speed,
        body.rotation_speed,
    );

    for moon in &body.moons {
        // Moon offsets are relative to the planet's local frame; world
        // placement comes from the draw traversal inheriting the parent's
        // composed transform.
        node.add_child(build_body(moon, textures, params, renderer)?);
    }

    Ok(node)
}
