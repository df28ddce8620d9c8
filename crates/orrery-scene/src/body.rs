//! A celestial body node: mesh, texture, orbit state, and children.

use glam::{Mat4, Vec3};

use crate::renderer::{BodyRenderer, MeshHandle, TextureHandle};

/// One renderable body in the orbit hierarchy.
///
/// Holds two independent angle accumulators: `spin_deg` for rotation around
/// the body's own axis and `orbit_deg` for revolution around the parent's
/// local origin. Both are unbounded f64 accumulators in degrees; they are
/// never wrapped to [0, 360).
#[derive(Debug)]
pub struct CelestialBody {
    name: String,
    mesh: MeshHandle,
    texture: TextureHandle,
    /// Scaled body radius in scene units, kept for inspection.
    radius: f32,
    /// Orbit radius along +X in the parent frame, scene units.
    local_offset: f32,
    /// Revolution speed around the parent, degrees per second.
    orbital_speed: f32,
    /// Self-rotation speed, degrees per second.
    rotation_speed: f32,
    orbit_deg: f64,
    spin_deg: f64,
    children: Vec<CelestialBody>,
}

impl CelestialBody {
    /// Create a fully initialized node. The mesh handle must come from the
    /// same [`BodyRenderer`] the node will later be drawn through.
    pub fn new(
        name: impl Into<String>,
        mesh: MeshHandle,
        texture: TextureHandle,
        radius: f32,
        local_offset: f32,
        orbital_speed: f32,
        rotation_speed: f32,
    ) -> Self {
        Self {
            name: name.into(),
            mesh,
            texture,
            radius,
            local_offset,
            orbital_speed,
            rotation_speed,
            orbit_deg: 0.0,
            spin_deg: 0.0,
            children: Vec::new(),
        }
    }

    /// Append a child node. The forest is a tree by construction; nodes are
    /// never re-parented, so no cycle check is performed.
    pub fn add_child(&mut self, child: CelestialBody) {
        self.children.push(child);
    }

    /// Advance both angle accumulators by `elapsed_ms` at this node's fixed
    /// rates, then recurse into every child with the same elapsed time.
    pub fn update(&mut self, elapsed_ms: f64) {
        let elapsed_s = elapsed_ms / 1000.0;
        self.spin_deg += f64::from(self.rotation_speed) * elapsed_s;
        self.orbit_deg += f64::from(self.orbital_speed) * elapsed_s;

        for child in &mut self.children {
            child.update(elapsed_ms);
        }
    }

    /// Depth-first draw traversal.
    ///
    /// Composes orbit rotation, orbit-radius translation, then spin onto the
    /// parent transform and submits one draw. Children receive the fully
    /// composed local transform, so a moon inherits its planet's orbital
    /// position.
    pub fn draw(&self, renderer: &mut dyn BodyRenderer, projection: Mat4, mv_parent: Mat4) {
        let mv_local = mv_parent
            * Mat4::from_rotation_y((self.orbit_deg as f32).to_radians())
            * Mat4::from_translation(Vec3::new(self.local_offset, 0.0, 0.0))
            * Mat4::from_rotation_y((self.spin_deg as f32).to_radians());

        renderer.submit(self.mesh, self.texture, projection, mv_local);

        for child in &self.children {
            child.draw(renderer, projection, mv_local);
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scaled body radius in scene units.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Orbit radius in the parent frame, scene units.
    pub fn local_offset(&self) -> f32 {
        self.local_offset
    }

    /// Accumulated self-rotation in degrees.
    pub fn spin_deg(&self) -> f64 {
        self.spin_deg
    }

    /// Accumulated revolution around the parent in degrees.
    pub fn orbit_deg(&self) -> f64 {
        self.orbit_deg
    }

    /// Child nodes in insertion order.
    pub fn children(&self) -> &[CelestialBody] {
        &self.children
    }

    /// Number of nodes in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingRenderer;

    fn test_body(orbital_speed: f32, rotation_speed: f32) -> CelestialBody {
        CelestialBody::new(
            "test",
            MeshHandle::new(0),
            TextureHandle::new(0),
            1.0,
            10.0,
            orbital_speed,
            rotation_speed,
        )
    }

    #[test]
    fn test_zero_elapsed_is_idempotent() {
        let mut body = test_body(30.0, 25.0);
        body.update(1000.0);
        let (spin, orbit) = (body.spin_deg(), body.orbit_deg());

        for _ in 0..100 {
            body.update(0.0);
        }
        assert_eq!(body.spin_deg(), spin);
        assert_eq!(body.orbit_deg(), orbit);
    }

    #[test]
    fn test_linear_accumulation() {
        let mut body = test_body(0.0, 25.0);
        body.update(1000.0);
        assert!((body.spin_deg() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_updates_accumulate_the_same() {
        let mut whole = test_body(40.0, 25.0);
        whole.update(1000.0);

        let mut halves = test_body(40.0, 25.0);
        halves.update(500.0);
        halves.update(500.0);

        assert!((whole.spin_deg() - halves.spin_deg()).abs() < 1e-9);
        assert!((whole.orbit_deg() - halves.orbit_deg()).abs() < 1e-9);
    }

    #[test]
    fn test_angles_accumulate_unbounded() {
        let mut body = test_body(0.0, 90.0);
        for _ in 0..10 {
            body.update(1000.0);
        }
        // 900 degrees, not wrapped back into [0, 360).
        assert!((body.spin_deg() - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_recurses_with_same_elapsed() {
        let mut planet = test_body(0.0, 10.0);
        planet.add_child(test_body(20.0, 0.0));
        planet.update(2000.0);

        assert!((planet.spin_deg() - 20.0).abs() < 1e-9);
        assert!((planet.children()[0].orbit_deg() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_submits_depth_first() {
        let mut renderer = RecordingRenderer::default();
        let mut planet = CelestialBody::new(
            "planet",
            MeshHandle::new(0),
            TextureHandle::new(0),
            1.0,
            0.0,
            0.0,
            0.0,
        );
        let mut inner = CelestialBody::new(
            "inner-moon",
            MeshHandle::new(1),
            TextureHandle::new(1),
            0.2,
            2.0,
            0.0,
            0.0,
        );
        inner.add_child(CelestialBody::new(
            "moonlet",
            MeshHandle::new(2),
            TextureHandle::new(2),
            0.05,
            0.5,
            0.0,
            0.0,
        ));
        planet.add_child(inner);
        planet.add_child(CelestialBody::new(
            "outer-moon",
            MeshHandle::new(3),
            TextureHandle::new(3),
            0.3,
            4.0,
            0.0,
            0.0,
        ));

        planet.draw(&mut renderer, Mat4::IDENTITY, Mat4::IDENTITY);

        let order: Vec<usize> = renderer.draws.iter().map(|d| d.mesh.index()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        let textures: Vec<usize> = renderer.draws.iter().map(|d| d.texture.index()).collect();
        assert_eq!(textures, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_draw_composes_offset_translation() {
        let mut renderer = RecordingRenderer::default();
        let body = test_body(0.0, 0.0); // offset 10 along +X, no rotation yet
        let projection = Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        body.draw(&mut renderer, projection, Mat4::IDENTITY);

        let mv = renderer.draws[0].model_view;
        let origin = mv.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
        // The projection is handed through untouched.
        assert_eq!(renderer.draws[0].projection, projection);
    }

    #[test]
    fn test_orbit_rotates_the_offset() {
        let mut renderer = RecordingRenderer::default();
        let mut body = test_body(90.0, 0.0);
        body.update(1000.0); // orbit = 90 degrees about +Y

        body.draw(&mut renderer, Mat4::IDENTITY, Mat4::IDENTITY);
        let origin = renderer.draws[0].model_view.transform_point3(Vec3::ZERO);
        // Ry(90) maps +X onto -Z.
        assert!((origin - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_spin_does_not_move_the_body() {
        let mut renderer = RecordingRenderer::default();
        let mut body = test_body(0.0, 45.0);
        body.update(1000.0);

        body.draw(&mut renderer, Mat4::IDENTITY, Mat4::IDENTITY);
        let origin = renderer.draws[0].model_view.transform_point3(Vec3::ZERO);
        // Spin is applied after the offset translation, so the center stays put.
        assert!((origin - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_children_inherit_composed_transform() {
        let mut renderer = RecordingRenderer::default();
        let mut planet = CelestialBody::new(
            "planet",
            MeshHandle::new(0),
            TextureHandle::new(0),
            1.0,
            10.0,
            90.0,
            0.0,
        );
        planet.add_child(CelestialBody::new(
            "moon",
            MeshHandle::new(1),
            TextureHandle::new(1),
            0.2,
            3.0,
            0.0,
            0.0,
        ));
        planet.update(1000.0); // planet orbit = 90 degrees

        planet.draw(&mut renderer, Mat4::IDENTITY, Mat4::IDENTITY);

        let planet_pos = renderer.draws[0].model_view.transform_point3(Vec3::ZERO);
        let moon_pos = renderer.draws[1].model_view.transform_point3(Vec3::ZERO);
        // The moon rides on the planet's orbital position, displaced by its
        // own offset inside the planet's (rotated) frame.
        assert!((planet_pos - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
        assert!((moon_pos - Vec3::new(0.0, 0.0, -13.0)).length() < 1e-4);
    }

    #[test]
    fn test_draw_does_not_mutate_state() {
        let mut renderer = RecordingRenderer::default();
        let mut body = test_body(30.0, 40.0);
        body.update(750.0);
        let (spin, orbit) = (body.spin_deg(), body.orbit_deg());

        body.draw(&mut renderer, Mat4::IDENTITY, Mat4::IDENTITY);
        body.draw(&mut renderer, Mat4::IDENTITY, Mat4::IDENTITY);

        assert_eq!(body.spin_deg(), spin);
        assert_eq!(body.orbit_deg(), orbit);
        assert_eq!(
            renderer.draws[0].model_view,
            renderer.draws[1].model_view
        );
    }

    #[test]
    fn test_subtree_len() {
        let mut planet = test_body(0.0, 0.0);
        let mut moon = test_body(0.0, 0.0);
        moon.add_child(test_body(0.0, 0.0));
        planet.add_child(moon);
        assert_eq!(planet.subtree_len(), 3);
    }
}
