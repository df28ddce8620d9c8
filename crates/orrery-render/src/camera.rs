//! Camera rig: pan/zoom state and the view/projection matrices.

use glam::{Mat4, Vec3};
use orrery_config::{CameraConfig, ControlsConfig};

/// Camera state mutated by input events and read every frame.
///
/// The view transform is applied to the scene directly:
/// `T(position) · Ry(yaw) · Rx(pitch)`. A negative Z position therefore
/// pushes the scene away from the viewer. Pan and zoom are per-event
/// deltas and are never scaled by frame time.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Rotation around the vertical axis, degrees.
    pub yaw: f32,
    /// Rotation around the horizontal axis, degrees.
    pub pitch: f32,
    /// Scene translation in scene units.
    pub position: Vec3,
    move_speed: f32,
    zoom_speed: f32,
    dragging: bool,
    fov_y_deg: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl CameraRig {
    /// Build the rig from configuration.
    pub fn new(camera: &CameraConfig, controls: &ControlsConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            position: Vec3::from_array(camera.start_position),
            move_speed: controls.move_speed,
            zoom_speed: controls.zoom_speed,
            dragging: false,
            fov_y_deg: camera.fov_y_deg,
            aspect: 16.0 / 9.0,
            near: camera.z_near,
            far: camera.z_far,
        }
    }

    /// Mouse button went down: panning follows the cursor until release.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Mouse button released: cursor movement no longer pans.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Whether a drag is currently active.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pan by a cursor delta in pixels. Ignored unless a drag is active.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.dragging {
            return;
        }
        self.position.x -= dx * self.move_speed;
        self.position.y += dy * self.move_speed;
    }

    /// Zoom by one scroll event. The delta is clamped to [-1, 1] so wild
    /// wheel deltas still move one notch.
    pub fn zoom(&mut self, delta: f32) {
        self.position.z += delta.clamp(-1.0, 1.0) * self.zoom_speed;
    }

    /// Update the projection aspect ratio from the surface size.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// The view transform applied to the scene.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
    }

    /// Reverse-Z perspective projection (near/far swapped; pairs with a
    /// GreaterEqual depth test and a 0.0 depth clear).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.far, self.near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn test_rig() -> CameraRig {
        CameraRig::new(&CameraConfig::default(), &ControlsConfig::default())
    }

    #[test]
    fn test_starts_at_configured_position() {
        let rig = test_rig();
        assert_eq!(rig.position, Vec3::new(0.0, 0.0, -50.0));
        assert_eq!(rig.yaw, 0.0);
        assert_eq!(rig.pitch, 0.0);
    }

    #[test]
    fn test_pan_requires_active_drag() {
        let mut rig = test_rig();
        let start = rig.position;

        rig.pan(10.0, -4.0);
        assert_eq!(rig.position, start);

        rig.begin_drag();
        rig.pan(10.0, -4.0);
        assert!((rig.position.x - (start.x - 10.0 * 0.05)).abs() < 1e-6);
        assert!((rig.position.y - (start.y + -4.0 * 0.05)).abs() < 1e-6);

        rig.end_drag();
        let held = rig.position;
        rig.pan(10.0, -4.0);
        assert_eq!(rig.position, held);
    }

    #[test]
    fn test_zoom_clamps_delta() {
        let mut rig = test_rig();
        let start_z = rig.position.z;

        rig.zoom(250.0); // huge wheel delta still moves one notch
        assert!((rig.position.z - (start_z + 5.0)).abs() < 1e-6);

        rig.zoom(-0.5);
        assert!((rig.position.z - (start_z + 5.0 - 2.5)).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_is_per_event_not_time_scaled() {
        let mut once = test_rig();
        once.zoom(1.0);

        let mut twice = test_rig();
        twice.zoom(1.0);
        twice.zoom(1.0);

        assert!((twice.position.z - once.position.z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_composition_order() {
        let mut rig = test_rig();
        rig.position = Vec3::new(1.0, 2.0, 3.0);
        rig.yaw = 90.0;

        let view = rig.view_matrix();
        // Translation is applied last, so the origin lands at the position.
        let origin = view.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        // Yaw rotates before translating: +X maps near -Z, then translates.
        let x_axis = view.transform_point3(Vec3::X);
        assert!((x_axis - Vec3::new(1.0, 2.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_reverse_z_projection_bounds() {
        let mut rig = test_rig();
        rig.set_aspect_ratio(1.0, 1.0);
        let proj = rig.projection_matrix();

        // Near plane maps to depth 1, far plane to depth 0.
        let near_point = proj * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!((near_point.z / near_point.w - 1.0).abs() < 1e-4);

        let far_point = proj * Vec4::new(0.0, 0.0, -10000.0, 1.0);
        assert!((far_point.z / far_point.w).abs() < 1e-4);
    }

    #[test]
    fn test_aspect_ratio_ignores_zero_height() {
        let mut rig = test_rig();
        rig.set_aspect_ratio(1920.0, 1080.0);
        let aspect_before = rig.aspect;
        rig.set_aspect_ratio(1920.0, 0.0);
        assert_eq!(rig.aspect, aspect_before);
    }
}
