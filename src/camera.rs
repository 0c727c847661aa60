//! Perspective camera looking down -Z.

use glam::{Mat4, Vec3};

use crate::config::SceneConfig;
use crate::render::Viewport;

/// Perspective camera for the backdrop.
///
/// The camera never turns: pointer movement only slides it in x/y, which
/// gives the parallax against the rotating field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position.
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, config.camera_distance),
            fov_y: config.fov_degrees.to_radians(),
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
        }
    }

    /// Recompute the aspect ratio for a new viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_camera() {
        let camera = Camera::new(&SceneConfig::default(), Viewport::new(800, 600));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 30.0));
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov_y - 75.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_moves_world_opposite_to_camera() {
        let mut camera = Camera::new(&SceneConfig::default(), Viewport::new(100, 100));
        camera.position = Vec3::new(2.0, -1.0, 30.0);
        let origin = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(-2.0, 1.0, -30.0)).length() < 1e-5);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::new(&SceneConfig::default(), Viewport::new(800, 600));
        camera.set_viewport(Viewport::new(1920, 1080));
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
