//! Per-frame view state: mesh transforms and camera pose.

use glam::Vec3;

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::field::Transform;
use crate::input::Input;

/// Everything the frame step mutates. Owned by one animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Transform of the point cloud.
    pub points: Transform,
    /// Transform of the line mesh.
    pub edges: Transform,
    pub camera: Camera,
}

impl ViewState {
    pub fn new(camera: Camera) -> Self {
        Self {
            points: Transform::default(),
            edges: Transform::default(),
            camera,
        }
    }

    /// Advance one frame.
    ///
    /// Both meshes rotate at their own rate but share the scroll-driven
    /// vertical offset; the camera tracks the pointer in x/y only.
    pub fn advance(&mut self, input: &Input, config: &SceneConfig) {
        self.points.rotation += config.point_rotation_rate.extend(0.0);
        self.edges.rotation += config.edge_rotation_rate.extend(0.0);

        let offset_y = input.scroll() * config.scroll_factor;
        self.points.position.y = offset_y;
        self.edges.position.y = offset_y;

        let pointer = input.pointer() * config.pointer_range;
        self.camera.position = Vec3::new(pointer.x, pointer.y, self.camera.position.z);
    }
}
