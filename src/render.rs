//! The rendering capability the animator draws through.
//!
//! [`RenderBackend`] is the seam between the animation logic and a concrete
//! graphics API. The crate ships a wgpu implementation
//! ([`WgpuBackend`](crate::WgpuBackend)); tests use a recording mock.

use glam::Vec3;

use crate::camera::Camera;
use crate::error::GpuError;
use crate::field::Transform;
use crate::theme::Color;

/// Pixel size of the mount target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height. Zero-height viewports report 1.0.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Handle to a mesh created on a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Flat, transparent material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    /// Point sprite size in world units. Ignored by line meshes.
    pub size: f32,
}

/// Primitive operations a renderer must provide.
///
/// A backend holds at most one surface. `dispose` releases the surface and
/// every mesh created on it; `create_surface` may be called again afterwards.
pub trait RenderBackend {
    /// Acquire a rendering surface of the given size.
    fn create_surface(&mut self, viewport: Viewport, background: Color) -> Result<(), GpuError>;

    /// Upload a point cloud, one sprite per position.
    fn create_point_cloud(&mut self, positions: &[Vec3], material: Material) -> Result<MeshId, GpuError>;

    /// Upload a line list: `segments[2k]` to `segments[2k + 1]`.
    fn create_line_mesh(&mut self, segments: &[Vec3], material: Material) -> Result<MeshId, GpuError>;

    fn set_transform(&mut self, mesh: MeshId, transform: &Transform);

    fn set_material(&mut self, mesh: MeshId, material: Material);

    fn set_background(&mut self, color: Color);

    fn set_camera(&mut self, camera: &Camera);

    /// Resize the surface. Zero-sized viewports are ignored.
    fn resize(&mut self, viewport: Viewport);

    /// Draw every mesh with the current camera.
    fn render_frame(&mut self) -> Result<(), GpuError>;

    /// Release the surface and all GPU resources.
    fn dispose(&mut self);
}
