//! wgpu implementation of [`RenderBackend`].

mod pipelines;

use std::sync::Arc;

use glam::{Mat4, Vec3};
use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::Camera;
use crate::error::GpuError;
use crate::field::Transform;
use crate::render::{Material, MeshId, RenderBackend, Viewport};
use crate::theme::Color;
use pipelines::MeshUniforms;

#[derive(Clone, Copy, PartialEq, Eq)]
enum MeshKind {
    Points,
    Lines,
}

struct GpuMesh {
    kind: MeshKind,
    /// `None` for meshes with no vertices; zero-sized buffers cannot be bound.
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    model: Mat4,
    material: Material,
}

/// Everything tied to a live surface. Dropping it releases the GPU resources.
struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    uniform_layout: wgpu::BindGroupLayout,
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    meshes: Vec<GpuMesh>,
    background: wgpu::Color,
    view: Mat4,
    proj: Mat4,
}

/// Renders into a winit window through wgpu.
pub struct WgpuBackend {
    window: Arc<Window>,
    instance: wgpu::Instance,
    state: Option<GpuState>,
}

impl WgpuBackend {
    pub fn new(window: Arc<Window>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        Self {
            window,
            instance,
            state: None,
        }
    }

    async fn init(&self, viewport: Viewport, background: Color) -> Result<GpuState, GpuError> {
        let surface = self.instance.create_surface(Arc::clone(&self.window))?;

        let adapter = self
            .instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;
        info!("Using GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Backdrop Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(GpuError::NoAdapter)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: viewport.width,
            height: viewport.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_layout = pipelines::create_uniform_layout(&device);
        let point_pipeline = pipelines::create_point_pipeline(&device, &uniform_layout, surface_format);
        let line_pipeline = pipelines::create_line_pipeline(&device, &uniform_layout, surface_format);

        Ok(GpuState {
            surface,
            device,
            queue,
            config,
            uniform_layout,
            point_pipeline,
            line_pipeline,
            meshes: Vec::new(),
            background: clear_color(background),
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        })
    }

    fn create_mesh(
        &mut self,
        kind: MeshKind,
        vertices: &[Vec3],
        material: Material,
    ) -> Result<MeshId, GpuError> {
        let state = self.state.as_mut().ok_or(GpuError::NotReady)?;

        let vertex_data: Vec<[f32; 3]> = vertices.iter().map(|v| v.to_array()).collect();
        let vertex_buffer = (!vertex_data.is_empty()).then(|| {
            state.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(match kind {
                    MeshKind::Points => "Point Buffer",
                    MeshKind::Lines => "Line Buffer",
                }),
                contents: bytemuck::cast_slice(&vertex_data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let model = Mat4::IDENTITY;
        let uniforms = mesh_uniforms(state.view, state.proj, model, material);
        let uniform_buffer = state.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = state.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mesh Uniform Bind Group"),
            layout: &state.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let id = MeshId(state.meshes.len());
        state.meshes.push(GpuMesh {
            kind,
            vertex_buffer,
            vertex_count: vertex_data.len() as u32,
            uniform_buffer,
            bind_group,
            model,
            material,
        });
        debug!("Created mesh {:?} with {} vertices", id, vertex_data.len());
        Ok(id)
    }

    fn mesh_mut(&mut self, mesh: MeshId) -> Option<&mut GpuMesh> {
        self.state.as_mut().and_then(|s| s.meshes.get_mut(mesh.0))
    }
}

fn clear_color(color: Color) -> wgpu::Color {
    let [r, g, b] = color.to_linear();
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

fn mesh_uniforms(view: Mat4, proj: Mat4, model: Mat4, material: Material) -> MeshUniforms {
    let [r, g, b] = material.color.to_linear();
    MeshUniforms {
        view: view.to_cols_array_2d(),
        proj: proj.to_cols_array_2d(),
        model: model.to_cols_array_2d(),
        color: [r, g, b, material.opacity],
        point_size: material.size,
        _pad: [0.0; 3],
    }
}

impl RenderBackend for WgpuBackend {
    fn create_surface(&mut self, viewport: Viewport, background: Color) -> Result<(), GpuError> {
        let state = pollster::block_on(self.init(viewport, background))?;
        self.state = Some(state);
        Ok(())
    }

    fn create_point_cloud(&mut self, positions: &[Vec3], material: Material) -> Result<MeshId, GpuError> {
        self.create_mesh(MeshKind::Points, positions, material)
    }

    fn create_line_mesh(&mut self, segments: &[Vec3], material: Material) -> Result<MeshId, GpuError> {
        self.create_mesh(MeshKind::Lines, segments, material)
    }

    fn set_transform(&mut self, mesh: MeshId, transform: &Transform) {
        if let Some(mesh) = self.mesh_mut(mesh) {
            mesh.model = transform.matrix();
        }
    }

    fn set_material(&mut self, mesh: MeshId, material: Material) {
        if let Some(mesh) = self.mesh_mut(mesh) {
            mesh.material = material;
        }
    }

    fn set_background(&mut self, color: Color) {
        if let Some(state) = &mut self.state {
            state.background = clear_color(color);
        }
    }

    fn set_camera(&mut self, camera: &Camera) {
        if let Some(state) = &mut self.state {
            state.view = camera.view_matrix();
            state.proj = camera.projection_matrix();
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        if let Some(state) = &mut self.state {
            state.config.width = viewport.width;
            state.config.height = viewport.height;
            state.surface.configure(&state.device, &state.config);
        }
    }

    fn render_frame(&mut self) -> Result<(), GpuError> {
        let state = self.state.as_mut().ok_or(GpuError::NotReady)?;

        for mesh in &state.meshes {
            let uniforms = mesh_uniforms(state.view, state.proj, mesh.model, mesh.material);
            state
                .queue
                .write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let output = match state.surface.get_current_texture() {
            Ok(output) => output,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                state.surface.configure(&state.device, &state.config);
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(state.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for mesh in &state.meshes {
                let Some(buffer) = &mesh.vertex_buffer else {
                    continue;
                };
                render_pass.set_bind_group(0, &mesh.bind_group, &[]);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                match mesh.kind {
                    MeshKind::Points => {
                        render_pass.set_pipeline(&state.point_pipeline);
                        render_pass.draw(0..6, 0..mesh.vertex_count);
                    }
                    MeshKind::Lines => {
                        render_pass.set_pipeline(&state.line_pipeline);
                        render_pass.draw(0..mesh.vertex_count, 0..1);
                    }
                }
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }

    fn dispose(&mut self) {
        if self.state.take().is_some() {
            debug!("Released GPU surface and meshes");
        }
    }
}
