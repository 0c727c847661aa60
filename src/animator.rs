//! The scene animator: owns the point field, its proximity edges and the
//! view state, and drives a [`RenderBackend`] once per frame.
//!
//! Lifecycle:
//!
//! ```ignore
//! let hub = EventHub::new();
//! let mut animator = SceneAnimator::mount(backend, hub.clone(), viewport, Theme::Light, config)?;
//!
//! // host callbacks
//! if hub.accepts(&event) {
//!     animator.handle_event(&event);
//! }
//! if animator.frame() {
//!     window.request_redraw();
//! }
//!
//! animator.teardown(); // also runs on drop
//! ```

use log::{debug, info, trace, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::camera::Camera;
use crate::config::{SceneConfig, ThemeSwitch};
use crate::edges::ProximityEdgeSet;
use crate::error::{BackdropError, GpuError};
use crate::field::PointField;
use crate::frame::{CancelHandle, FrameLoop};
use crate::input::{EventHub, HostEvent, Input, Listener, ListenerKind};
use crate::render::{MeshId, RenderBackend, Viewport};
use crate::theme::{Palette, Theme};
use crate::time::FrameTimer;
use crate::view::ViewState;

/// Resources that exist only while the scene is mounted.
struct Scene {
    field: PointField,
    edges: ProximityEdgeSet,
    points_mesh: MeshId,
    edges_mesh: MeshId,
    frame_loop: FrameLoop,
    /// Dropping these unregisters them from the hub.
    _listeners: Vec<Listener>,
}

/// Animated particle backdrop bound to one rendering backend.
pub struct SceneAnimator<B: RenderBackend> {
    backend: B,
    hub: EventHub,
    config: SceneConfig,
    theme: Theme,
    rng: SmallRng,
    input: Input,
    view: ViewState,
    timer: FrameTimer,
    scene: Option<Scene>,
}

impl<B: RenderBackend> SceneAnimator<B> {
    /// Build the scene on `backend` and start the frame loop.
    ///
    /// Fails if the viewport is empty, the config is invalid, or the backend
    /// cannot acquire a surface. Nothing stays allocated on failure.
    pub fn mount(
        backend: B,
        hub: EventHub,
        viewport: Viewport,
        theme: Theme,
        config: SceneConfig,
    ) -> Result<Self, BackdropError> {
        if viewport.is_empty() {
            return Err(BackdropError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut animator = Self {
            backend,
            hub,
            view: ViewState::new(Camera::new(&config, viewport)),
            input: Input::new(viewport),
            config,
            theme,
            rng,
            timer: FrameTimer::new(),
            scene: None,
        };
        animator.build()?;
        Ok(animator)
    }

    /// Create surface, geometry, listeners and frame loop.
    fn build(&mut self) -> Result<(), BackdropError> {
        let viewport = self.input.viewport();
        let palette = Palette::for_theme(self.theme, &self.config);

        self.backend.create_surface(viewport, palette.background)?;

        let field = PointField::generate(self.config.particle_count, self.config.half_extent, &mut self.rng);
        let edges = ProximityEdgeSet::build_with(
            self.config.edge_builder,
            field.positions(),
            self.config.edge_threshold,
        );
        debug!(
            "Built {} points and {} edges (threshold {}, {:?})",
            field.len(),
            edges.len(),
            edges.threshold(),
            self.config.edge_builder
        );

        let (points_mesh, edges_mesh) = match self.create_meshes(&field, &edges, &palette) {
            Ok(meshes) => meshes,
            Err(e) => {
                self.backend.dispose();
                return Err(e.into());
            }
        };

        self.input = Input::new(viewport);
        self.view = ViewState::new(Camera::new(&self.config, viewport));
        self.timer = FrameTimer::new();
        self.backend.set_camera(&self.view.camera);

        let listeners = [ListenerKind::Scroll, ListenerKind::Pointer, ListenerKind::Resize]
            .into_iter()
            .map(|kind| self.hub.listen(kind))
            .collect();

        self.scene = Some(Scene {
            field,
            edges,
            points_mesh,
            edges_mesh,
            frame_loop: FrameLoop::start(),
            _listeners: listeners,
        });

        info!(
            "Backdrop mounted at {}x{} ({:?} theme)",
            viewport.width, viewport.height, self.theme
        );
        Ok(())
    }

    fn create_meshes(
        &mut self,
        field: &PointField,
        edges: &ProximityEdgeSet,
        palette: &Palette,
    ) -> Result<(MeshId, MeshId), GpuError> {
        let points_mesh = self.backend.create_point_cloud(field.positions(), palette.particles)?;
        let edges_mesh = self
            .backend
            .create_line_mesh(&edges.segments(field.positions()), palette.edges)?;
        Ok((points_mesh, edges_mesh))
    }

    /// Record a host event. Ignored once torn down.
    pub fn handle_event(&mut self, event: &HostEvent) {
        if self.scene.is_none() {
            return;
        }
        if let Some(viewport) = self.input.apply(event) {
            self.resize(viewport);
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        debug!("Resizing backdrop to {}x{}", viewport.width, viewport.height);
        self.view.camera.set_viewport(viewport);
        self.backend.resize(viewport);
    }

    /// Run one frame. Returns whether the host should schedule another.
    pub fn frame(&mut self) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        if !scene.frame_loop.begin_frame() {
            return false;
        }

        self.view.advance(&self.input, &self.config);

        self.backend.set_transform(scene.points_mesh, &self.view.points);
        self.backend.set_transform(scene.edges_mesh, &self.view.edges);
        self.backend.set_camera(&self.view.camera);
        if let Err(e) = self.backend.render_frame() {
            warn!("Render error: {}", e);
        }

        if self.timer.tick() {
            trace!(
                "Backdrop frame {} at {:.1} fps ({:.2} ms)",
                self.timer.frame(),
                self.timer.fps(),
                self.timer.delta() * 1000.0
            );
        }
        true
    }

    /// Switch theme.
    ///
    /// With [`ThemeSwitch::Rebuild`] the whole scene is torn down and built
    /// again, including a freshly sampled point field. With
    /// [`ThemeSwitch::Recolor`] only colors change.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), BackdropError> {
        if theme == self.theme {
            return Ok(());
        }
        self.theme = theme;
        if self.scene.is_none() {
            return Ok(());
        }
        info!("Switching backdrop theme to {:?}", theme);

        match self.config.theme_switch {
            ThemeSwitch::Rebuild => {
                self.teardown();
                self.build()
            }
            ThemeSwitch::Recolor => {
                if let Some(scene) = &self.scene {
                    let palette = Palette::for_theme(theme, &self.config);
                    self.backend.set_background(palette.background);
                    self.backend.set_material(scene.points_mesh, palette.particles);
                    self.backend.set_material(scene.edges_mesh, palette.edges);
                }
                Ok(())
            }
        }
    }

    /// Cancel the frame loop, drop listeners and dispose the surface.
    ///
    /// Safe to call repeatedly; only the first call after a mount does work.
    pub fn teardown(&mut self) {
        let Some(scene) = self.scene.take() else {
            return;
        };
        scene.frame_loop.cancel();
        drop(scene);
        self.backend.dispose();
        info!("Backdrop torn down");
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.scene.is_some()
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[inline]
    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn field(&self) -> Option<&PointField> {
        self.scene.as_ref().map(|s| &s.field)
    }

    pub fn edges(&self) -> Option<&ProximityEdgeSet> {
        self.scene.as_ref().map(|s| &s.edges)
    }

    /// Mesh handles as `(points, edges)`.
    pub fn meshes(&self) -> Option<(MeshId, MeshId)> {
        self.scene.as_ref().map(|s| (s.points_mesh, s.edges_mesh))
    }

    /// Handle that stops the current frame loop.
    pub fn cancel_handle(&self) -> Option<CancelHandle> {
        self.scene.as_ref().map(|s| s.frame_loop.handle())
    }

    /// Frames rendered since the last mount.
    pub fn frames(&self) -> u64 {
        self.scene.as_ref().map_or(0, |s| s.frame_loop.frames())
    }

    /// Frame timing since the last mount.
    #[inline]
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: RenderBackend> Drop for SceneAnimator<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
