//! Native host: a winit window showing the backdrop.
//!
//! Stands in for the page the backdrop would sit behind. Mouse wheel input
//! accumulates into a scroll offset, `T` toggles the theme, `Escape` or
//! closing the window tears the animator down and exits.

use std::sync::Arc;

use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::animator::SceneAnimator;
use crate::config::SceneConfig;
use crate::error::BackdropError;
use crate::gpu::WgpuBackend;
use crate::input::{EventHub, HostEvent};
use crate::render::Viewport;
use crate::theme::Theme;

/// Pixels scrolled per wheel line.
const LINE_HEIGHT: f32 = 40.0;

/// Frames between window title FPS updates.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// Window application driving one [`SceneAnimator`].
pub struct BackdropApp {
    config: SceneConfig,
    theme: Theme,
    hub: EventHub,
    window: Option<Arc<Window>>,
    animator: Option<SceneAnimator<WgpuBackend>>,
    scroll_offset: f32,
    error: Option<BackdropError>,
}

impl BackdropApp {
    pub fn new(config: SceneConfig, theme: Theme) -> Self {
        Self {
            config,
            theme,
            hub: EventHub::new(),
            window: None,
            animator: None,
            scroll_offset: 0.0,
            error: None,
        }
    }

    /// Error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<BackdropError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: BackdropError) {
        error!("{}", err);
        self.shutdown(event_loop);
        self.error = Some(err);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut animator) = self.animator.take() {
            animator.teardown();
        }
        event_loop.exit();
    }

    fn mount(&mut self, window: Arc<Window>) -> Result<(), BackdropError> {
        let viewport = to_viewport(window.inner_size());
        let backend = WgpuBackend::new(window);
        let animator = SceneAnimator::mount(backend, self.hub.clone(), viewport, self.theme, self.config.clone())?;
        self.animator = Some(animator);
        Ok(())
    }

    fn dispatch(&mut self, event: HostEvent) {
        if !self.hub.accepts(&event) {
            return;
        }
        if let Some(animator) = &mut self.animator {
            animator.handle_event(&event);
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn update_title(&self) {
        let (Some(window), Some(animator)) = (&self.window, &self.animator) else {
            return;
        };
        let timer = animator.timer();
        if timer.frame() % TITLE_REFRESH_FRAMES == 0 {
            window.set_title(&format!("Particle Backdrop - {:.0} FPS", timer.fps()));
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::KeyT) => {
                self.theme = self.theme.toggled();
                let result = match &mut self.animator {
                    Some(animator) => animator.set_theme(self.theme),
                    None => Ok(()),
                };
                match result {
                    Ok(()) => self.request_redraw(),
                    Err(e) => self.fail(event_loop, e),
                }
            }
            PhysicalKey::Code(KeyCode::Escape) => self.shutdown(event_loop),
            _ => {}
        }
    }
}

fn to_viewport(size: PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width, size.height)
}

impl ApplicationHandler for BackdropApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Particle Backdrop")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        self.window = Some(Arc::clone(&window));

        if let Err(e) = self.mount(window) {
            return self.fail(event_loop, e);
        }
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => self.dispatch(HostEvent::Resized(to_viewport(size))),
            WindowEvent::CursorMoved { position, .. } => self.dispatch(HostEvent::PointerMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                // Wheel down scrolls the page down
                self.scroll_offset = (self.scroll_offset - lines).max(0.0);
                self.dispatch(HostEvent::Scroll {
                    offset: self.scroll_offset,
                });
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::RedrawRequested => {
                let again = self.animator.as_mut().is_some_and(|a| a.frame());
                if again {
                    self.update_title();
                    self.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Open a window and run the backdrop until it is closed.
pub fn run(config: SceneConfig, theme: Theme) -> Result<(), BackdropError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = BackdropApp::new(config, theme);
    event_loop.run_app(&mut app)?;
    info!("Event loop finished");

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
