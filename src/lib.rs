//! # particle-backdrop
//!
//! Animated 3D backdrop: a field of random points joined by faint lines
//! wherever two points are close, slowly rotating, following the scroll
//! offset and shifting with the pointer for a parallax effect.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_backdrop::{run, SceneConfig, Theme};
//!
//! fn main() {
//!     run(SceneConfig::default(), Theme::Dark).unwrap();
//! }
//! ```
//!
//! ## Embedding
//!
//! [`SceneAnimator`] is generic over [`RenderBackend`], so a host that owns
//! its own event loop can drive it directly:
//!
//! ```ignore
//! let hub = EventHub::new();
//! let mut animator = SceneAnimator::mount(backend, hub.clone(), Viewport::new(800, 600), Theme::Light, SceneConfig::default())?;
//!
//! // on input
//! if hub.accepts(&event) {
//!     animator.handle_event(&event);
//! }
//! // on redraw
//! if animator.frame() {
//!     schedule_next_frame();
//! }
//! ```
//!
//! ## Scene
//!
//! | Piece | Default |
//! |-------|---------|
//! | Points | 2000, uniform in `[-100, 100)^3` |
//! | Edges | every pair closer than 30 units |
//! | Rotation per frame | points (0.0001, 0.0002), edges (0.00005, 0.0001) rad |
//! | Vertical offset | scroll × 0.01 |
//! | Camera | FOV 75°, z = 30, x/y = pointer × 5 |

pub mod animator;
pub mod camera;
pub mod config;
pub mod edges;
mod error;
pub mod field;
pub mod frame;
mod gpu;
pub mod input;
pub mod render;
pub mod theme;
pub mod time;
pub mod view;
mod window;

pub use animator::SceneAnimator;
pub use camera::Camera;
pub use config::{EdgeBuilder, SceneConfig, ThemeSwitch};
pub use edges::ProximityEdgeSet;
pub use error::{BackdropError, ConfigError, GpuError};
pub use field::{PointField, Transform};
pub use frame::{CancelHandle, FrameLoop};
pub use glam::{Vec2, Vec3};
pub use gpu::WgpuBackend;
pub use input::{EventHub, HostEvent, Input, Listener, ListenerKind};
pub use render::{Material, MeshId, RenderBackend, Viewport};
pub use theme::{Color, Palette, Theme};
pub use time::FrameTimer;
pub use view::ViewState;
pub use window::{run, BackdropApp};
