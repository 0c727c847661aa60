//! Host input: scroll, pointer and resize events, and the listener table
//! that decides which of them reach the animator.
//!
//! The host owns an [`EventHub`]. The animator registers one [`Listener`]
//! per event kind when it mounts; the host forwards an event only while a
//! listener for its kind is registered. Listeners unregister themselves on
//! drop, so releasing an animator's guards leaves no residual listeners.
//!
//! ```ignore
//! let hub = EventHub::new();
//! let scroll = hub.listen(ListenerKind::Scroll);
//! assert!(hub.is_listening(ListenerKind::Scroll));
//! drop(scroll);
//! assert_eq!(hub.listener_count(), 0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;

use crate::render::Viewport;

/// Kinds of host events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Scroll,
    Pointer,
    Resize,
}

/// An event delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Absolute scroll offset in pixels.
    Scroll { offset: f32 },
    /// Pointer position in pixels from the top-left corner.
    PointerMoved { x: f32, y: f32 },
    /// New viewport size in pixels.
    Resized(Viewport),
}

impl HostEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            HostEvent::Scroll { .. } => ListenerKind::Scroll,
            HostEvent::PointerMoved { .. } => ListenerKind::Pointer,
            HostEvent::Resized(_) => ListenerKind::Resize,
        }
    }
}

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, ListenerKind)>,
}

/// Host-side registry of active listeners. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct EventHub {
    table: Rc<RefCell<ListenerTable>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the guard is dropped.
    pub fn listen(&self, kind: ListenerKind) -> Listener {
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push((id, kind));

        Listener {
            id,
            kind,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Whether any listener of this kind is registered.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.table.borrow().entries.iter().any(|&(_, k)| k == kind)
    }

    /// Whether `event` would be delivered.
    pub fn accepts(&self, event: &HostEvent) -> bool {
        self.is_listening(event.kind())
    }

    pub fn listener_count(&self) -> usize {
        self.table.borrow().entries.len()
    }
}

/// Registration guard returned by [`EventHub::listen`].
#[derive(Debug)]
pub struct Listener {
    id: u64,
    kind: ListenerKind,
    table: Weak<RefCell<ListenerTable>>,
}

impl Listener {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().entries.retain(|&(id, _)| id != self.id);
        }
    }
}

/// Map a pixel position to `[-1, 1]^2` with y pointing up.
pub fn normalize_pointer(x: f32, y: f32, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (x / viewport.width as f32) * 2.0 - 1.0,
        -(y / viewport.height as f32) * 2.0 + 1.0,
    )
}

/// Latest input values, written by event handlers and read once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Input {
    scroll: f32,
    pointer: Vec2,
    viewport: Viewport,
}

impl Input {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scroll: 0.0,
            pointer: Vec2::ZERO,
            viewport,
        }
    }

    /// Record an event. Returns the new viewport for resize events.
    pub fn apply(&mut self, event: &HostEvent) -> Option<Viewport> {
        match *event {
            HostEvent::Scroll { offset } => {
                self.scroll = offset;
                None
            }
            HostEvent::PointerMoved { x, y } => {
                self.pointer = normalize_pointer(x, y, self.viewport);
                None
            }
            HostEvent::Resized(viewport) => {
                if viewport.is_empty() {
                    return None;
                }
                self.viewport = viewport;
                Some(viewport)
            }
        }
    }

    /// Scroll offset in pixels.
    #[inline]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Normalized pointer position, `[-1, 1]^2`, y up.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_normalization() {
        let viewport = Viewport::new(800, 600);
        assert_eq!(normalize_pointer(400.0, 300.0, viewport), Vec2::ZERO);
        assert_eq!(normalize_pointer(0.0, 0.0, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(800.0, 600.0, viewport), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_listeners_unregister_on_drop() {
        let hub = EventHub::new();
        let scroll = hub.listen(ListenerKind::Scroll);
        let pointer = hub.listen(ListenerKind::Pointer);
        assert_eq!(hub.listener_count(), 2);
        assert!(hub.accepts(&HostEvent::Scroll { offset: 1.0 }));
        assert!(!hub.is_listening(ListenerKind::Resize));

        drop(scroll);
        assert!(!hub.is_listening(ListenerKind::Scroll));
        assert_eq!(pointer.kind(), ListenerKind::Pointer);
        drop(pointer);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_listener_outliving_hub() {
        let hub = EventHub::new();
        let listener = hub.listen(ListenerKind::Resize);
        drop(hub);
        drop(listener);
    }

    #[test]
    fn test_cloned_hub_shares_table() {
        let hub = EventHub::new();
        let _guard = hub.clone().listen(ListenerKind::Resize);
        assert!(hub.is_listening(ListenerKind::Resize));
    }

    #[test]
    fn test_input_uses_current_viewport() {
        let mut input = Input::new(Viewport::new(800, 600));
        assert_eq!(input.apply(&HostEvent::Resized(Viewport::new(400, 200))), Some(Viewport::new(400, 200)));
        input.apply(&HostEvent::PointerMoved { x: 400.0, y: 0.0 });
        assert_eq!(input.pointer(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_input_ignores_empty_resize() {
        let mut input = Input::new(Viewport::new(800, 600));
        assert_eq!(input.apply(&HostEvent::Resized(Viewport::new(0, 0))), None);
        assert_eq!(input.viewport(), Viewport::new(800, 600));
    }

    #[test]
    fn test_scroll_is_absolute() {
        let mut input = Input::new(Viewport::new(800, 600));
        input.apply(&HostEvent::Scroll { offset: 120.0 });
        input.apply(&HostEvent::Scroll { offset: 40.0 });
        assert_eq!(input.scroll(), 40.0);
    }
}
