//! Cancellable, self-rescheduling frame task.
//!
//! The host calls [`FrameLoop::begin_frame`] from its redraw callback and
//! schedules the next redraw only when it returns `true`. Cancelling through
//! the loop or any [`CancelHandle`] stops the chain at the next callback; no
//! partial frame is kept.

use std::cell::Cell;
use std::rc::Rc;

/// A repeating per-frame task owned by one animator.
#[derive(Debug)]
pub struct FrameLoop {
    active: Rc<Cell<bool>>,
    frames: u64,
}

impl FrameLoop {
    /// Create a loop that is already running.
    pub fn start() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
            frames: 0,
        }
    }

    /// Handle that stops this loop.
    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            active: Rc::clone(&self.active),
        }
    }

    /// Claim the next frame. Returns `false` once cancelled.
    pub fn begin_frame(&mut self) -> bool {
        if !self.active.get() {
            return false;
        }
        self.frames += 1;
        true
    }

    pub fn cancel(&self) {
        self.active.set(false);
    }

    /// Frames run so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Cancellation handle for a [`FrameLoop`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    active: Rc<Cell<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.active.set(false);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.active.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_until_cancelled() {
        let mut frame_loop = FrameLoop::start();
        assert!(frame_loop.begin_frame());
        assert!(frame_loop.begin_frame());
        assert_eq!(frame_loop.frames(), 2);

        frame_loop.cancel();
        assert!(frame_loop.handle().is_cancelled());
        assert!(!frame_loop.begin_frame());
        assert_eq!(frame_loop.frames(), 2);
    }

    #[test]
    fn test_handle_cancels_loop() {
        let mut frame_loop = FrameLoop::start();
        let handle = frame_loop.handle();
        assert!(!handle.is_cancelled());

        handle.clone().cancel();
        assert!(handle.is_cancelled());
        assert!(!frame_loop.begin_frame());
    }

    #[test]
    fn test_cancel_twice() {
        let frame_loop = FrameLoop::start();
        let handle = frame_loop.handle();
        handle.cancel();
        handle.cancel();
        frame_loop.cancel();
        assert!(handle.is_cancelled());
    }
}
