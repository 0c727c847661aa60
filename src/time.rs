//! Frame timing for diagnostics.
//!
//! The animation itself advances by fixed per-frame increments; this timer
//! only feeds FPS numbers into the logs.

use std::time::{Duration, Instant};

/// Frame counter with a periodically refreshed FPS estimate.
#[derive(Debug)]
pub struct FrameTimer {
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a frame. Returns `true` when the FPS estimate was refreshed.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_timer_new() {
        let timer = FrameTimer::new();
        assert_eq!(timer.frame(), 0);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut timer = FrameTimer::new();
        thread::sleep(Duration::from_millis(5));
        timer.tick();
        assert!(timer.delta() >= 0.005);
        timer.tick();
        assert_eq!(timer.frame(), 2);
    }

    #[test]
    fn test_fps_refreshes_after_interval() {
        let mut timer = FrameTimer::new();
        thread::sleep(Duration::from_millis(510));
        assert!(timer.tick());
        assert!(timer.fps() > 0.0);
        assert!(!timer.tick());
    }
}
