//! Frame clock driving the galaxy animation.
//!
//! Rotation and the wave are functions of elapsed time alone, so pausing the
//! clock freezes the galaxy exactly where it is.

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Pausable animation clock with an FPS readout for the window title.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    elapsed_secs: f32,
    /// Set while paused.
    paused_at: Option<Instant>,
    /// Total time spent paused, excluded from `elapsed`.
    paused_total: Duration,
    fps: f32,
    fps_frames: u32,
    fps_window_start: Instant,
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            elapsed_secs: 0.0,
            paused_at: None,
            paused_total: Duration::ZERO,
            fps: 0.0,
            fps_frames: 0,
            fps_window_start: now,
        }
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns seconds since start, excluding pauses. While paused the value
    /// does not move and no frames are counted.
    pub fn update(&mut self) -> f32 {
        if self.paused_at.is_some() {
            return self.elapsed_secs;
        }

        let now = Instant::now();
        self.elapsed_secs = (now.duration_since(self.start) - self.paused_total).as_secs_f32();

        self.fps_frames += 1;
        let window = now.duration_since(self.fps_window_start);
        if window >= FPS_WINDOW {
            self.fps = self.fps_frames as f32 / window.as_secs_f32();
            self.fps_frames = 0;
            self.fps_window_start = now;
        }

        self.elapsed_secs
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Frames per second, averaged over the last half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn toggle_pause(&mut self) {
        let now = Instant::now();
        match self.paused_at.take() {
            Some(since) => {
                self.paused_total += now.duration_since(since);
                // Don't count the pause against the frame rate
                self.fps_frames = 0;
                self.fps_window_start = now;
            }
            None => self.paused_at = Some(now),
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.fps(), 0.0);
        assert!(!time.is_paused());
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let elapsed = time.update();

        assert!(elapsed > 0.0);
        assert_eq!(time.elapsed(), elapsed);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut time = Time::new();
        time.update();

        time.toggle_pause();
        assert!(time.is_paused());

        let elapsed_before = time.elapsed();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(time.update(), elapsed_before);
    }

    #[test]
    fn test_resume_skips_paused_span() {
        let mut time = Time::new();
        time.update();
        time.toggle_pause();
        thread::sleep(Duration::from_millis(50));
        time.toggle_pause();
        assert!(!time.is_paused());

        assert!(time.update() < 0.045);
    }

    #[test]
    fn test_fps_reported_after_window() {
        let mut time = Time::new();
        for _ in 0..5 {
            thread::sleep(Duration::from_millis(110));
            time.update();
        }
        assert!(time.fps() > 0.0);
        assert!(time.fps() < 20.0);
    }
}
