//! Time management utilities
//!
//! [`FrameClock`] supplies timing to every per-frame update and only advances
//! between an explicit `start()` / `stop()` pair. [`FrameStats`] is the
//! optional performance overlay sampled around each frame tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Session clock for frame timing
///
/// Constructed stopped. `get_delta()` returns the seconds since the previous
/// call (or since `start()` on the first call) and advances `elapsed`.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    running: bool,
    elapsed: f32,
    last_time: Option<Instant>,
}

impl FrameClock {
    /// Create a new stopped clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the clock, resetting elapsed time
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = 0.0;
        self.last_time = Some(Instant::now());
    }

    /// Stop the clock, folding the time since the last delta into `elapsed`
    pub fn stop(&mut self) {
        if self.running {
            self.get_delta();
        }
        self.running = false;
        self.last_time = None;
    }

    /// Seconds since the previous call; 0.0 while stopped
    pub fn get_delta(&mut self) -> f32 {
        if !self.running {
            return 0.0;
        }
        let now = Instant::now();
        let delta = self
            .last_time
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_time = Some(now);
        self.elapsed += delta;
        delta
    }

    /// Total seconds accumulated since `start()`
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the clock is between `start()` and `stop()`
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Rolling frame-time statistics
///
/// `begin()` / `end()` bracket one frame tick; the last `window` samples are
/// kept for the average.
#[derive(Debug, Clone)]
pub struct FrameStats {
    sample_start: Option<Instant>,
    samples: VecDeque<Duration>,
    window: usize,
    frame_count: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(120)
    }
}

impl FrameStats {
    /// Create stats keeping `window` samples (at least one)
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            sample_start: None,
            samples: VecDeque::with_capacity(window),
            window,
            frame_count: 0,
        }
    }

    /// Mark the start of a performance sample
    pub fn begin(&mut self) {
        self.sample_start = Some(Instant::now());
    }

    /// Mark the end of the current sample; ignored without a matching `begin()`
    pub fn end(&mut self) {
        let Some(start) = self.sample_start.take() else {
            return;
        };
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(start.elapsed());
        self.frame_count += 1;

        if self.frame_count % self.window as u64 == 0 {
            log::debug!(
                "Frame stats: {:.3} ms average over {} frames ({} total)",
                self.average_frame_ms(),
                self.samples.len(),
                self.frame_count
            );
        }
    }

    /// Number of completed samples
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average sampled frame time in milliseconds
    pub fn average_frame_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: Duration = self.samples.iter().sum();
        total.as_secs_f32() * 1000.0 / self.samples.len() as f32
    }

    /// Frames per second implied by the average frame time
    pub fn fps(&self) -> f32 {
        let ms = self.average_frame_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }

    /// Clear all samples
    pub fn reset(&mut self) {
        self.sample_start = None;
        self.samples.clear();
        self.frame_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_stopped_until_started() {
        let mut clock = FrameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.get_delta(), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_clock_accumulates_deltas() {
        let mut clock = FrameClock::new();
        clock.start();
        std::thread::sleep(Duration::from_millis(2));
        let first = clock.get_delta();
        let second = clock.get_delta();
        assert!(first > 0.0);
        assert!(second >= 0.0);
        assert!((clock.elapsed() - (first + second)).abs() < 1e-6);
    }

    #[test]
    fn test_clock_stop_freezes_elapsed() {
        let mut clock = FrameClock::new();
        clock.start();
        clock.stop();
        let frozen = clock.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.get_delta(), 0.0);
        assert_eq!(clock.elapsed(), frozen);
    }

    #[test]
    fn test_clock_restart_resets_elapsed() {
        let mut clock = FrameClock::new();
        clock.start();
        std::thread::sleep(Duration::from_millis(2));
        clock.get_delta();
        clock.stop();
        clock.start();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_stats_window_is_bounded() {
        let mut stats = FrameStats::new(3);
        for _ in 0..5 {
            stats.begin();
            stats.end();
        }
        assert_eq!(stats.frame_count(), 5);
        assert_eq!(stats.samples.len(), 3);
    }

    #[test]
    fn test_stats_end_without_begin_is_ignored() {
        let mut stats = FrameStats::default();
        stats.end();
        assert_eq!(stats.frame_count(), 0);
        assert_eq!(stats.average_frame_ms(), 0.0);
    }
}
