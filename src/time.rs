//! Frame clock and per-variant time normalization.
//!
//! [`Clock`] is the single source of elapsed wall-clock time for a running
//! visualization. Field variants never see raw elapsed time: each one
//! declares a [`TimeWrap`] that folds elapsed seconds into its period
//! before evaluation, so the animation loops instead of drifting.
//!
//! ```ignore
//! let mut clock = Clock::new();
//! clock.update();
//! let t = TimeWrap::DECADE.apply(clock.elapsed());
//! assert!(t < 10.0);
//! ```

use std::time::{Duration, Instant};

/// How elapsed seconds are folded before a field sees them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeWrap {
    /// `elapsed mod period`.
    Periodic(f32),
    /// Raw elapsed time.
    Unbounded,
}

impl TimeWrap {
    /// One-second loop.
    pub const UNIT: TimeWrap = TimeWrap::Periodic(1.0);
    /// Ten-second loop.
    pub const DECADE: TimeWrap = TimeWrap::Periodic(10.0);

    /// A loop of `period` seconds, or `None` unless `period` is finite and
    /// strictly positive.
    pub fn periodic(period: f32) -> Option<TimeWrap> {
        (period.is_finite() && period > 0.0).then_some(TimeWrap::Periodic(period))
    }

    /// Fold `elapsed` into `[0, period)`.
    ///
    /// A `Periodic` wrap with an unusable period passes time through
    /// unchanged, like `Unbounded`.
    #[inline]
    pub fn apply(&self, elapsed: f32) -> f32 {
        match self.period() {
            Some(period) => elapsed.rem_euclid(period),
            None => elapsed,
        }
    }

    /// Fold a high-precision elapsed time, narrowing only the result.
    #[inline]
    pub fn apply_precise(&self, elapsed: f64) -> f32 {
        match self.period() {
            Some(period) => elapsed.rem_euclid(period as f64) as f32,
            None => elapsed as f32,
        }
    }

    /// Loop length, if any. `None` for `Unbounded` and for a period that is
    /// not finite and strictly positive.
    pub fn period(&self) -> Option<f32> {
        match *self {
            TimeWrap::Periodic(period) if period.is_finite() && period > 0.0 => Some(period),
            _ => None,
        }
    }
}

/// Monotonic frame clock.
///
/// Tracks elapsed time, per-frame delta, frame count and a smoothed FPS
/// figure. Supports pausing and a speed multiplier.
#[derive(Debug)]
pub struct Clock {
    last_frame: Instant,
    // Accumulated in f64 so small deltas are not rounded away on long runs
    elapsed_secs: f64,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    time_scale: f32,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns `true` when a new FPS sample was taken this frame.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(raw_delta);

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

    /// Step the clock by `raw_delta` real seconds.
    ///
    /// Used by [`update`](Self::update) and by headless drivers that supply
    /// their own timestep. Elapsed time never decreases.
    pub fn advance(&mut self, raw_delta: f32) {
        if self.paused {
            self.delta_secs = 0.0;
            return;
        }
        self.delta_secs = raw_delta.max(0.0) * self.time_scale;
        self.elapsed_secs += self.delta_secs as f64;
        self.frame_count += 1;
    }

    /// Total scaled seconds since start, excluding paused spans.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs as f32
    }

    /// [`elapsed`](Self::elapsed) without narrowing to `f32`.
    #[inline]
    pub fn elapsed_precise(&self) -> f64 {
        self.elapsed_secs
    }

    /// Scaled seconds covered by the last frame.
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

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            // Don't count the paused span as one giant frame
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Speed multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
