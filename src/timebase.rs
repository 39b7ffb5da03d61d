//! Logical time for bytebeat formulas.

use std::time::{Duration, Instant};

/// The accumulator wraps here. The cycle is part of the sound: patterns
/// restart roughly every 2 minutes at the default 8 kHz.
pub const TIME_MODULUS: f64 = 1_000_000.0;

/// Value of `t` after [`TimeBase::reset`].
pub const INITIAL_TIME: f64 = 1.0;

pub const MIN_VISUALIZATION_FPS: u32 = 1;
pub const MAX_VISUALIZATION_FPS: u32 = 120;
pub const DEFAULT_VISUALIZATION_FPS: u32 = 60;

/// Clamp a visualization rate into `1..=120` fps.
#[inline]
pub fn clamp_fps(fps: u32) -> u32 {
    fps.clamp(MIN_VISUALIZATION_FPS, MAX_VISUALIZATION_FPS)
}

#[inline]
fn frame_interval(fps: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(clamp_fps(fps)))
}

/// Logical time counter and visualization frame clock.
///
/// `t` is a fractional accumulator advanced once per output sample by the
/// current rate ratio. Formulas see `floor(t)`.
///
/// Every operation that reads the wall clock has an `_at` twin taking the
/// reading explicitly, so the frame gate can be driven by a simulated clock.
///
/// # Example
///
/// ```
/// use bytebeat_engine::TimeBase;
///
/// let mut time = TimeBase::new();
/// assert_eq!(time.advance(1.0), 2);
/// assert_eq!(time.advance(0.5), 2);
/// assert_eq!(time.advance(0.5), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeBase {
    t: f64,
    frame_interval: Duration,
    last_frame: Instant,
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeBase {
    pub fn new() -> Self {
        Self::new_at(Instant::now())
    }

    pub fn new_at(now: Instant) -> Self {
        Self {
            t: INITIAL_TIME,
            frame_interval: frame_interval(DEFAULT_VISUALIZATION_FPS),
            last_frame: now,
        }
    }

    /// `t = 1` and restart the frame clock.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.t = INITIAL_TIME;
        self.last_frame = now;
    }

    /// Restart the frame clock without touching `t`.
    ///
    /// Called when a session resumes, so frames missed while paused are not
    /// emitted in a burst.
    pub fn reset_clock_at(&mut self, now: Instant) {
        self.last_frame = now;
    }

    /// Set the visualization rate. Returns the clamped value actually used.
    pub fn set_target_visualization_rate(&mut self, fps: u32) -> u32 {
        let fps = clamp_fps(fps);
        self.frame_interval = frame_interval(fps);
        fps
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Advance by `rate_ratio` and return the floored time.
    #[inline]
    pub fn advance(&mut self, rate_ratio: f64) -> u32 {
        debug_assert!(rate_ratio.is_finite() && rate_ratio >= 0.0);
        self.t = (self.t + rate_ratio).rem_euclid(TIME_MODULUS);
        self.t as u32
    }

    #[inline]
    pub fn current_time(&self) -> u32 {
        self.t as u32
    }

    /// The raw fractional accumulator.
    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.t
    }

    /// Restore a previously published accumulator. Non-finite values are ignored.
    pub fn seed(&mut self, t: f64) {
        if t.is_finite() {
            self.t = t.rem_euclid(TIME_MODULUS);
        }
    }

    pub fn with_time(mut self, t: f64) -> Self {
        self.seed(t);
        self
    }

    pub fn should_emit_visualization_frame(&mut self) -> bool {
        self.should_emit_visualization_frame_at(Instant::now())
    }

    /// `true` once per frame interval.
    ///
    /// On `true` the last-frame mark moves forward by exactly one interval, so
    /// rounding never accumulates into a frequency error.
    ///
    /// The one exception is a stall: once the mark is two or more intervals
    /// behind (the audio thread was descheduled, or the host stopped pulling),
    /// it snaps to `now`, so missed frames are never emitted as a burst.
    /// Resuming after `stop` does not rely on this; the engine calls
    /// [`reset_clock_at`](Self::reset_clock_at) for that.
    pub fn should_emit_visualization_frame_at(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last_frame);
        if elapsed < self.frame_interval {
            return false;
        }

        if elapsed >= self.frame_interval * 2 {
            self.last_frame = now;
        } else {
            self.last_frame += self.frame_interval;
        }
        true
    }
}
