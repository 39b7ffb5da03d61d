//! Engine configuration.
//!
//! Every setter clamps instead of rejecting; an out-of-range value never
//! stops audio.

use alloc::string::String;

use crate::timebase::{clamp_fps, DEFAULT_VISUALIZATION_FPS};

pub const MIN_SAMPLE_RATE: u32 = 4000;
pub const MAX_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_SAMPLE_RATE: u32 = 8000;

/// Reference rate used when the engine is not attached to a device. At this
/// rate the time base advances by exactly 1 per sample.
pub const DEFAULT_REFERENCE_RATE: u32 = 8000;

/// Default stride for [`VisualizationThrottle::EveryNthSample`].
pub const DEFAULT_SAMPLE_STRIDE: u32 = 8;

/// Unity gain: normalized samples pass through unchanged.
pub const DEFAULT_OUTPUT_GAIN: f32 = 1.0;

/// Clamp an output gain into `0.0..=1.0`. NaN means unity.
#[inline]
pub fn clamp_output_gain(gain: f32) -> f32 {
    if gain.is_nan() {
        DEFAULT_OUTPUT_GAIN
    } else {
        gain.clamp(0.0, 1.0)
    }
}

/// Clamp a bytebeat sample rate into `4000..=44100` Hz.
#[inline]
pub fn clamp_sample_rate(rate: u32) -> u32 {
    rate.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE)
}

/// How often the engine forwards a sample to the visualization sink.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VisualizationThrottle {
    /// Forward every n-th rendered sample (n >= 1).
    EveryNthSample(u32),
    /// Forward the last sample of a buffer at most once per frame at this
    /// rate (1..=120 fps).
    FrameRate(u32),
}

impl VisualizationThrottle {
    pub fn normalized(self) -> Self {
        match self {
            Self::EveryNthSample(n) => Self::EveryNthSample(n.max(1)),
            Self::FrameRate(fps) => Self::FrameRate(clamp_fps(fps)),
        }
    }
}

impl Default for VisualizationThrottle {
    fn default() -> Self {
        Self::FrameRate(DEFAULT_VISUALIZATION_FPS)
    }
}

/// Startup configuration for a [`SynthesisEngine`](crate::SynthesisEngine) or
/// [`PlaybackController`](crate::PlaybackController).
///
/// ```
/// use bytebeat_engine::{EngineConfig, VisualizationThrottle};
///
/// let config = EngineConfig::default()
///     .with_sample_rate(1_000_000)
///     .with_algorithm("Viznut Original")
///     .with_throttle(VisualizationThrottle::FrameRate(500));
///
/// assert_eq!(config.sample_rate(), 44_100);
/// assert_eq!(config.throttle(), VisualizationThrottle::FrameRate(120));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    sample_rate: u32,
    algorithm: Option<String>,
    throttle: VisualizationThrottle,
    reference_rate: Option<u32>,
    output_gain: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            algorithm: None,
            throttle: VisualizationThrottle::default(),
            reference_rate: None,
            output_gain: DEFAULT_OUTPUT_GAIN,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = clamp_sample_rate(rate);
        self
    }

    /// Initial algorithm. Unknown names fall back to the first registry entry.
    pub fn with_algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = Some(name.into());
        self
    }

    pub fn with_throttle(mut self, throttle: VisualizationThrottle) -> Self {
        self.throttle = throttle.normalized();
        self
    }

    /// Shorthand for `with_throttle(VisualizationThrottle::FrameRate(fps))`.
    pub fn with_visualization_fps(self, fps: u32) -> Self {
        self.with_throttle(VisualizationThrottle::FrameRate(fps))
    }

    /// Fix the reference rate. Without this, a controller uses its sink's
    /// output rate and a standalone engine uses [`DEFAULT_REFERENCE_RATE`].
    pub fn with_reference_rate(mut self, rate: u32) -> Self {
        self.reference_rate = Some(rate.max(1));
        self
    }

    /// Scale applied to every normalized sample, clamped to `0.0..=1.0`.
    pub fn with_output_gain(mut self, gain: f32) -> Self {
        self.output_gain = clamp_output_gain(gain);
        self
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    #[inline]
    pub fn throttle(&self) -> VisualizationThrottle {
        self.throttle
    }

    #[inline]
    pub fn reference_rate(&self) -> Option<u32> {
        self.reference_rate
    }

    #[inline]
    pub fn output_gain(&self) -> f32 {
        self.output_gain
    }
}
