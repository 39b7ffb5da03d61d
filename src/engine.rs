//! The synthesis engine and its control handle.
//!
//! [`SynthesisEngine`] lives on the audio thread. [`EngineHandle`] is the
//! control-side view of the same session: it writes the selected sample rate
//! and algorithm into atomics that the engine reads on every sample, and
//! reads back the published time and sample count.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::callback::{ProcessContext, RenderCallback};
use crate::config::{
    clamp_output_gain, clamp_sample_rate, EngineConfig, VisualizationThrottle,
    DEFAULT_REFERENCE_RATE,
};
use crate::registry::Registry;
use crate::timebase::{TimeBase, INITIAL_TIME};
use crate::visualization::{NullVisualization, VisualizationSink};

/// Per-sample coefficient of the output gain smoother (0.0 = instant).
const GAIN_SMOOTHING: f32 = 0.995;

/// Map a byte sample onto `-1.0..=1.0`.
#[inline]
pub fn normalize(sample: u8) -> f32 {
    (f32::from(sample) / 128.0 - 1.0).clamp(-1.0, 1.0)
}

/// State shared between the control context and the audio thread.
///
/// Single writer per field: setters on the control side, `time_bits` and
/// `samples_rendered` on the audio side.
#[derive(Debug)]
pub(crate) struct SharedState {
    sample_rate: AtomicU32,
    algorithm: AtomicUsize,
    /// `f32` gain bits
    output_gain: AtomicU32,
    connected: AtomicBool,
    reset_clock: AtomicBool,
    /// `f64` accumulator bits
    time_bits: AtomicU64,
    samples_rendered: AtomicU64,
}

impl SharedState {
    fn new(sample_rate: u32, algorithm: usize, output_gain: f32) -> Self {
        Self {
            sample_rate: AtomicU32::new(clamp_sample_rate(sample_rate)),
            algorithm: AtomicUsize::new(algorithm),
            output_gain: AtomicU32::new(clamp_output_gain(output_gain).to_bits()),
            connected: AtomicBool::new(false),
            reset_clock: AtomicBool::new(false),
            time_bits: AtomicU64::new(INITIAL_TIME.to_bits()),
            samples_rendered: AtomicU64::new(0),
        }
    }
}

/// Control-side handle to a running engine.
///
/// Cheap to clone. All methods are lock-free and safe to call from any thread.
///
/// A rate change is picked up on the next sample. An algorithm change is
/// picked up on the next buffer, not the next sample: the buffer being
/// rendered when [`set_algorithm`](Self::set_algorithm) lands finishes with
/// the formula it started with.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    registry: Arc<Registry>,
    shared: Arc<SharedState>,
}

impl EngineHandle {
    pub(crate) fn new(registry: Arc<Registry>, config: &EngineConfig) -> Self {
        let algorithm = config.algorithm().map_or(0, |name| registry.resolve(name));
        Self {
            shared: Arc::new(SharedState::new(
                config.sample_rate(),
                algorithm,
                config.output_gain(),
            )),
            registry,
        }
    }

    /// Set the bytebeat sample rate, clamped to `4000..=44100` Hz. Returns the
    /// stored value.
    pub fn set_sample_rate(&self, rate: u32) -> u32 {
        let rate = clamp_sample_rate(rate);
        self.shared.sample_rate.store(rate, Ordering::Relaxed);
        debug!(rate, "sample rate set");
        rate
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.shared.sample_rate.load(Ordering::Relaxed)
    }

    /// Select an algorithm by name. Unknown names select the first entry.
    /// Returns the algorithm that will actually play.
    pub fn set_algorithm(&self, name: &str) -> &Algorithm {
        let index = self.registry.resolve(name);
        self.shared.algorithm.store(index, Ordering::Relaxed);
        let algorithm = self.registry.get_or_first(index);
        debug!(algorithm = algorithm.name(), "algorithm selected");
        algorithm
    }

    /// Set the output gain, clamped to `0.0..=1.0`. The engine glides to the
    /// new value over a few milliseconds. Returns the stored value.
    pub fn set_output_gain(&self, gain: f32) -> f32 {
        let gain = clamp_output_gain(gain);
        self.shared.output_gain.store(gain.to_bits(), Ordering::Relaxed);
        debug!(gain, "output gain set");
        gain
    }

    #[inline]
    pub fn output_gain(&self) -> f32 {
        f32::from_bits(self.shared.output_gain.load(Ordering::Relaxed))
    }

    pub fn algorithm(&self) -> &Algorithm {
        self.registry
            .get_or_first(self.shared.algorithm.load(Ordering::Relaxed))
    }

    /// `floor(t)` as of the last rendered buffer.
    pub fn current_time(&self) -> u32 {
        self.time_accumulator() as u32
    }

    pub fn time_accumulator(&self) -> f64 {
        f64::from_bits(self.shared.time_bits.load(Ordering::Relaxed))
    }

    /// Total samples rendered over the engine's lifetime.
    pub fn samples_rendered(&self) -> u64 {
        self.shared.samples_rendered.load(Ordering::Relaxed)
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Whether the callback is currently allowed to synthesize.
    pub fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::Acquire)
    }

    pub(crate) fn connect(&self) {
        self.shared.reset_clock.store(true, Ordering::Release);
        self.shared.connected.store(true, Ordering::Release);
    }

    pub(crate) fn disconnect(&self) {
        self.shared.connected.store(false, Ordering::Release);
    }
}

/// Renders bytebeat audio, one formula evaluation per frame.
///
/// For every frame the engine advances its [`TimeBase`] by
/// `sample_rate / reference_rate`, evaluates the selected algorithm, maps the
/// byte onto `-1.0..=1.0` and writes it to every channel. The written value is
/// scaled by a smoothed output gain in `0.0..=1.0`. A throttled copy of the
/// byte (scaled to `0.0..=1.0`, before gain) goes to the visualization sink.
///
/// Used directly, [`render_at`](Self::render_at) always synthesizes. Handed to
/// a sink as a [`RenderCallback`], the engine only synthesizes while its
/// [`PlaybackController`](crate::PlaybackController) has it connected and
/// writes silence otherwise.
///
/// ```
/// use std::sync::Arc;
/// use std::time::Instant;
/// use bytebeat_engine::{EngineConfig, Registry, SynthesisEngine};
///
/// let registry = Arc::new(Registry::builtin());
/// let config = EngineConfig::default().with_algorithm("Viznut Original");
/// let mut engine = SynthesisEngine::new(registry, &config);
///
/// let mut buffer = [0.0f32; 512];
/// engine.render_at(&mut buffer, 1, Instant::now());
/// assert_eq!(engine.handle().current_time(), 513);
/// assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)));
/// ```
pub struct SynthesisEngine {
    registry: Arc<Registry>,
    shared: Arc<SharedState>,
    time_base: TimeBase,
    reference_rate: f64,
    throttle: VisualizationThrottle,
    visualization: Box<dyn VisualizationSink>,
    rendered: u64,
    smoothed_gain: f32,
}

impl SynthesisEngine {
    /// A standalone engine with its own shared state.
    pub fn new(registry: Arc<Registry>, config: &EngineConfig) -> Self {
        let handle = EngineHandle::new(registry, config);
        let reference_rate = config.reference_rate().unwrap_or(DEFAULT_REFERENCE_RATE);
        Self::attach(&handle, config, reference_rate)
    }

    /// An engine continuing the session behind `handle`: time and sample
    /// count pick up where the last engine published them.
    pub(crate) fn attach(handle: &EngineHandle, config: &EngineConfig, reference_rate: u32) -> Self {
        let throttle = config.throttle();
        let mut time_base = TimeBase::new().with_time(handle.time_accumulator());
        if let VisualizationThrottle::FrameRate(fps) = throttle {
            time_base.set_target_visualization_rate(fps);
        }

        Self {
            registry: handle.registry.clone(),
            shared: handle.shared.clone(),
            time_base,
            reference_rate: f64::from(reference_rate.max(1)),
            throttle,
            visualization: Box::new(NullVisualization),
            rendered: handle.samples_rendered(),
            smoothed_gain: handle.output_gain(),
        }
    }

    /// Route throttled samples to `sink` (builder pattern).
    pub fn with_visualization<V: VisualizationSink + 'static>(mut self, sink: V) -> Self {
        self.visualization = Box::new(sink);
        self
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            registry: self.registry.clone(),
            shared: self.shared.clone(),
        }
    }

    #[inline]
    pub fn time_base(&self) -> &TimeBase {
        &self.time_base
    }

    #[inline]
    pub fn reference_rate(&self) -> u32 {
        self.reference_rate as u32
    }

    #[inline]
    pub fn throttle(&self) -> VisualizationThrottle {
        self.throttle
    }

    /// Fill `output` (interleaved, `channels` per frame) using `now` as the
    /// frame-clock reading. Returns the number of frames rendered.
    ///
    /// A trailing partial frame is rendered like a full one.
    pub fn render_at(&mut self, output: &mut [f32], channels: usize, now: Instant) -> usize {
        let channels = channels.max(1);
        let mut last = None;
        let mut frames = 0;

        // one formula per buffer
        let algorithm = *self
            .registry
            .get_or_first(self.shared.algorithm.load(Ordering::Relaxed));
        let target_gain = f32::from_bits(self.shared.output_gain.load(Ordering::Relaxed));

        for frame in output.chunks_mut(channels) {
            let rate = self.shared.sample_rate.load(Ordering::Relaxed);
            let t = self.time_base.advance(f64::from(rate) / self.reference_rate);

            let sample = algorithm.evaluate(t);
            self.smoothed_gain = target_gain + (self.smoothed_gain - target_gain) * GAIN_SMOOTHING;
            frame.fill(normalize(sample) * self.smoothed_gain);

            self.rendered = self.rendered.wrapping_add(1);
            if let VisualizationThrottle::EveryNthSample(n) = self.throttle {
                if self.rendered % u64::from(n) == 0 {
                    self.visualization.receive(f32::from(sample) / 255.0);
                }
            }

            last = Some(sample);
            frames += 1;
        }

        if let (VisualizationThrottle::FrameRate(_), Some(sample)) = (self.throttle, last) {
            if self.time_base.should_emit_visualization_frame_at(now) {
                self.visualization.receive(f32::from(sample) / 255.0);
            }
        }

        self.shared
            .time_bits
            .store(self.time_base.accumulator().to_bits(), Ordering::Relaxed);
        self.shared.samples_rendered.store(self.rendered, Ordering::Relaxed);

        frames
    }
}

impl RenderCallback for SynthesisEngine {
    fn render(&mut self, ctx: &ProcessContext, output: &mut [f32]) {
        if !self.shared.connected.load(Ordering::Acquire) {
            output.fill(0.0);
            return;
        }

        let now = Instant::now();
        if self.shared.reset_clock.swap(false, Ordering::AcqRel) {
            self.time_base.reset_clock_at(now);
        }
        self.render_at(output, ctx.channels, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_the_byte_range() {
        assert_eq!(normalize(0), -1.0);
        assert_eq!(normalize(128), 0.0);
        assert!((normalize(255) - 0.992_187_5).abs() < 1e-6);
    }

    #[test]
    fn disconnected_callback_writes_silence() {
        let mut engine = SynthesisEngine::new(Arc::new(Registry::builtin()), &EngineConfig::default());
        let ctx = ProcessContext { sample_rate: 8000, channels: 1 };
        let mut buffer = [0.5f32; 64];

        engine.render(&ctx, &mut buffer);

        assert!(buffer.iter().all(|&s| s == 0.0));
        assert_eq!(engine.handle().current_time(), 1);
    }
}
