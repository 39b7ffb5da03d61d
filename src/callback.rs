//! The audio-thread callback contract.

/// Information available during rendering.
///
/// Passed to every [`RenderCallback::render`] call by the sink that owns the
/// callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessContext {
    /// Output rate of the sink in Hz (e.g. 44100, 48000)
    pub sample_rate: u32,
    /// Interleaved channels per frame
    pub channels: usize,
}

/// Something a sink can call once per hardware buffer.
///
/// Sinks hand over an interleaved `f32` buffer; the callback must fill all of
/// it with samples in `-1.0..=1.0`. This runs on the real-time audio thread:
/// no locks, no I/O, no allocation.
///
/// ```
/// use bytebeat_engine::{ProcessContext, RenderCallback};
///
/// struct Silence;
///
/// impl RenderCallback for Silence {
///     fn render(&mut self, _ctx: &ProcessContext, output: &mut [f32]) {
///         output.fill(0.0);
///     }
/// }
/// ```
pub trait RenderCallback: Send + 'static {
    fn render(&mut self, ctx: &ProcessContext, output: &mut [f32]);
}
