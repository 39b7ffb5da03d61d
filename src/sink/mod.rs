//! Audio sinks.
//!
//! A sink owns the real-time clock: once opened with a [`RenderCallback`] it
//! calls it once per hardware buffer, on its own thread, while resumed.
//!
//! - [`PullSink`] - driven by the host's own audio loop (and by tests)
//! - [`CpalSink`] - a cpal output stream (requires the `cpal_sink` feature)

use alloc::boxed::Box;

use crate::callback::RenderCallback;
use crate::error::SinkError;

pub mod pull;
pub use pull::PullSink;

#[cfg(feature = "cpal_sink")]
pub mod cpal_sink;
#[cfg(feature = "cpal_sink")]
pub use cpal_sink::CpalSink;

/// The output device collaborator.
///
/// Lifecycle: `open` once with the callback, then any number of
/// `resume`/`suspend` pairs, then `close`. A freshly opened sink is suspended.
pub trait AudioSink {
    /// Output rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Interleaved channels per frame.
    fn channels(&self) -> usize;

    fn is_open(&self) -> bool;

    /// Acquire the device and install `callback`. On failure the callback is
    /// dropped and the sink stays closed.
    fn open(&mut self, callback: Box<dyn RenderCallback>) -> Result<(), SinkError>;

    /// Start (or restart) invoking the callback.
    fn resume(&mut self) -> Result<(), SinkError>;

    /// Stop invoking the callback. The device stays acquired.
    fn suspend(&mut self) -> Result<(), SinkError>;

    /// Release the device and drop the callback.
    fn close(&mut self);
}
