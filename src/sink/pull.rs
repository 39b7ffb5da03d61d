//! A sink driven by the caller.

use alloc::boxed::Box;

use crate::callback::{ProcessContext, RenderCallback};
use crate::error::SinkError;
use crate::sink::AudioSink;

/// A sink that renders only when the host asks.
///
/// Useful for:
/// - Embedding the engine in an existing audio callback
/// - Deterministic tests of the playback lifecycle
///
/// [`pull`](Self::pull) stands in for the hardware buffer request: while the
/// sink is suspended (or not open) it writes silence without touching the
/// callback.
pub struct PullSink {
    ctx: ProcessContext,
    callback: Option<Box<dyn RenderCallback>>,
    running: bool,
    fail_next_open: bool,
    fail_next_resume: bool,
    callbacks: u64,
}

impl PullSink {
    pub fn new(sample_rate: u32, channels: usize) -> Self {
        Self {
            ctx: ProcessContext {
                sample_rate,
                channels: channels.max(1),
            },
            callback: None,
            running: false,
            fail_next_open: false,
            fail_next_resume: false,
            callbacks: 0,
        }
    }

    /// Create a sink for mono audio
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 1)
    }

    /// Make the next [`open`](AudioSink::open) fail, as if no device were present.
    pub fn fail_next_open(&mut self) {
        self.fail_next_open = true;
    }

    /// Make the next [`resume`](AudioSink::resume) fail.
    pub fn fail_next_resume(&mut self) {
        self.fail_next_resume = true;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// How many times the callback has been invoked.
    #[inline]
    pub fn callbacks(&self) -> u64 {
        self.callbacks
    }

    /// Fill `output` from the callback. Returns `true` if the callback ran.
    pub fn pull(&mut self, output: &mut [f32]) -> bool {
        match self.callback.as_mut() {
            Some(callback) if self.running => {
                callback.render(&self.ctx, output);
                self.callbacks += 1;
                true
            }
            _ => {
                output.fill(0.0);
                false
            }
        }
    }
}

impl AudioSink for PullSink {
    fn sample_rate(&self) -> u32 {
        self.ctx.sample_rate
    }

    fn channels(&self) -> usize {
        self.ctx.channels
    }

    fn is_open(&self) -> bool {
        self.callback.is_some()
    }

    fn open(&mut self, callback: Box<dyn RenderCallback>) -> Result<(), SinkError> {
        if self.callback.is_some() {
            return Err(SinkError::AlreadyOpen);
        }
        if core::mem::take(&mut self.fail_next_open) {
            return Err(SinkError::NoDevice);
        }
        self.callback = Some(callback);
        self.running = false;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), SinkError> {
        if self.callback.is_none() {
            return Err(SinkError::NotOpen);
        }
        if core::mem::take(&mut self.fail_next_resume) {
            return Err(SinkError::Resume("simulated resume failure".into()));
        }
        self.running = true;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), SinkError> {
        if self.callback.is_none() {
            return Err(SinkError::NotOpen);
        }
        self.running = false;
        Ok(())
    }

    fn close(&mut self) {
        self.running = false;
        self.callback = None;
    }
}
