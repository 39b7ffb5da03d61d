//! Visualization output.
//!
//! The engine hands a representative sample in `0.0..=1.0` to a
//! [`VisualizationSink`] from the audio thread. Sinks must not block; the
//! default one is an `rtrb` ring buffer whose reader is polled from a UI loop.

use rtrb::{Consumer, Producer, RingBuffer};

/// Ring capacity used by [`PlaybackController`](crate::PlaybackController).
pub const DEFAULT_FEED_CAPACITY: usize = 256;

/// Receives throttled samples on the audio thread.
///
/// Implementations must return promptly and must not call back into the
/// engine. Closures work directly:
///
/// ```
/// use bytebeat_engine::VisualizationSink;
///
/// let mut peak = 0.0f32;
/// let mut sink = |v: f32| peak = peak.max(v);
/// sink.receive(0.5);
/// ```
pub trait VisualizationSink: Send {
    fn receive(&mut self, value: f32);
}

impl<F: FnMut(f32) + Send> VisualizationSink for F {
    #[inline]
    fn receive(&mut self, value: f32) {
        self(value)
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullVisualization;

impl VisualizationSink for NullVisualization {
    #[inline]
    fn receive(&mut self, _value: f32) {}
}

/// Create a lock-free visualization channel.
///
/// ```
/// use bytebeat_engine::{visualization_channel, VisualizationSink};
///
/// let (mut feed, mut reader) = visualization_channel(4);
/// feed.receive(0.25);
/// feed.receive(0.75);
/// assert_eq!(reader.latest(), Some(0.75));
/// assert_eq!(reader.latest(), None);
/// ```
pub fn visualization_channel(capacity: usize) -> (VisualizationFeed, VisualizationReader) {
    let (producer, consumer) = RingBuffer::new(capacity.max(1));
    (
        VisualizationFeed { producer, dropped: 0 },
        VisualizationReader { consumer },
    )
}

/// Producer half, owned by the engine.
pub struct VisualizationFeed {
    producer: Producer<f32>,
    dropped: u64,
}

impl VisualizationFeed {
    /// Values discarded because the reader fell behind.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl VisualizationSink for VisualizationFeed {
    #[inline]
    fn receive(&mut self, value: f32) {
        // fire-and-forget: a full ring drops the newest value
        if self.producer.push(value).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
        }
    }
}

/// Consumer half, polled from the control context.
pub struct VisualizationReader {
    consumer: Consumer<f32>,
}

impl VisualizationReader {
    /// Drain the ring and return the most recent value.
    pub fn latest(&mut self) -> Option<f32> {
        let mut last = None;
        while let Ok(v) = self.consumer.pop() {
            last = Some(v);
        }
        last
    }

    /// Drain every pending value, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = f32> + '_ {
        core::iter::from_fn(|| self.consumer.pop().ok())
    }

    /// Number of values waiting.
    #[inline]
    pub fn pending(&self) -> usize {
        self.consumer.slots()
    }

    /// `true` once the feed has been dropped and everything was read.
    pub fn is_closed(&self) -> bool {
        self.consumer.is_abandoned() && self.consumer.is_empty()
    }
}
