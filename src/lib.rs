//! Real-time bytebeat synthesis.
//!
//! Design principles:
//! - Formulas are plain `fn(i32) -> i32` pointers with 32-bit wrapping arithmetic
//! - The audio thread reads parameters from atomics, never from locks
//! - Visualization is fire-and-forget through a lock-free ring buffer
//! - Sinks own the real-time clock; the engine is just a callback
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use bytebeat_engine::{EngineConfig, PlaybackController, PullSink, Registry};
//!
//! let registry = Arc::new(Registry::builtin());
//! let mut player = PlaybackController::new(
//!     PullSink::mono(8000),
//!     registry,
//!     EngineConfig::default().with_algorithm("Glitch Bass"),
//! );
//!
//! player.start().unwrap();
//! let mut block = [0.0f32; 1024];
//! player.sink_mut().pull(&mut block);
//!
//! player.set_sample_rate(11_025);
//! player.set_algorithm("Cosmic Drift");
//! player.sink_mut().pull(&mut block);
//!
//! player.shutdown();
//! ```

extern crate alloc;

mod algorithm;
mod callback;
mod config;
mod engine;
mod error;
pub mod formulas;
mod playback;
mod registry;
pub mod sink;
mod timebase;
mod visualization;

#[cfg(feature = "cpal_sink")]
mod device;

pub use algorithm::{Algorithm, Category, Formula};
pub use callback::{ProcessContext, RenderCallback};
pub use config::{
    clamp_output_gain, clamp_sample_rate, EngineConfig, VisualizationThrottle,
    DEFAULT_OUTPUT_GAIN, DEFAULT_REFERENCE_RATE, DEFAULT_SAMPLE_RATE, DEFAULT_SAMPLE_STRIDE,
    MAX_SAMPLE_RATE, MIN_SAMPLE_RATE,
};
pub use engine::{normalize, EngineHandle, SynthesisEngine};
pub use error::{PlaybackError, RegistryError, SinkError};
pub use playback::{PlaybackController, PlaybackState};
pub use registry::Registry;
pub use sink::{AudioSink, PullSink};
pub use timebase::{
    clamp_fps, TimeBase, DEFAULT_VISUALIZATION_FPS, MAX_VISUALIZATION_FPS, MIN_VISUALIZATION_FPS,
    TIME_MODULUS,
};
pub use visualization::{
    visualization_channel, NullVisualization, VisualizationFeed, VisualizationReader,
    VisualizationSink, DEFAULT_FEED_CAPACITY,
};

#[cfg(feature = "cpal_sink")]
pub use device::CpalDevice;
#[cfg(feature = "cpal_sink")]
pub use sink::CpalSink;
