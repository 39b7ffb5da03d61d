//! Error types.
//!
//! Only the control context ever sees these. The audio callback has no
//! failure path: unknown algorithms fall back to the first registry entry and
//! out-of-range settings are clamped.

use thiserror::Error;

/// Failures reported by an [`AudioSink`](crate::sink::AudioSink).
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("no output device available")]
    NoDevice,

    #[error("failed to query output config: {0}")]
    Config(String),

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to build output stream: {0}")]
    Build(String),

    #[error("failed to resume output stream: {0}")]
    Resume(String),

    #[error("failed to suspend output stream: {0}")]
    Suspend(String),

    #[error("sink is not open")]
    NotOpen,

    #[error("sink is already open")]
    AlreadyOpen,
}

/// Errors returned by [`PlaybackController`](crate::PlaybackController).
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio sink failed: {0}")]
    Sink(#[from] SinkError),

    #[error("playback controller has been shut down")]
    ShutDown,
}

/// Errors returned while building a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("registry needs at least one algorithm")]
    Empty,

    #[error("algorithm already registered: {0}")]
    DuplicateName(&'static str),
}
