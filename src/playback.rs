//! Playback lifecycle.

use alloc::boxed::Box;
use alloc::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::algorithm::Algorithm;
use crate::config::EngineConfig;
use crate::engine::{EngineHandle, SynthesisEngine};
use crate::error::PlaybackError;
use crate::registry::Registry;
use crate::sink::AudioSink;
use crate::visualization::{
    visualization_channel, VisualizationFeed, VisualizationReader, DEFAULT_FEED_CAPACITY,
};

/// Where a [`PlaybackController`] is in its lifecycle.
///
/// `Starting` and `Stopping` are only observable while `start`/`stop` run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlaybackState {
    Stopped,
    Starting,
    Playing,
    Stopping,
}

/// Owns an [`AudioSink`] and the engine session feeding it.
///
/// The controller lives in the control context. It opens the sink lazily on
/// the first [`start`](Self::start), hands it a [`SynthesisEngine`], and from
/// then on only flips the engine's connection gate and the sink's run state.
/// Sample rate and algorithm changes go through atomics: a new rate applies
/// from the next sample, a new algorithm from the next buffer. `t` is never
/// reset by start/stop.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use bytebeat_engine::{EngineConfig, PlaybackController, PullSink, Registry};
///
/// let mut player = PlaybackController::new(
///     PullSink::mono(8000),
///     Arc::new(Registry::builtin()),
///     EngineConfig::default().with_algorithm("Viznut Original"),
/// );
///
/// player.start().unwrap();
/// let mut buffer = [0.0f32; 8000];
/// player.sink_mut().pull(&mut buffer);
/// assert_eq!(player.current_time(), 8001);
///
/// player.stop();
/// player.stop(); // idempotent
/// ```
pub struct PlaybackController<S: AudioSink> {
    sink: S,
    handle: EngineHandle,
    config: EngineConfig,
    visualization: VisualizationReader,
    pending_feed: Option<VisualizationFeed>,
    state: PlaybackState,
    last_process_time: Option<Instant>,
    shut_down: bool,
}

impl<S: AudioSink> PlaybackController<S> {
    pub fn new(sink: S, registry: Arc<Registry>, config: EngineConfig) -> Self {
        let (feed, visualization) = visualization_channel(DEFAULT_FEED_CAPACITY);

        Self {
            sink,
            handle: EngineHandle::new(registry, &config),
            config,
            visualization,
            pending_feed: Some(feed),
            state: PlaybackState::Stopped,
            last_process_time: None,
            shut_down: false,
        }
    }

    /// Begin playback.
    ///
    /// A no-op while playing. On failure the session is left `Stopped` and
    /// disconnected; calling `start` again retries.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        if self.shut_down {
            return Err(PlaybackError::ShutDown);
        }
        if self.state == PlaybackState::Playing {
            return Ok(());
        }
        self.state = PlaybackState::Starting;

        if !self.sink.is_open() {
            let engine = self.build_engine();
            if let Err(err) = self.sink.open(Box::new(engine)) {
                warn!(%err, "failed to open audio sink");
                self.state = PlaybackState::Stopped;
                return Err(err.into());
            }
        }

        self.last_process_time = Some(Instant::now());
        self.handle.connect();

        if let Err(err) = self.sink.resume() {
            warn!(%err, "failed to resume audio sink");
            self.handle.disconnect();
            self.state = PlaybackState::Stopped;
            return Err(err.into());
        }

        self.state = PlaybackState::Playing;
        info!(
            algorithm = self.handle.algorithm().name(),
            rate = self.handle.sample_rate(),
            t = self.handle.current_time(),
            "playback started"
        );
        Ok(())
    }

    /// Stop playback. A no-op while stopped.
    ///
    /// The callback is disconnected before the sink is suspended, so no
    /// synthesis happens after this returns even if suspending fails.
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Stopped {
            return;
        }
        self.state = PlaybackState::Stopping;

        self.handle.disconnect();
        if let Err(err) = self.sink.suspend() {
            warn!(%err, "failed to suspend audio sink");
        }

        self.state = PlaybackState::Stopped;
        info!(t = self.handle.current_time(), "playback stopped");
    }

    /// Start if stopped, stop if playing. Returns whether playback is now on.
    pub fn toggle(&mut self) -> Result<bool, PlaybackError> {
        if self.is_playing() {
            self.stop();
            Ok(false)
        } else {
            self.start().map(|()| true)
        }
    }

    /// Stop and release the sink. The controller cannot be restarted.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.stop();
        if self.sink.is_open() {
            self.sink.close();
            info!("audio sink released");
        }
        self.shut_down = true;
    }

    /// Clamp to `4000..=44100` Hz and apply from the next sample.
    pub fn set_sample_rate(&self, rate: u32) -> u32 {
        self.handle.set_sample_rate(rate)
    }

    /// Select by name, falling back to the first registered algorithm. Applies
    /// from the next buffer.
    pub fn set_algorithm(&self, name: &str) -> &Algorithm {
        self.handle.set_algorithm(name)
    }

    /// Clamp to `0.0..=1.0` and glide to it from the next buffer.
    pub fn set_output_gain(&self, gain: f32) -> f32 {
        self.handle.set_output_gain(gain)
    }

    #[inline]
    pub fn output_gain(&self) -> f32 {
        self.handle.output_gain()
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.handle.sample_rate()
    }

    pub fn algorithm(&self) -> &Algorithm {
        self.handle.algorithm()
    }

    #[inline]
    pub fn current_time(&self) -> u32 {
        self.handle.current_time()
    }

    #[inline]
    pub fn samples_rendered(&self) -> u64 {
        self.handle.samples_rendered()
    }

    /// When the current session was last started.
    #[inline]
    pub fn last_process_time(&self) -> Option<Instant> {
        self.last_process_time
    }

    pub fn handle(&self) -> &EngineHandle {
        &self.handle
    }

    /// Throttled samples published by the engine, for a UI loop to poll.
    pub fn visualization(&mut self) -> &mut VisualizationReader {
        &mut self.visualization
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Engine for the sink, continuing this session's time.
    ///
    /// The first engine takes the feed created with the controller. If an
    /// earlier open failed, that feed went down with the rejected engine, so
    /// a new channel replaces the reader.
    fn build_engine(&mut self) -> SynthesisEngine {
        let feed = match self.pending_feed.take() {
            Some(feed) => feed,
            None => {
                let (feed, reader) = visualization_channel(DEFAULT_FEED_CAPACITY);
                self.visualization = reader;
                feed
            }
        };

        let reference_rate = self
            .config
            .reference_rate()
            .unwrap_or_else(|| self.sink.sample_rate());
        SynthesisEngine::attach(&self.handle, &self.config, reference_rate).with_visualization(feed)
    }
}

impl<S: AudioSink> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
