use std::sync::Arc;

use bytebeat_engine::{
    normalize, AudioSink, EngineConfig, PlaybackController, PlaybackError, PlaybackState,
    PullSink, Registry, SinkError, VisualizationThrottle,
};

fn player(config: EngineConfig) -> PlaybackController<PullSink> {
    PlaybackController::new(PullSink::mono(8000), Arc::new(Registry::builtin()), config)
}

/// Pull `frames` mono frames in blocks of 1000.
fn pull(player: &mut PlaybackController<PullSink>, frames: usize) -> Vec<f32> {
    let mut out = vec![0.0; frames];
    for block in out.chunks_mut(1000) {
        player.sink_mut().pull(block);
    }
    out
}

/// Viznut at 8 kHz advances t by exactly one per sample, then half as fast at 4 kHz
#[test]
fn viznut_time_scenario() {
    let mut player = player(EngineConfig::default().with_algorithm("Viznut Original"));
    assert_eq!(player.algorithm().name(), "Viznut Original");

    player.start().unwrap();
    pull(&mut player, 8000);
    assert_eq!(player.current_time(), 8001);
    assert_eq!(player.samples_rendered(), 8000);

    player.set_sample_rate(4000);
    pull(&mut player, 1000);
    assert_eq!(player.current_time(), 8501);
}

#[test]
fn rendered_samples_match_the_formula() {
    let registry = Registry::builtin();
    let viznut = *registry.find("Viznut Original");

    let mut player = player(EngineConfig::default().with_algorithm("Viznut Original"));
    player.start().unwrap();
    let out = pull(&mut player, 4096);

    for (i, &sample) in out.iter().enumerate() {
        // first rendered frame sees t = 2
        let t = i as u32 + 2;
        assert_eq!(sample, normalize(viznut.evaluate(t)), "frame {}", i);
    }
}

#[test]
fn sample_rate_is_clamped() {
    let player = player(EngineConfig::default());
    assert_eq!(player.set_sample_rate(0), 4000);
    assert_eq!(player.sample_rate(), 4000);
    assert_eq!(player.set_sample_rate(1_000_000), 44_100);
    assert_eq!(player.sample_rate(), 44_100);
    assert_eq!(player.set_sample_rate(11_025), 11_025);
}

#[test]
fn unknown_algorithm_falls_back_to_first_entry() {
    let mut fallback = player(EngineConfig::default().with_algorithm("nonexistent-name"));
    let mut first = player(EngineConfig::default().with_algorithm("Classic Mix"));
    assert_eq!(fallback.algorithm().name(), "Classic Mix");

    fallback.start().unwrap();
    first.start().unwrap();
    assert_eq!(pull(&mut fallback, 2048), pull(&mut first, 2048));

    assert_eq!(fallback.set_algorithm("also missing").name(), "Classic Mix");
}

#[test]
fn every_algorithm_stays_in_range() {
    let registry = Registry::builtin();
    let mut player = player(EngineConfig::default().with_sample_rate(44_100));
    player.start().unwrap();

    for algorithm in registry.list_all() {
        player.set_algorithm(algorithm.name());
        let out = pull(&mut player, 5000);
        assert!(
            out.iter().all(|s| (-1.0..=1.0).contains(s)),
            "{} left the output range",
            algorithm.name()
        );
    }
}

#[test]
fn stop_is_idempotent_and_silences_output() {
    let mut player = player(EngineConfig::default());
    player.start().unwrap();
    pull(&mut player, 100);

    player.stop();
    player.stop();
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert!(!player.handle().is_connected());

    let mut block = [0.5f32; 256];
    assert!(!player.sink_mut().pull(&mut block));
    assert!(block.iter().all(|&s| s == 0.0));
    assert_eq!(player.current_time(), 101);
}

#[test]
fn start_twice_is_a_no_op() {
    let mut player = player(EngineConfig::default());
    player.start().unwrap();
    let started = player.last_process_time();
    player.start().unwrap();
    assert_eq!(player.last_process_time(), started);
    assert!(player.is_playing());
}

/// t carries over a pause
#[test]
fn time_survives_stop_and_start() {
    let mut player = player(EngineConfig::default());
    player.start().unwrap();
    pull(&mut player, 100);
    player.stop();
    player.start().unwrap();
    pull(&mut player, 100);
    assert_eq!(player.current_time(), 201);
}

#[test]
fn resume_failure_leaves_the_session_stopped() {
    let mut player = player(EngineConfig::default());
    player.sink_mut().fail_next_resume();

    let err = player.start().unwrap_err();
    assert!(matches!(err, PlaybackError::Sink(SinkError::Resume(_))));
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert!(!player.handle().is_connected());
    assert!(!player.sink().is_running());

    // caller retries
    player.start().unwrap();
    assert!(player.is_playing());
    pull(&mut player, 10);
    assert_eq!(player.current_time(), 11);
}

#[test]
fn open_failure_can_be_retried() {
    let mut player =
        player(EngineConfig::default().with_throttle(VisualizationThrottle::EveryNthSample(1)));
    player.sink_mut().fail_next_open();

    let err = player.start().unwrap_err();
    assert!(matches!(err, PlaybackError::Sink(SinkError::NoDevice)));
    assert!(!player.sink().is_open());
    assert_eq!(player.state(), PlaybackState::Stopped);

    player.start().unwrap();
    pull(&mut player, 16);
    // the reader was replaced along with the rejected engine
    assert_eq!(player.visualization().drain().count(), 16);
}

#[test]
fn toggle_flips_playback() {
    let mut player = player(EngineConfig::default());
    assert!(player.toggle().unwrap());
    assert!(player.is_playing());
    assert!(!player.toggle().unwrap());
    assert!(!player.is_playing());
}

#[test]
fn shutdown_releases_the_sink() {
    let mut player = player(EngineConfig::default());
    player.start().unwrap();
    player.shutdown();

    assert!(!player.sink().is_open());
    assert!(matches!(player.start(), Err(PlaybackError::ShutDown)));
    // second shutdown is harmless
    player.shutdown();
}

#[test]
fn dropping_the_controller_disconnects() {
    let mut player = player(EngineConfig::default());
    player.start().unwrap();
    let handle = player.handle().clone();
    assert!(handle.is_connected());

    drop(player);
    assert!(!handle.is_connected());
}

#[test]
fn every_nth_sample_feeds_the_visualizer() {
    let registry = Registry::builtin();
    let viznut = *registry.find("Viznut Original");
    let mut player = player(
        EngineConfig::default()
            .with_algorithm("Viznut Original")
            .with_throttle(VisualizationThrottle::EveryNthSample(8)),
    );
    player.start().unwrap();
    pull(&mut player, 64);

    let values: Vec<f32> = player.visualization().drain().collect();
    assert_eq!(values.len(), 8);
    for (k, &v) in values.iter().enumerate() {
        // sample number 8(k+1) is rendered at t = 8(k+1) + 1
        let t = 8 * (k as u32 + 1) + 1;
        assert_eq!(v, f32::from(viznut.evaluate(t)) / 255.0);
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn stereo_frames_duplicate_the_sample() {
    let mut player = PlaybackController::new(
        PullSink::new(8000, 2),
        Arc::new(Registry::builtin()),
        EngineConfig::default().with_algorithm("Acid Lead"),
    );
    player.start().unwrap();

    let mut block = [0.0f32; 2048];
    player.sink_mut().pull(&mut block);
    assert!(block.chunks(2).all(|frame| frame[0] == frame[1]));
    assert_eq!(player.current_time(), 1025);
}

#[test]
fn controllers_are_isolated() {
    let mut a = player(EngineConfig::default());
    let mut b = player(EngineConfig::default().with_sample_rate(16_000));
    a.start().unwrap();
    b.start().unwrap();

    pull(&mut a, 1000);
    assert_eq!(a.current_time(), 1001);
    assert_eq!(b.current_time(), 1);

    pull(&mut b, 1000);
    assert_eq!(b.current_time(), 2001);
    assert_eq!(a.current_time(), 1001);
}

/// On a 48 kHz sink a 24 kHz selection advances t half a tick per frame
#[test]
fn device_rate_is_the_reference() {
    let mut player = PlaybackController::new(
        PullSink::mono(48_000),
        Arc::new(Registry::builtin()),
        EngineConfig::default().with_sample_rate(24_000),
    );
    player.start().unwrap();

    let mut block = vec![0.0f32; 2000];
    player.sink_mut().pull(&mut block);
    assert_eq!(player.current_time(), 1001);
}

#[test]
fn output_gain_is_controlled_while_playing() {
    let mut player = player(EngineConfig::default().with_algorithm("Viznut Original"));
    assert_eq!(player.output_gain(), 1.0);
    player.start().unwrap();

    assert_eq!(player.set_output_gain(0.0), 0.0);
    let out = pull(&mut player, 8000);
    assert!(out[7000..].iter().all(|s| s.abs() < 1e-3));
    // t keeps running while muted
    assert_eq!(player.current_time(), 8001);
}
