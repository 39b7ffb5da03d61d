use std::sync::Arc;
use std::time::{Duration, Instant};

use bytebeat_engine::{
    normalize, visualization_channel, EngineConfig, Registry, SynthesisEngine,
    VisualizationThrottle,
};

fn engine(config: &EngineConfig) -> SynthesisEngine {
    SynthesisEngine::new(Arc::new(Registry::builtin()), config)
}

#[test]
fn frame_rate_throttle_follows_the_clock() {
    let config = EngineConfig::default()
        .with_algorithm("Viznut Original")
        .with_visualization_fps(60);
    let (feed, mut reader) = visualization_channel(16);
    let mut engine = engine(&config).with_visualization(feed);
    let start = Instant::now();
    let ms = |n| start + Duration::from_millis(n);

    let mut buffer = [0.0f32; 128];

    engine.render_at(&mut buffer, 1, ms(0));
    assert_eq!(reader.latest(), None);

    engine.render_at(&mut buffer, 1, ms(20));
    let value = reader.latest().expect("one frame elapsed");
    // the last frame of the second buffer ran at t = 257
    let expected = engine.handle().algorithm().evaluate(257);
    assert_eq!(value, f32::from(expected) / 255.0);

    engine.render_at(&mut buffer, 1, ms(25));
    assert_eq!(reader.latest(), None);

    engine.render_at(&mut buffer, 1, ms(40));
    assert!(reader.latest().is_some());
}

#[test]
fn every_nth_sample_ignores_the_clock() {
    let config = EngineConfig::default().with_throttle(VisualizationThrottle::EveryNthSample(4));
    let (feed, mut reader) = visualization_channel(64);
    let mut engine = engine(&config).with_visualization(feed);

    let now = Instant::now();
    let mut buffer = [0.0f32; 64];
    engine.render_at(&mut buffer, 1, now);
    engine.render_at(&mut buffer, 1, now);

    assert_eq!(reader.pending(), 32);
    assert!(reader.drain().all(|v| (0.0..=1.0).contains(&v)));
}

#[test]
fn zero_stride_is_treated_as_one() {
    let config = EngineConfig::default().with_throttle(VisualizationThrottle::EveryNthSample(0));
    assert_eq!(config.throttle(), VisualizationThrottle::EveryNthSample(1));

    let (feed, mut reader) = visualization_channel(64);
    let mut engine = engine(&config).with_visualization(feed);
    engine.render_at(&mut [0.0f32; 10], 1, Instant::now());
    assert_eq!(reader.drain().count(), 10);
}

#[test]
fn reference_rate_scales_time() {
    let config = EngineConfig::default()
        .with_sample_rate(8000)
        .with_reference_rate(16_000);
    let mut engine = engine(&config);
    assert_eq!(engine.reference_rate(), 16_000);

    engine.render_at(&mut [0.0f32; 2000], 1, Instant::now());
    assert_eq!(engine.handle().current_time(), 1001);
}

#[test]
fn rate_change_applies_without_resetting_time() {
    let mut engine = engine(&EngineConfig::default());
    let handle = engine.handle();
    let now = Instant::now();

    engine.render_at(&mut [0.0f32; 100], 1, now);
    assert_eq!(handle.current_time(), 101);

    assert_eq!(handle.set_sample_rate(16_000), 16_000);
    engine.render_at(&mut [0.0f32; 100], 1, now);
    assert_eq!(handle.current_time(), 301);
    assert_eq!(handle.samples_rendered(), 200);
}

#[test]
fn algorithm_switch_takes_effect_on_the_next_buffer() {
    let registry = Registry::builtin();
    let storm = *registry.find("Binary Storm");

    let mut engine = engine(&EngineConfig::default());
    let handle = engine.handle();
    let now = Instant::now();
    engine.render_at(&mut [0.0f32; 99], 1, now);

    handle.set_algorithm("Binary Storm");
    let mut buffer = [0.0f32; 1];
    engine.render_at(&mut buffer, 1, now);
    assert_eq!(buffer[0], normalize(storm.evaluate(101)));
}

#[test]
fn algorithm_switch_never_splits_a_buffer() {
    let registry = Registry::builtin();
    let classic = *registry.find("Classic Mix");
    let storm = *registry.find("Binary Storm");

    let config = EngineConfig::default().with_throttle(VisualizationThrottle::EveryNthSample(1));
    let engine = engine(&config);
    let handle = engine.handle();
    // switch while the first sample of the buffer is being rendered
    let mut switched = false;
    let mut engine = engine.with_visualization(move |_: f32| {
        if !switched {
            handle.set_algorithm("Binary Storm");
            switched = true;
        }
    });

    let now = Instant::now();
    let mut buffer = [0.0f32; 64];
    engine.render_at(&mut buffer, 1, now);
    for (i, &sample) in buffer.iter().enumerate() {
        assert_eq!(sample, normalize(classic.evaluate(i as u32 + 2)), "frame {}", i);
    }

    engine.render_at(&mut buffer, 1, now);
    for (i, &sample) in buffer.iter().enumerate() {
        assert_eq!(sample, normalize(storm.evaluate(i as u32 + 66)), "frame {}", i);
    }
}

#[test]
fn partial_trailing_frame_is_rendered() {
    let mut engine = engine(&EngineConfig::default());
    let mut buffer = [0.0f32; 5];
    assert_eq!(engine.render_at(&mut buffer, 2, Instant::now()), 3);
    assert_eq!(buffer[0], buffer[1]);
    assert_eq!(buffer[2], buffer[3]);
    assert_eq!(engine.handle().current_time(), 4);
}

#[test]
fn output_gain_scales_the_samples() {
    let registry = Registry::builtin();
    let viznut = *registry.find("Viznut Original");
    let config = EngineConfig::default()
        .with_algorithm("Viznut Original")
        .with_output_gain(0.5);
    let mut engine = engine(&config);
    assert_eq!(engine.handle().output_gain(), 0.5);

    let mut buffer = [0.0f32; 256];
    engine.render_at(&mut buffer, 1, Instant::now());
    for (i, &sample) in buffer.iter().enumerate() {
        assert_eq!(sample, normalize(viznut.evaluate(i as u32 + 2)) * 0.5);
    }
}

#[test]
fn output_gain_glides_to_a_new_value() {
    let mut engine = engine(&EngineConfig::default().with_algorithm("Binary Storm"));
    let handle = engine.handle();
    let now = Instant::now();

    assert_eq!(handle.set_output_gain(-3.0), 0.0);
    let mut buffer = [0.0f32; 64];
    engine.render_at(&mut buffer, 1, now);
    // no click: the first frame is still close to full scale
    assert!(buffer.iter().any(|s| s.abs() > 0.5));

    let mut tail = [0.0f32; 4096];
    engine.render_at(&mut tail, 1, now);
    engine.render_at(&mut tail, 1, now);
    assert!(tail.iter().all(|s| s.abs() < 1e-3));
}

#[test]
fn output_gain_is_clamped() {
    assert_eq!(EngineConfig::default().output_gain(), 1.0);
    assert_eq!(EngineConfig::default().with_output_gain(2.0).output_gain(), 1.0);
    assert_eq!(EngineConfig::default().with_output_gain(f32::NAN).output_gain(), 1.0);
    assert_eq!(EngineConfig::default().with_output_gain(0.25).output_gain(), 0.25);
}
