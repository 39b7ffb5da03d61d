//! Play a bytebeat algorithm on the default output device
//!
//! Run with: cargo run --example bytebeat_player --features cpal_sink -- --algorithm "Viznut Original"

use std::io::Write;
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bytebeat_engine::{CpalDevice, EngineConfig, PlaybackController, Registry, DEFAULT_SAMPLE_RATE};

#[derive(Parser, Debug)]
#[command(name = "bytebeat_player", about = "Real-time bytebeat synthesis")]
struct Args {
    /// Algorithm name; unknown names play the first catalog entry
    #[arg(short, long, default_value = "Classic Mix")]
    algorithm: String,

    /// Bytebeat sample rate in Hz (clamped to 4000..=44100)
    #[arg(short = 'r', long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Stop after this many seconds; plays until interrupted if omitted
    #[arg(short, long)]
    duration: Option<f64>,

    /// Print the catalog and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let registry = Arc::new(Registry::builtin());

    if args.list {
        for algorithm in registry.list_all() {
            let tag = if algorithm.is_experimental() { " [experimental]" } else { "" };
            println!("{:<28} {:?}{}", algorithm.name(), algorithm.category(), tag);
            println!("    {}", algorithm.description());
        }
        return Ok(());
    }

    let device = CpalDevice::default_output().ok_or("No audio device")?;
    println!("{} ({} Hz, {} ch)", device.name(), device.sample_rate(), device.channels());

    let config = EngineConfig::default()
        .with_sample_rate(args.sample_rate)
        .with_algorithm(args.algorithm);
    let mut player = PlaybackController::new(device.create_sink(), registry, config);

    player.start()?;
    println!(
        "Playing {} at {} Hz... Ctrl+C to stop",
        player.algorithm().name(),
        player.sample_rate()
    );

    let start = Instant::now();
    let mut level = 0.0f32;
    loop {
        if let Some(value) = player.visualization().latest() {
            level = value;
        }
        let bar = "#".repeat((level * 40.0) as usize);
        print!("\rt={:06x} {:<40}", player.current_time(), bar);
        std::io::stdout().flush()?;

        if args.duration.is_some_and(|secs| start.elapsed().as_secs_f64() >= secs) {
            break;
        }
        sleep(Duration::from_millis(16));
    }

    println!();
    player.shutdown();
    Ok(())
}
