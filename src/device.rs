//! CPAL device discovery and sink creation.
//!
//! This module provides [`CpalDevice`] for discovering and selecting audio output devices.
//!
//! # Example: List and Select a Device
//!
//! ```no_run
//! use std::sync::Arc;
//! use bytebeat_engine::{CpalDevice, EngineConfig, PlaybackController, Registry};
//!
//! // List all available output devices
//! let devices = CpalDevice::list_outputs();
//! for (i, device) in devices.iter().enumerate() {
//!     println!("[{}] {} ({} Hz, {} ch)",
//!         i, device.name(), device.sample_rate(), device.channels());
//! }
//!
//! // Use a specific device
//! let device = &devices[0];
//! let mut player = PlaybackController::new(
//!     device.create_sink(),
//!     Arc::new(Registry::builtin()),
//!     EngineConfig::default(),
//! );
//! player.start().unwrap();
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use cpal::traits::{DeviceTrait, HostTrait};

use crate::sink::CpalSink;

/// A discovered audio output device.
///
/// Use [`CpalDevice::default_output`] to get the system default, or
/// [`CpalDevice::list_outputs`] to enumerate all available devices.
///
/// Once you have a device, use [`create_sink`](Self::create_sink) to create
/// a [`CpalSink`] for a [`PlaybackController`](crate::PlaybackController).
pub struct CpalDevice {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,

    name: String,
    sample_rate: u32,
    channels: u16,
}

impl CpalDevice {
    fn from_device(device: cpal::Device) -> Option<Self> {
        let config = device.default_output_config().ok()?;
        let name = device.name().unwrap_or_else(|_| "Unknown".into());

        Some(Self {
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
            name,
            device,
            config,
        })
    }

    /// Get the system's default output device.
    ///
    /// Returns `None` if no audio device is available.
    pub fn default_output() -> Option<Self> {
        let host = cpal::default_host();
        Self::from_device(host.default_output_device()?)
    }

    /// List all available audio output devices.
    ///
    /// Returns an empty list if no devices are found or if enumeration fails.
    pub fn list_outputs() -> Vec<Self> {
        let host = cpal::default_host();
        host.output_devices()
            .map(|devices| devices.filter_map(Self::from_device).collect())
            .unwrap_or_default()
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the device's sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of output channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Create a sink that outputs audio to this device.
    pub fn create_sink(&self) -> CpalSink {
        CpalSink::new(&self.device, &self.config)
    }
}
