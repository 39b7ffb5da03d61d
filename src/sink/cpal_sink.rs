//! CPAL audio output sink

use alloc::boxed::Box;
use alloc::vec::Vec;

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, SupportedStreamConfig};
use tracing::{error, info};

use crate::callback::{ProcessContext, RenderCallback};
use crate::error::SinkError;
use crate::sink::AudioSink;

/// Scratch space reserved up front so the audio thread never allocates for
/// ordinary buffer sizes.
const SCRATCH_SAMPLES: usize = 16_384;

/// A sink that outputs audio to a CPAL device
///
/// The stream is built paused in [`open`](AudioSink::open); cpal runs the
/// callback on its own thread while resumed. Samples are rendered as `f32`
/// and converted to the device's native format.
pub struct CpalSink {
    device: cpal::Device,
    config: SupportedStreamConfig,
    stream: Option<cpal::Stream>,
}

impl CpalSink {
    /// Create a new sink for the given device and config
    pub fn new(device: &cpal::Device, config: &SupportedStreamConfig) -> Self {
        Self {
            device: device.clone(),
            config: config.clone(),
            stream: None,
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    stream_config: &cpal::StreamConfig,
    mut callback: Box<dyn RenderCallback>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    let ctx = ProcessContext {
        sample_rate: stream_config.sample_rate.0,
        channels: usize::from(stream_config.channels),
    };
    let mut scratch: Vec<f32> = Vec::with_capacity(SCRATCH_SAMPLES);

    device.build_output_stream(
        stream_config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            if scratch.len() < data.len() {
                scratch.resize(data.len(), 0.0);
            }
            let rendered = &mut scratch[..data.len()];
            callback.render(&ctx, rendered);

            for (out, &sample) in data.iter_mut().zip(rendered.iter()) {
                *out = T::from_sample(sample);
            }
        },
        |err| error!("CPAL stream error: {:?}", err),
        None,
    )
}

impl AudioSink for CpalSink {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate().0
    }

    fn channels(&self) -> usize {
        usize::from(self.config.channels())
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn open(&mut self, callback: Box<dyn RenderCallback>) -> Result<(), SinkError> {
        if self.stream.is_some() {
            return Err(SinkError::AlreadyOpen);
        }

        let sample_format = self.config.sample_format();
        let stream_config = self.config.config();

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&self.device, &stream_config, callback),
            SampleFormat::F64 => build_stream::<f64>(&self.device, &stream_config, callback),
            SampleFormat::I16 => build_stream::<i16>(&self.device, &stream_config, callback),
            SampleFormat::I32 => build_stream::<i32>(&self.device, &stream_config, callback),
            SampleFormat::U16 => build_stream::<u16>(&self.device, &stream_config, callback),
            other => return Err(SinkError::UnsupportedFormat(format!("{:?}", other))),
        }
        .map_err(|e| SinkError::Build(e.to_string()))?;

        // some hosts start streams on creation
        stream.pause().map_err(|e| SinkError::Suspend(e.to_string()))?;

        info!(
            rate = stream_config.sample_rate.0,
            channels = stream_config.channels,
            format = ?sample_format,
            "output stream opened"
        );
        self.stream = Some(stream);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), SinkError> {
        let stream = self.stream.as_ref().ok_or(SinkError::NotOpen)?;
        stream.play().map_err(|e| SinkError::Resume(e.to_string()))
    }

    fn suspend(&mut self) -> Result<(), SinkError> {
        let stream = self.stream.as_ref().ok_or(SinkError::NotOpen)?;
        stream.pause().map_err(|e| SinkError::Suspend(e.to_string()))
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            info!("output stream closed");
        }
    }
}
