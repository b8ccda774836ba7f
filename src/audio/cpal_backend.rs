use super::{lock, AudioEngine, AudioEngineError, SignalChain};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BuildStreamError, SampleFormat, Stream};
use log::{error, info, warn};
use std::sync::{Arc, Mutex};

/// Plays a [`SignalChain`] on a cpal output device.
pub struct CpalEngine {
    stream: Option<Stream>,
    chain: Arc<Mutex<SignalChain>>,
    device_name: Option<String>,
}

impl CpalEngine {
    /// `device_name` selects the first output device whose name contains it
    /// (case-insensitive); `None` uses the host default.
    pub fn new(chain: SignalChain, device_name: Option<String>) -> Self {
        Self {
            stream: None,
            chain: Arc::new(Mutex::new(chain)),
            device_name,
        }
    }

    fn select_device(&self, host: &cpal::Host) -> Result<cpal::Device, AudioEngineError> {
        if let Some(wanted) = &self.device_name {
            let wanted = wanted.to_lowercase();
            let devices = host
                .output_devices()
                .map_err(|e| AudioEngineError::FailedToStart(e.to_string()))?;

            for device in devices {
                let name = device.name().unwrap_or_default();
                if name.to_lowercase().contains(&wanted) {
                    return Ok(device);
                }
            }
            warn!("No output device matching '{}', using default", wanted);
        }

        host.default_output_device()
            .ok_or(AudioEngineError::HardwareUnavailable)
    }

    fn build_stream(&self) -> Result<Stream, AudioEngineError> {
        let host = cpal::default_host();
        let device = self.select_device(&host)?;
        info!("Selected device: {}", device.name().unwrap_or_default());

        let config = device
            .default_output_config()
            .map_err(|e| AudioEngineError::FailedToStart(e.to_string()))?;
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!("Output stream: {} Hz, {} channels", sample_rate, channels);

        let chain = self.chain.clone();
        let mut buffer = Vec::new();

        let stream = match config.sample_format() {
            SampleFormat::F32 => device.build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    buffer.resize(data.len() / channels, 0.0);
                    lock(&chain).process(&mut buffer, sample_rate);

                    for (frame, sample) in data.chunks_mut(channels).zip(buffer.iter()) {
                        frame.fill(*sample);
                    }
                },
                |err| error!("an error occurred on stream: {}", err),
                None,
            ),
            other => {
                return Err(AudioEngineError::FailedToStart(format!(
                    "Unsupported sample format {other:?}"
                )))
            }
        };

        stream.map_err(|e| match e {
            BuildStreamError::DeviceNotAvailable => AudioEngineError::HardwareUnavailable,
            other => AudioEngineError::FailedToStart(other.to_string()),
        })
    }
}

impl AudioEngine for CpalEngine {
    fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    fn start(&mut self) -> Result<(), AudioEngineError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let stream = self.build_stream()?;
        stream
            .play()
            .map_err(|e| AudioEngineError::FailedToStart(e.to_string()))?;
        self.stream = Some(stream);
        info!("Audio engine started");
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                warn!("Failed to pause stream: {}", e);
            }
            info!("Audio engine stopped");
        }
    }
}
