use super::{AudioEngine, AudioEngineError, SignalChain};
use log::info;

/// An engine without an output device. The caller pulls buffers with
/// [`OfflineEngine::render`]; nothing is produced while stopped.
#[derive(Debug, Clone)]
pub struct OfflineEngine {
    chain: SignalChain,
    sample_rate: f32,
    running: bool,
}

impl OfflineEngine {
    pub fn new(chain: SignalChain, sample_rate: f32) -> Self {
        Self {
            chain,
            sample_rate,
            running: false,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn render(&mut self, output: &mut [f32]) {
        if self.running {
            self.chain.process(output, self.sample_rate);
        } else {
            output.fill(0.0);
        }
    }
}

impl AudioEngine for OfflineEngine {
    fn is_running(&self) -> bool {
        self.running
    }

    fn start(&mut self) -> Result<(), AudioEngineError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(AudioEngineError::FailedToStart(format!(
                "invalid sample rate {}",
                self.sample_rate
            )));
        }
        info!("Offline engine started at {} Hz", self.sample_rate);
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
