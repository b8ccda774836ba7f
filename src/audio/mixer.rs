use super::lock;
use crate::synth::mixer::Mixer;
use std::sync::{Arc, Mutex};

const GAIN_RAMP_MS: f32 = 5.0;
const LIMITER_THRESHOLD: f32 = 0.9;

#[derive(Debug, Clone)]
struct MixerState {
    volume: f32,
    current_gain: f32, // Gain applied at the end of the previous buffer
}

impl MixerState {
    fn process(&mut self, output: &mut [f32], sample_rate: f32) {
        let target_gain = self.volume;

        // Ramp from the previous gain so volume changes do not click
        let ramp_samples = ((GAIN_RAMP_MS / 1000.0 * sample_rate) as usize).min(output.len());
        for (i, sample) in output.iter_mut().enumerate() {
            let gain = if i < ramp_samples {
                let t = i as f32 / ramp_samples as f32;
                let smooth_t = t * t * (3.0 - 2.0 * t);
                self.current_gain * (1.0 - smooth_t) + target_gain * smooth_t
            } else {
                target_gain
            };
            *sample *= gain;
        }
        self.current_gain = target_gain;

        apply_limiter(output);
    }
}

/// Soft knee limiter above the threshold to keep summed operators from clipping
fn apply_limiter(output: &mut [f32]) {
    for sample in output.iter_mut() {
        if sample.abs() > LIMITER_THRESHOLD {
            let excess = (sample.abs() - LIMITER_THRESHOLD) / (1.0 - LIMITER_THRESHOLD);
            let scale = 1.0 - excess * 0.1;
            *sample *= scale.max(0.0);
        }
    }
}

/// Master output stage. Clones share the same volume.
#[derive(Debug, Clone)]
pub struct MixerNode {
    state: Arc<Mutex<MixerState>>,
}

impl MixerNode {
    pub fn new(volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            state: Arc::new(Mutex::new(MixerState {
                volume,
                current_gain: volume,
            })),
        }
    }

    /// Applies master gain and limiting to the summed operator signal in place.
    pub fn process(&self, output: &mut [f32], sample_rate: f32) {
        lock(&self.state).process(output, sample_rate);
    }
}

impl Default for MixerNode {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Mixer for MixerNode {
    fn volume(&self) -> f32 {
        lock(&self.state).volume
    }

    fn set_volume(&mut self, volume: f32) {
        lock(&self.state).volume = volume.clamp(0.0, 1.0);
    }
}
