use super::lock;
use crate::synth::operator::{FmOscillator, Oscillator};
use std::f32::consts::TAU;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct FmOscillatorState {
    started: bool,
    base_frequency: f32,
    carrier_multiplier: f32,
    modulating_multiplier: f32,
    modulation_index: f32,
    amplitude: f32,
    carrier_phase: f32,
    modulator_phase: f32,
}

impl Default for FmOscillatorState {
    fn default() -> Self {
        Self {
            started: false,
            base_frequency: 440.0,
            carrier_multiplier: 1.0,
            modulating_multiplier: 1.0,
            modulation_index: 1.0,
            amplitude: 1.0,
            carrier_phase: 0.0,
            modulator_phase: 0.0,
        }
    }
}

impl FmOscillatorState {
    fn process(&mut self, output: &mut [f32], sample_rate: f32) {
        if !self.started {
            output.fill(0.0);
            return;
        }

        let carrier_increment = TAU * self.base_frequency * self.carrier_multiplier / sample_rate;
        let modulator_increment =
            TAU * self.base_frequency * self.modulating_multiplier / sample_rate;

        for sample in output.iter_mut() {
            let modulation = self.modulation_index * self.modulator_phase.sin();
            *sample = self.amplitude * (self.carrier_phase + modulation).sin();

            self.carrier_phase = (self.carrier_phase + carrier_increment).rem_euclid(TAU);
            self.modulator_phase = (self.modulator_phase + modulator_increment).rem_euclid(TAU);
        }
    }
}

/// A sine-on-sine FM oscillator. Clones share the same oscillator, so one
/// handle can sit in the controller while another is rendered by the engine.
#[derive(Debug, Clone, Default)]
pub struct FmOscillatorNode {
    state: Arc<Mutex<FmOscillatorState>>,
}

impl FmOscillatorNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the next `output.len()` samples, overwriting the buffer.
    pub fn process(&self, output: &mut [f32], sample_rate: f32) {
        lock(&self.state).process(output, sample_rate);
    }
}

impl Oscillator for FmOscillatorNode {
    fn is_started(&self) -> bool {
        lock(&self.state).started
    }

    fn start(&mut self) {
        let mut state = lock(&self.state);
        if !state.started {
            state.carrier_phase = 0.0;
            state.modulator_phase = 0.0;
            state.started = true;
        }
    }

    fn stop(&mut self) {
        lock(&self.state).started = false;
    }
}

impl FmOscillator for FmOscillatorNode {
    fn base_frequency(&self) -> f32 {
        lock(&self.state).base_frequency
    }

    fn set_base_frequency(&mut self, frequency: f32) {
        lock(&self.state).base_frequency = frequency;
    }

    fn carrier_multiplier(&self) -> f32 {
        lock(&self.state).carrier_multiplier
    }

    fn set_carrier_multiplier(&mut self, multiplier: f32) {
        lock(&self.state).carrier_multiplier = multiplier;
    }

    fn modulating_multiplier(&self) -> f32 {
        lock(&self.state).modulating_multiplier
    }

    fn set_modulating_multiplier(&mut self, multiplier: f32) {
        lock(&self.state).modulating_multiplier = multiplier;
    }

    fn modulation_index(&self) -> f32 {
        lock(&self.state).modulation_index
    }

    fn set_modulation_index(&mut self, index: f32) {
        lock(&self.state).modulation_index = index;
    }

    fn amplitude(&self) -> f32 {
        lock(&self.state).amplitude
    }

    fn set_amplitude(&mut self, amplitude: f32) {
        lock(&self.state).amplitude = amplitude;
    }
}
