use super::lock;
use crate::synth::envelope::Envelope;
use std::sync::{Arc, Mutex};

#[derive(PartialEq, Debug, Copy, Clone)]
enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Linear ADSR generator. Multiplies a buffer in place by the envelope level.
#[derive(Debug, Clone)]
struct EnvelopeGenerator {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
    value: f32,
    state: EnvelopeState,
    release_start_value: f32,
    min_threshold: f32,
}

impl Default for EnvelopeGenerator {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.8,
            release: 0.3,
            value: 0.0,
            state: EnvelopeState::Idle,
            release_start_value: 0.0,
            min_threshold: 0.001,
        }
    }
}

impl EnvelopeGenerator {
    // Attack ramps from the current level so a retrigger does not click.
    fn trigger(&mut self) {
        self.state = EnvelopeState::Attack;
    }

    fn release(&mut self) {
        if self.state != EnvelopeState::Idle {
            self.state = EnvelopeState::Release;
            self.release_start_value = self.value;
        }
    }

    fn is_finished(&self) -> bool {
        self.state == EnvelopeState::Idle && self.value == 0.0
    }

    fn apply(&mut self, output: &mut [f32], sample_rate: f32) {
        let attack_step = 1.0 / (self.attack * sample_rate).max(1.0);
        let decay_step = (1.0 - self.sustain) / (self.decay * sample_rate).max(1.0);
        let release_step = self.release_start_value / (self.release * sample_rate).max(1.0);

        for sample in output.iter_mut() {
            self.value = match self.state {
                EnvelopeState::Idle => 0.0,
                EnvelopeState::Attack => {
                    let value = self.value + attack_step;
                    if value >= 1.0 {
                        self.state = EnvelopeState::Decay;
                        1.0
                    } else {
                        value
                    }
                }
                EnvelopeState::Decay => {
                    let value = self.value - decay_step;
                    if value <= self.sustain {
                        self.state = EnvelopeState::Sustain;
                        self.sustain
                    } else {
                        value
                    }
                }
                EnvelopeState::Sustain => self.sustain,
                EnvelopeState::Release => {
                    let value = self.value - release_step;
                    if value <= self.min_threshold {
                        self.state = EnvelopeState::Idle;
                        0.0
                    } else {
                        value
                    }
                }
            };

            *sample *= self.value;
        }
    }
}

/// Gate-driven amplitude envelope. Clones share the same generator.
#[derive(Debug, Clone, Default)]
pub struct AmplitudeEnvelopeNode {
    generator: Arc<Mutex<EnvelopeGenerator>>,
}

impl AmplitudeEnvelopeNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scales `output` in place by the envelope, advancing it one sample per element.
    pub fn apply(&self, output: &mut [f32], sample_rate: f32) {
        lock(&self.generator).apply(output, sample_rate);
    }

    /// True once the release phase has run out and the envelope is silent.
    pub fn is_finished(&self) -> bool {
        lock(&self.generator).is_finished()
    }

    /// Current envelope level in 0..=1.
    pub fn level(&self) -> f32 {
        lock(&self.generator).value
    }
}

impl Envelope for AmplitudeEnvelopeNode {
    fn attack_duration(&self) -> f32 {
        lock(&self.generator).attack
    }

    fn set_attack_duration(&mut self, seconds: f32) {
        lock(&self.generator).attack = seconds;
    }

    fn decay_duration(&self) -> f32 {
        lock(&self.generator).decay
    }

    fn set_decay_duration(&mut self, seconds: f32) {
        lock(&self.generator).decay = seconds;
    }

    fn sustain_level(&self) -> f32 {
        lock(&self.generator).sustain
    }

    fn set_sustain_level(&mut self, level: f32) {
        lock(&self.generator).sustain = level;
    }

    fn release_duration(&self) -> f32 {
        lock(&self.generator).release
    }

    fn set_release_duration(&mut self, seconds: f32) {
        lock(&self.generator).release = seconds;
    }

    fn open_gate(&mut self) {
        lock(&self.generator).trigger();
    }

    fn close_gate(&mut self) {
        lock(&self.generator).release();
    }
}
