//! Recording test doubles for the controller's collaborators.

use super::envelope::Envelope;
use super::mixer::Mixer;
use super::operator::{FmOscillator, Oscillator};
use crate::audio::{AudioEngine, AudioEngineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMessage {
    Start,
    Stop,
}

#[derive(Debug, Default)]
pub struct AudioEngineSpy {
    pub messages: Vec<EngineMessage>,
    pub start_error: Option<AudioEngineError>,
    running: bool,
}

impl AudioEngineSpy {
    pub fn failing(error: AudioEngineError) -> Self {
        Self {
            start_error: Some(error),
            ..Default::default()
        }
    }
}

impl AudioEngine for AudioEngineSpy {
    fn is_running(&self) -> bool {
        self.running
    }

    fn start(&mut self) -> Result<(), AudioEngineError> {
        self.messages.push(EngineMessage::Start);
        if let Some(error) = &self.start_error {
            return Err(error.clone());
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.messages.push(EngineMessage::Stop);
        self.running = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OscillatorMessage {
    Start,
    Stop,
    SetBaseFrequency(f32),
    SetCarrierMultiplier(f32),
    SetModulatingMultiplier(f32),
    SetModulationIndex(f32),
    SetAmplitude(f32),
}

#[derive(Debug, Default)]
pub struct FmOscillatorSpy {
    pub messages: Vec<OscillatorMessage>,
    started: bool,
    base_frequency: f32,
    carrier_multiplier: f32,
    modulating_multiplier: f32,
    modulation_index: f32,
    amplitude: f32,
}

impl Oscillator for FmOscillatorSpy {
    fn is_started(&self) -> bool {
        self.started
    }

    fn start(&mut self) {
        self.messages.push(OscillatorMessage::Start);
        self.started = true;
    }

    fn stop(&mut self) {
        self.messages.push(OscillatorMessage::Stop);
        self.started = false;
    }
}

impl FmOscillator for FmOscillatorSpy {
    fn base_frequency(&self) -> f32 {
        self.base_frequency
    }

    fn set_base_frequency(&mut self, frequency: f32) {
        self.messages.push(OscillatorMessage::SetBaseFrequency(frequency));
        self.base_frequency = frequency;
    }

    fn carrier_multiplier(&self) -> f32 {
        self.carrier_multiplier
    }

    fn set_carrier_multiplier(&mut self, multiplier: f32) {
        self.messages.push(OscillatorMessage::SetCarrierMultiplier(multiplier));
        self.carrier_multiplier = multiplier;
    }

    fn modulating_multiplier(&self) -> f32 {
        self.modulating_multiplier
    }

    fn set_modulating_multiplier(&mut self, multiplier: f32) {
        self.messages
            .push(OscillatorMessage::SetModulatingMultiplier(multiplier));
        self.modulating_multiplier = multiplier;
    }

    fn modulation_index(&self) -> f32 {
        self.modulation_index
    }

    fn set_modulation_index(&mut self, index: f32) {
        self.messages.push(OscillatorMessage::SetModulationIndex(index));
        self.modulation_index = index;
    }

    fn amplitude(&self) -> f32 {
        self.amplitude
    }

    fn set_amplitude(&mut self, amplitude: f32) {
        self.messages.push(OscillatorMessage::SetAmplitude(amplitude));
        self.amplitude = amplitude;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvelopeMessage {
    OpenGate,
    CloseGate,
    SetAttack(f32),
    SetDecay(f32),
    SetSustain(f32),
    SetRelease(f32),
}

#[derive(Debug, Default)]
pub struct EnvelopeSpy {
    pub messages: Vec<EnvelopeMessage>,
    pub gate_open: bool,
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
}

impl Envelope for EnvelopeSpy {
    fn attack_duration(&self) -> f32 {
        self.attack
    }

    fn set_attack_duration(&mut self, seconds: f32) {
        self.messages.push(EnvelopeMessage::SetAttack(seconds));
        self.attack = seconds;
    }

    fn decay_duration(&self) -> f32 {
        self.decay
    }

    fn set_decay_duration(&mut self, seconds: f32) {
        self.messages.push(EnvelopeMessage::SetDecay(seconds));
        self.decay = seconds;
    }

    fn sustain_level(&self) -> f32 {
        self.sustain
    }

    fn set_sustain_level(&mut self, level: f32) {
        self.messages.push(EnvelopeMessage::SetSustain(level));
        self.sustain = level;
    }

    fn release_duration(&self) -> f32 {
        self.release
    }

    fn set_release_duration(&mut self, seconds: f32) {
        self.messages.push(EnvelopeMessage::SetRelease(seconds));
        self.release = seconds;
    }

    fn open_gate(&mut self) {
        self.messages.push(EnvelopeMessage::OpenGate);
        self.gate_open = true;
    }

    fn close_gate(&mut self) {
        self.messages.push(EnvelopeMessage::CloseGate);
        self.gate_open = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MixerMessage {
    SetVolume(f32),
}

#[derive(Debug, Default)]
pub struct MixerSpy {
    pub messages: Vec<MixerMessage>,
    volume: f32,
}

impl Mixer for MixerSpy {
    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.messages.push(MixerMessage::SetVolume(volume));
        self.volume = volume;
    }
}
