use super::operator::{clamp_to, OperatorId};
use std::ops::RangeInclusive;

/// An ADSR amplitude envelope driven by a gate.
pub trait Envelope {
    fn attack_duration(&self) -> f32;
    fn set_attack_duration(&mut self, seconds: f32);
    fn decay_duration(&self) -> f32;
    fn set_decay_duration(&mut self, seconds: f32);
    fn sustain_level(&self) -> f32;
    fn set_sustain_level(&mut self, level: f32);
    fn release_duration(&self) -> f32;
    fn set_release_duration(&mut self, seconds: f32);

    fn open_gate(&mut self);
    fn close_gate(&mut self);
}

pub struct EnvelopeConfigurationRanges;

impl EnvelopeConfigurationRanges {
    pub const ATTACK: RangeInclusive<f32> = 0.001..=2.0;
    pub const DECAY: RangeInclusive<f32> = 0.001..=2.0;
    pub const SUSTAIN: RangeInclusive<f32> = 0.0..=1.0;
    pub const RELEASE: RangeInclusive<f32> = 0.001..=3.0;
}

/// ADSR settings for the envelope of one operator. Durations are in seconds,
/// sustain is a level in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfiguration {
    pub operator_id: OperatorId,
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl EnvelopeConfiguration {
    pub fn new(operator_id: OperatorId) -> Self {
        Self {
            operator_id,
            attack: 0.01,
            decay: 0.1,
            sustain: 0.8,
            release: 0.3,
        }
    }

    pub fn with_attack(mut self, seconds: f32) -> Self {
        self.attack = seconds;
        self
    }

    pub fn with_decay(mut self, seconds: f32) -> Self {
        self.decay = seconds;
        self
    }

    pub fn with_sustain(mut self, level: f32) -> Self {
        self.sustain = level;
        self
    }

    pub fn with_release(mut self, seconds: f32) -> Self {
        self.release = seconds;
        self
    }

    pub fn clamped(&self) -> Self {
        type R = EnvelopeConfigurationRanges;
        Self {
            operator_id: self.operator_id,
            attack: clamp_to(self.attack, R::ATTACK),
            decay: clamp_to(self.decay, R::DECAY),
            sustain: clamp_to(self.sustain, R::SUSTAIN),
            release: clamp_to(self.release, R::RELEASE),
        }
    }

    pub fn is_within_ranges(&self) -> bool {
        type R = EnvelopeConfigurationRanges;
        R::ATTACK.contains(&self.attack)
            && R::DECAY.contains(&self.decay)
            && R::SUSTAIN.contains(&self.sustain)
            && R::RELEASE.contains(&self.release)
    }
}
