use std::fmt;
use std::ops::RangeInclusive;

/// Number of FM operators in the voice.
pub const OPERATOR_COUNT: usize = 4;

/// One of the four fixed operator slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    A,
    B,
    C,
    D,
}

impl OperatorId {
    pub const ALL: [OperatorId; OPERATOR_COUNT] =
        [OperatorId::A, OperatorId::B, OperatorId::C, OperatorId::D];

    /// Slot index of this operator, 0 for A through 3 for D.
    pub fn index(self) -> usize {
        match self {
            OperatorId::A => 0,
            OperatorId::B => 1,
            OperatorId::C => 2,
            OperatorId::D => 3,
        }
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorId::A => "a",
            OperatorId::B => "b",
            OperatorId::C => "c",
            OperatorId::D => "d",
        };
        f.write_str(name)
    }
}

/// Anything that can be started and stopped as a sound source.
pub trait Oscillator {
    fn is_started(&self) -> bool;
    fn start(&mut self);
    fn stop(&mut self);
}

/// A two-sine FM oscillator: a carrier at `base * carrier_multiplier` phase
/// modulated by a modulator at `base * modulating_multiplier`.
pub trait FmOscillator: Oscillator {
    fn base_frequency(&self) -> f32;
    fn set_base_frequency(&mut self, frequency: f32);
    fn carrier_multiplier(&self) -> f32;
    fn set_carrier_multiplier(&mut self, multiplier: f32);
    fn modulating_multiplier(&self) -> f32;
    fn set_modulating_multiplier(&mut self, multiplier: f32);
    fn modulation_index(&self) -> f32;
    fn set_modulation_index(&mut self, index: f32);
    fn amplitude(&self) -> f32;
    fn set_amplitude(&mut self, amplitude: f32);
}

/// Valid ranges for each [`OperatorConfiguration`] field.
pub struct OperatorConfigurationRanges;

impl OperatorConfigurationRanges {
    pub const BASE_FREQUENCY: RangeInclusive<f32> = 20.0..=2000.0;
    pub const CARRIER_MULTIPLIER: RangeInclusive<f32> = 0.1..=10.0;
    pub const MODULATING_MULTIPLIER: RangeInclusive<f32> = 0.1..=10.0;
    pub const MODULATION_INDEX: RangeInclusive<f32> = 0.0..=100.0;
    pub const AMPLITUDE: RangeInclusive<f32> = 0.0..=1.0;
}

/// The settings of a single FM operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorConfiguration {
    pub id: OperatorId,
    pub base_frequency: f32,
    pub carrier_multiplier: f32,
    pub modulating_multiplier: f32,
    pub modulation_index: f32,
    pub amplitude: f32,
}

impl OperatorConfiguration {
    pub fn new(id: OperatorId) -> Self {
        Self {
            id,
            base_frequency: 440.0,
            carrier_multiplier: 1.0,
            modulating_multiplier: 1.0,
            modulation_index: 1.0,
            amplitude: 0.5,
        }
    }

    pub fn with_base_frequency(mut self, frequency: f32) -> Self {
        self.base_frequency = frequency;
        self
    }

    pub fn with_carrier_multiplier(mut self, multiplier: f32) -> Self {
        self.carrier_multiplier = multiplier;
        self
    }

    pub fn with_modulating_multiplier(mut self, multiplier: f32) -> Self {
        self.modulating_multiplier = multiplier;
        self
    }

    /// Sets the modulator as an absolute frequency, stored as a ratio of the
    /// current base frequency.
    pub fn with_modulating_frequency(mut self, frequency: f32) -> Self {
        if self.base_frequency > 0.0 {
            self.modulating_multiplier = frequency / self.base_frequency;
        }
        self
    }

    pub fn with_modulation_index(mut self, index: f32) -> Self {
        self.modulation_index = index;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Modulator frequency in Hz implied by the base frequency and ratio.
    pub fn modulating_frequency(&self) -> f32 {
        self.base_frequency * self.modulating_multiplier
    }

    /// Returns a copy with every field clamped into its valid range.
    pub fn clamped(&self) -> Self {
        type R = OperatorConfigurationRanges;
        Self {
            id: self.id,
            base_frequency: clamp_to(self.base_frequency, R::BASE_FREQUENCY),
            carrier_multiplier: clamp_to(self.carrier_multiplier, R::CARRIER_MULTIPLIER),
            modulating_multiplier: clamp_to(self.modulating_multiplier, R::MODULATING_MULTIPLIER),
            modulation_index: clamp_to(self.modulation_index, R::MODULATION_INDEX),
            amplitude: clamp_to(self.amplitude, R::AMPLITUDE),
        }
    }

    pub fn is_within_ranges(&self) -> bool {
        type R = OperatorConfigurationRanges;
        R::BASE_FREQUENCY.contains(&self.base_frequency)
            && R::CARRIER_MULTIPLIER.contains(&self.carrier_multiplier)
            && R::MODULATING_MULTIPLIER.contains(&self.modulating_multiplier)
            && R::MODULATION_INDEX.contains(&self.modulation_index)
            && R::AMPLITUDE.contains(&self.amplitude)
    }
}

pub(crate) fn clamp_to(value: f32, range: RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}
