use std::sync::OnceLock;
use thiserror::Error;

/// Velocity used when a note is created without one.
pub const DEFAULT_VELOCITY: u8 = 127;

const MAX_MIDI_VALUE: u8 = 127;

/// A MIDI note: pitch and velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MidiNote {
    pub pitch: u8,
    pub velocity: u8,
}

impl MidiNote {
    /// Creates a note at full velocity.
    pub fn new(pitch: u8) -> Self {
        Self::with_velocity(pitch, DEFAULT_VELOCITY)
    }

    pub fn with_velocity(pitch: u8, velocity: u8) -> Self {
        Self { pitch, velocity }
    }

    /// Creates a note, rejecting values outside the 7-bit MIDI range.
    pub fn try_new(pitch: u8, velocity: u8) -> Result<Self, NoteError> {
        let note = Self { pitch, velocity };
        note.validate()?;
        Ok(note)
    }

    pub fn validate(&self) -> Result<(), NoteError> {
        if self.pitch > MAX_MIDI_VALUE {
            return Err(NoteError::InvalidPitch(self.pitch));
        }

        if self.velocity > MAX_MIDI_VALUE {
            return Err(NoteError::InvalidVelocity(self.velocity));
        }

        Ok(())
    }

    /// Equal-tempered frequency in Hz, referenced to A4 (pitch 69) = 440 Hz.
    pub fn frequency(&self) -> f32 {
        match midi_frequencies().get(self.pitch as usize) {
            Some(frequency) => *frequency,
            None => pitch_to_frequency(self.pitch),
        }
    }

    /// Shifts the pitch by whole semitones, saturating at the ends of the MIDI range.
    pub fn transposed(&self, semitones: i16) -> Self {
        let pitch = (self.pitch as i16)
            .saturating_add(semitones)
            .clamp(0, MAX_MIDI_VALUE as i16) as u8;
        Self { pitch, ..*self }
    }
}

fn pitch_to_frequency(pitch: u8) -> f32 {
    440.0 * 2.0f32.powf((pitch as f32 - 69.0) / 12.0)
}

/// Global frequency table for MIDI notes
fn midi_frequencies() -> &'static [f32; 128] {
    static FREQUENCIES: OnceLock<[f32; 128]> = OnceLock::new();

    FREQUENCIES.get_or_init(|| {
        let mut frequencies = [0.0; 128];
        for (pitch, frequency) in frequencies.iter_mut().enumerate() {
            *frequency = pitch_to_frequency(pitch as u8);
        }
        frequencies
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error("Invalid MIDI pitch: {0}. Must be 0-127.")]
    InvalidPitch(u8),
    #[error("Invalid MIDI velocity: {0}. Must be 0-127.")]
    InvalidVelocity(u8),
}
