pub mod config;
pub mod controller;
pub mod envelope;
pub mod mixer;
pub mod note;
pub mod operator;

#[cfg(test)]
mod spies;

pub use self::config::SynthConfig;
pub use self::controller::SynthController;
pub use self::envelope::{Envelope, EnvelopeConfiguration, EnvelopeConfigurationRanges};
pub use self::mixer::Mixer;
pub use self::note::{MidiNote, NoteError};
pub use self::operator::{
    FmOscillator, OperatorConfiguration, OperatorConfigurationRanges, OperatorId, Oscillator,
    OPERATOR_COUNT,
};

use crate::audio::{AmplitudeEnvelopeNode, FmOscillatorNode, MixerNode};

/// A controller wired to the concrete signal-chain nodes.
pub type FmSynth<E> = SynthController<E, FmOscillatorNode, AmplitudeEnvelopeNode, MixerNode>;
