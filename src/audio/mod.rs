mod chain;
mod cpal_backend;
mod envelope;
mod mixer;
mod offline;
mod oscillator;

pub use self::chain::SignalChain;
pub use self::cpal_backend::CpalEngine;
pub use self::envelope::AmplitudeEnvelopeNode;
pub use self::mixer::MixerNode;
pub use self::offline::OfflineEngine;
pub use self::oscillator::FmOscillatorNode;

use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// The component that owns the output device and pulls audio from the signal chain.
pub trait AudioEngine {
    fn is_running(&self) -> bool;
    fn start(&mut self) -> Result<(), AudioEngineError>;
    fn stop(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioEngineError {
    #[error("audio engine failed to start: {0}")]
    FailedToStart(String),
    #[error("no audio output hardware available")]
    HardwareUnavailable,
}

// Node state is shared with the audio callback; a panic there must not take
// the controller down with it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
