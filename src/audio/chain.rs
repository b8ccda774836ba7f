use super::{AmplitudeEnvelopeNode, FmOscillatorNode, MixerNode};
use crate::synth::operator::OPERATOR_COUNT;

/// The fixed four-operator voice: each oscillator feeds its own envelope and
/// the enveloped operators are summed into the master mixer.
///
/// The chain keeps its own handles to every node, so after the controller is
/// given clones of them it can be moved into an engine for rendering.
#[derive(Debug, Clone)]
pub struct SignalChain {
    oscillators: [FmOscillatorNode; OPERATOR_COUNT],
    envelopes: [AmplitudeEnvelopeNode; OPERATOR_COUNT],
    mixer: MixerNode,
    scratch: Vec<f32>,
}

impl SignalChain {
    pub fn new(master_volume: f32) -> Self {
        Self {
            oscillators: Default::default(),
            envelopes: Default::default(),
            mixer: MixerNode::new(master_volume),
            scratch: Vec::new(),
        }
    }

    pub fn oscillators(&self) -> [FmOscillatorNode; OPERATOR_COUNT] {
        self.oscillators.clone()
    }

    pub fn envelopes(&self) -> [AmplitudeEnvelopeNode; OPERATOR_COUNT] {
        self.envelopes.clone()
    }

    pub fn mixer(&self) -> MixerNode {
        self.mixer.clone()
    }

    /// True while any operator envelope is still producing sound.
    pub fn is_sounding(&self) -> bool {
        self.envelopes.iter().any(|envelope| !envelope.is_finished())
    }

    /// Renders one mono buffer, overwriting `output`.
    pub fn process(&mut self, output: &mut [f32], sample_rate: f32) {
        output.fill(0.0);
        if output.is_empty() {
            return;
        }

        self.scratch.resize(output.len(), 0.0);
        for (oscillator, envelope) in self.oscillators.iter().zip(self.envelopes.iter()) {
            oscillator.process(&mut self.scratch, sample_rate);
            envelope.apply(&mut self.scratch, sample_rate);

            for (out, sample) in output.iter_mut().zip(self.scratch.iter()) {
                *out += *sample;
            }
        }

        self.mixer.process(output, sample_rate);
    }
}

impl Default for SignalChain {
    fn default() -> Self {
        Self::new(1.0)
    }
}
