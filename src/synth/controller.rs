use super::envelope::{Envelope, EnvelopeConfiguration};
use super::mixer::Mixer;
use super::note::MidiNote;
use super::operator::{FmOscillator, OperatorConfiguration, OperatorId, OPERATOR_COUNT};
use crate::audio::{
    AmplitudeEnvelopeNode, AudioEngine, AudioEngineError, FmOscillatorNode, MixerNode, SignalChain,
};
use log::debug;

/// Drives the four-operator FM voice: one oscillator and one envelope per
/// operator slot, a master mixer, and the engine that renders them.
///
/// All four operators always play together as a single voice, so a note
/// fans out to every slot and there is no voice allocation.
pub struct SynthController<E, O, V, M> {
    engine: E,
    oscillators: [O; OPERATOR_COUNT],
    envelopes: [V; OPERATOR_COUNT],
    mixer: M,
}

impl<E, O, V, M> SynthController<E, O, V, M>
where
    E: AudioEngine,
    O: FmOscillator,
    V: Envelope,
    M: Mixer,
{
    pub fn new(
        engine: E,
        oscillators: [O; OPERATOR_COUNT],
        envelopes: [V; OPERATOR_COUNT],
        mixer: M,
    ) -> Self {
        Self {
            engine,
            oscillators,
            envelopes,
            mixer,
        }
    }

    pub fn start(&mut self) -> Result<(), AudioEngineError> {
        self.engine.start()
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn note_on(&mut self, note: MidiNote) {
        let frequency = note.frequency();
        debug!("Note on: pitch {} ({:.2} Hz)", note.pitch, frequency);

        for oscillator in self.oscillators.iter_mut() {
            oscillator.set_base_frequency(frequency);
            oscillator.start();
        }

        for envelope in self.envelopes.iter_mut() {
            envelope.open_gate();
        }
    }

    pub fn note_off(&mut self) {
        debug!("Note off");

        for envelope in self.envelopes.iter_mut() {
            envelope.close_gate();
        }

        for oscillator in self.oscillators.iter_mut() {
            oscillator.stop();
        }
    }

    /// Applies every field of `configuration` to the oscillator in `id`'s slot.
    pub fn update_operator(&mut self, id: OperatorId, configuration: &OperatorConfiguration) {
        debug!("Updating operator {}: {:?}", id, configuration);
        let oscillator = &mut self.oscillators[id.index()];

        oscillator.set_base_frequency(configuration.base_frequency);
        oscillator.set_carrier_multiplier(configuration.carrier_multiplier);
        oscillator.set_modulating_multiplier(configuration.modulating_multiplier);
        oscillator.set_modulation_index(configuration.modulation_index);
        oscillator.set_amplitude(configuration.amplitude);
    }

    /// Applies every field of `configuration` to the envelope in `id`'s slot.
    pub fn update_envelope(&mut self, id: OperatorId, configuration: &EnvelopeConfiguration) {
        debug!("Updating envelope {}: {:?}", id, configuration);
        let envelope = &mut self.envelopes[id.index()];

        envelope.set_attack_duration(configuration.attack);
        envelope.set_decay_duration(configuration.decay);
        envelope.set_sustain_level(configuration.sustain);
        envelope.set_release_duration(configuration.release);
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.mixer.set_volume(volume);
    }

    pub fn master_volume(&self) -> f32 {
        self.mixer.volume()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine, for engines the caller pulls audio from.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn oscillator(&self, id: OperatorId) -> &O {
        &self.oscillators[id.index()]
    }

    pub fn envelope(&self, id: OperatorId) -> &V {
        &self.envelopes[id.index()]
    }

    pub fn mixer(&self) -> &M {
        &self.mixer
    }
}

impl<E: AudioEngine> SynthController<E, FmOscillatorNode, AmplitudeEnvelopeNode, MixerNode> {
    /// Builds a controller over handles to `chain`'s nodes.
    pub fn with_chain(chain: &SignalChain, engine: E) -> Self {
        Self::new(engine, chain.oscillators(), chain.envelopes(), chain.mixer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::operator::Oscillator;
    use crate::synth::spies::{
        AudioEngineSpy, EngineMessage, EnvelopeMessage, EnvelopeSpy, FmOscillatorSpy, MixerMessage,
        MixerSpy, OscillatorMessage,
    };

    type Sut = SynthController<AudioEngineSpy, FmOscillatorSpy, EnvelopeSpy, MixerSpy>;

    fn make_sut() -> Sut {
        SynthController::new(
            AudioEngineSpy::default(),
            Default::default(),
            Default::default(),
            MixerSpy::default(),
        )
    }

    fn oscillators(sut: &Sut) -> impl Iterator<Item = &FmOscillatorSpy> {
        OperatorId::ALL.into_iter().map(move |id| sut.oscillator(id))
    }

    fn envelopes(sut: &Sut) -> impl Iterator<Item = &EnvelopeSpy> {
        OperatorId::ALL.into_iter().map(move |id| sut.envelope(id))
    }

    #[test]
    fn new_does_not_touch_collaborators() {
        let sut = make_sut();

        assert!(sut.engine().messages.is_empty());
        assert!(!sut.is_running());
        assert!(oscillators(&sut).all(|o| o.messages.is_empty() && !o.is_started()));
        assert!(envelopes(&sut).all(|e| e.messages.is_empty()));
        assert!(sut.mixer().messages.is_empty());
    }

    #[test]
    fn start_starts_engine() {
        let mut sut = make_sut();

        sut.start().unwrap();

        assert_eq!(sut.engine().messages, vec![EngineMessage::Start]);
        assert!(sut.is_running());
    }

    #[test]
    fn start_delivers_engine_error() {
        let mut sut = SynthController::new(
            AudioEngineSpy::failing(AudioEngineError::FailedToStart("Test error".into())),
            <[FmOscillatorSpy; OPERATOR_COUNT]>::default(),
            <[EnvelopeSpy; OPERATOR_COUNT]>::default(),
            MixerSpy::default(),
        );

        assert_eq!(
            sut.start(),
            Err(AudioEngineError::FailedToStart("Test error".into()))
        );
        assert!(!sut.is_running());
    }

    #[test]
    fn start_delivers_hardware_unavailable() {
        let mut sut = SynthController::new(
            AudioEngineSpy::failing(AudioEngineError::HardwareUnavailable),
            <[FmOscillatorSpy; OPERATOR_COUNT]>::default(),
            <[EnvelopeSpy; OPERATOR_COUNT]>::default(),
            MixerSpy::default(),
        );

        assert_eq!(sut.start(), Err(AudioEngineError::HardwareUnavailable));
        assert_eq!(sut.engine().messages, vec![EngineMessage::Start]);
    }

    #[test]
    fn stop_stops_engine() {
        let mut sut = make_sut();
        sut.start().unwrap();

        sut.stop();

        assert_eq!(
            sut.engine().messages,
            vec![EngineMessage::Start, EngineMessage::Stop]
        );
        assert!(!sut.is_running());
    }

    #[test]
    fn note_on_sets_base_frequency_on_all_oscillators() {
        let mut sut = make_sut();

        sut.note_on(MidiNote::new(69));

        for oscillator in oscillators(&sut) {
            assert!(oscillator
                .messages
                .contains(&OscillatorMessage::SetBaseFrequency(440.0)));
        }
    }

    #[test]
    fn note_on_uses_the_same_frequency_everywhere() {
        let mut sut = make_sut();
        let note = MidiNote::new(61);

        sut.note_on(note);

        assert!(oscillators(&sut).all(|o| o.base_frequency() == note.frequency()));
    }

    #[test]
    fn note_on_starts_all_oscillators() {
        let mut sut = make_sut();

        sut.note_on(MidiNote::new(60));

        for oscillator in oscillators(&sut) {
            assert!(oscillator.messages.contains(&OscillatorMessage::Start));
            assert!(oscillator.is_started());
        }
    }

    #[test]
    fn note_on_opens_all_envelope_gates() {
        let mut sut = make_sut();

        sut.note_on(MidiNote::new(60));

        for envelope in envelopes(&sut) {
            assert_eq!(envelope.messages, vec![EnvelopeMessage::OpenGate]);
            assert!(envelope.gate_open);
        }
    }

    #[test]
    fn note_off_closes_all_envelope_gates() {
        let mut sut = make_sut();
        sut.note_on(MidiNote::new(60));

        sut.note_off();

        for envelope in envelopes(&sut) {
            assert_eq!(
                envelope.messages,
                vec![EnvelopeMessage::OpenGate, EnvelopeMessage::CloseGate]
            );
            assert!(!envelope.gate_open);
        }
    }

    #[test]
    fn note_off_stops_all_oscillators() {
        let mut sut = make_sut();
        sut.note_on(MidiNote::new(60));

        sut.note_off();

        for oscillator in oscillators(&sut) {
            assert_eq!(oscillator.messages.last(), Some(&OscillatorMessage::Stop));
            assert!(!oscillator.is_started());
        }
    }

    #[test]
    fn note_off_without_note_on_still_releases_everything() {
        let mut sut = make_sut();

        sut.note_off();

        assert!(envelopes(&sut).all(|e| e.messages == vec![EnvelopeMessage::CloseGate]));
        assert!(oscillators(&sut).all(|o| o.messages == vec![OscillatorMessage::Stop]));
    }

    #[test]
    fn update_operator_applies_configuration_to_its_slot() {
        let mut sut = make_sut();
        let config = OperatorConfiguration::new(OperatorId::A)
            .with_base_frequency(880.0)
            .with_carrier_multiplier(2.0)
            .with_modulating_multiplier(3.0)
            .with_modulation_index(5.0)
            .with_amplitude(0.8);

        sut.update_operator(OperatorId::A, &config);

        assert_eq!(
            sut.oscillator(OperatorId::A).messages,
            vec![
                OscillatorMessage::SetBaseFrequency(880.0),
                OscillatorMessage::SetCarrierMultiplier(2.0),
                OscillatorMessage::SetModulatingMultiplier(3.0),
                OscillatorMessage::SetModulationIndex(5.0),
                OscillatorMessage::SetAmplitude(0.8),
            ]
        );
    }

    #[test]
    fn update_operator_leaves_other_slots_alone() {
        for target in OperatorId::ALL {
            let mut sut = make_sut();
            let config = OperatorConfiguration::new(target).with_base_frequency(880.0);

            sut.update_operator(target, &config);

            for id in OperatorId::ALL {
                let touched = !sut.oscillator(id).messages.is_empty();
                assert_eq!(touched, id == target, "operator {id} when updating {target}");
            }
        }
    }

    #[test]
    fn update_envelope_applies_configuration_to_its_slot() {
        let mut sut = make_sut();
        let config = EnvelopeConfiguration::new(OperatorId::C)
            .with_attack(0.5)
            .with_decay(0.2)
            .with_sustain(0.7)
            .with_release(1.0);

        sut.update_envelope(OperatorId::C, &config);

        assert_eq!(
            sut.envelope(OperatorId::C).messages,
            vec![
                EnvelopeMessage::SetAttack(0.5),
                EnvelopeMessage::SetDecay(0.2),
                EnvelopeMessage::SetSustain(0.7),
                EnvelopeMessage::SetRelease(1.0),
            ]
        );
        for id in [OperatorId::A, OperatorId::B, OperatorId::D] {
            assert!(sut.envelope(id).messages.is_empty());
        }
    }

    #[test]
    fn set_master_volume_updates_mixer() {
        let mut sut = make_sut();

        sut.set_master_volume(0.75);

        assert_eq!(sut.mixer().messages, vec![MixerMessage::SetVolume(0.75)]);
        assert_eq!(sut.master_volume(), 0.75);
    }
}
