use crate::audio::AudioEngine;
use crate::synth::config::SynthConfig;
use crate::synth::controller::SynthController;
use crate::synth::envelope::Envelope;
use crate::synth::mixer::Mixer;
use crate::synth::note::MidiNote;
use crate::synth::operator::FmOscillator;
use device_query::{DeviceQuery, DeviceState, Keycode};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

const VOLUME_STEP: f32 = 0.05;
const KEYBOARD_VELOCITY: u8 = 100;

/// What the caller should do after a keyboard poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardStatus {
    Running,
    Quit,
}

/// Turns key-state snapshots into controller calls. Mono, last-note priority:
/// the most recently pressed held key sounds.
pub struct KeyTracker {
    key_to_note: HashMap<Keycode, u8>,
    held: Vec<Keycode>, // Note keys in press order
    control_keys: HashSet<Keycode>, // Control keys down at the previous poll
    octave_shift: i8,
    sounding: Option<MidiNote>,
}

impl KeyTracker {
    pub fn new(octave_shift: i8) -> Self {
        // Bottom row plays naturals from A4, the row above plays the sharps
        let key_to_note: HashMap<Keycode, u8> = [
            (Keycode::A, 69),         // A4
            (Keycode::S, 71),         // B4
            (Keycode::D, 72),         // C5
            (Keycode::F, 74),         // D5
            (Keycode::G, 76),         // E5
            (Keycode::H, 77),         // F5
            (Keycode::J, 79),         // G5
            (Keycode::K, 81),         // A5
            (Keycode::L, 83),         // B5
            (Keycode::Semicolon, 84), // C6
            (Keycode::W, 70),           // A#4/Bb4
            (Keycode::R, 73),           // C#5/Db5
            (Keycode::T, 75),           // D#5/Eb5
            (Keycode::U, 78),           // F#5/Gb5
            (Keycode::I, 80),           // G#5/Ab5
            (Keycode::O, 82),           // A#5/Bb5
            (Keycode::LeftBracket, 85), // C#6/Db6
        ]
        .into_iter()
        .collect();

        let max = SynthConfig::MAX_OCTAVE_SHIFT;
        Self {
            key_to_note,
            held: Vec::new(),
            control_keys: HashSet::new(),
            octave_shift: octave_shift.clamp(-max, max),
            sounding: None,
        }
    }

    pub fn octave_shift(&self) -> i8 {
        self.octave_shift
    }

    pub fn sounding(&self) -> Option<MidiNote> {
        self.sounding
    }

    /// Applies one snapshot of pressed keys to the synth.
    pub fn handle_keys<E, O, V, M>(
        &mut self,
        keys: &[Keycode],
        synth: &mut SynthController<E, O, V, M>,
    ) -> KeyboardStatus
    where
        E: AudioEngine,
        O: FmOscillator,
        V: Envelope,
        M: Mixer,
    {
        if keys.contains(&Keycode::Escape) {
            return KeyboardStatus::Quit;
        }

        self.handle_control_keys(keys, synth);

        let before = self.held.last().copied();
        self.held.retain(|key| keys.contains(key));
        for key in keys {
            if self.key_to_note.contains_key(key) && !self.held.contains(key) {
                self.held.push(*key);
            }
        }

        let after = self.held.last().copied();
        if after != before {
            match after.and_then(|key| self.note_for(key)) {
                Some(note) => {
                    debug!("Key '{:?}' -> note {}", after, note.pitch);
                    synth.note_on(note);
                    self.sounding = Some(note);
                }
                None => {
                    synth.note_off();
                    self.sounding = None;
                }
            }
        }

        KeyboardStatus::Running
    }

    fn note_for(&self, key: Keycode) -> Option<MidiNote> {
        let pitch = *self.key_to_note.get(&key)?;
        let note = MidiNote::with_velocity(pitch, KEYBOARD_VELOCITY);
        Some(note.transposed(self.octave_shift as i16 * 12))
    }

    fn handle_control_keys<E, O, V, M>(
        &mut self,
        keys: &[Keycode],
        synth: &mut SynthController<E, O, V, M>,
    ) where
        E: AudioEngine,
        O: FmOscillator,
        V: Envelope,
        M: Mixer,
    {
        let max = SynthConfig::MAX_OCTAVE_SHIFT;
        for key in [Keycode::Z, Keycode::X, Keycode::Comma, Keycode::Dot] {
            let is_pressed = keys.contains(&key);
            let was_pressed = self.control_keys.contains(&key);

            if is_pressed && !was_pressed {
                match key {
                    Keycode::Z => self.octave_shift = (self.octave_shift - 1).max(-max),
                    Keycode::X => self.octave_shift = (self.octave_shift + 1).min(max),
                    Keycode::Comma => {
                        let volume = (synth.master_volume() - VOLUME_STEP).clamp(0.0, 1.0);
                        synth.set_master_volume(volume);
                    }
                    Keycode::Dot => {
                        let volume = (synth.master_volume() + VOLUME_STEP).clamp(0.0, 1.0);
                        synth.set_master_volume(volume);
                    }
                    _ => {}
                }
                match key {
                    Keycode::Z | Keycode::X => info!("Octave shift: {}", self.octave_shift),
                    _ => info!("Master volume: {:.2}", synth.master_volume()),
                }
            }

            if is_pressed {
                self.control_keys.insert(key);
            } else {
                self.control_keys.remove(&key);
            }
        }
    }
}

/// Polls the computer keyboard and plays the synth from it.
pub struct KeyboardHandler {
    device_state: DeviceState,
    tracker: KeyTracker,
}

impl KeyboardHandler {
    pub fn new(octave_shift: i8) -> Self {
        Self {
            device_state: DeviceState::new(),
            tracker: KeyTracker::new(octave_shift),
        }
    }

    pub fn update<E, O, V, M>(&mut self, synth: &mut SynthController<E, O, V, M>) -> KeyboardStatus
    where
        E: AudioEngine,
        O: FmOscillator,
        V: Envelope,
        M: Mixer,
    {
        let keys: Vec<Keycode> = self.device_state.get_keys();
        self.tracker.handle_keys(&keys, synth)
    }
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new(0)
    }
}
