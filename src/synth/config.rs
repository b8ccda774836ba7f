/// Startup settings for the synthesizer.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthConfig {
    pub master_volume: f32,
    pub output_device: Option<String>, // Substring of the output device name; default device if None
    pub octave_shift: i8,
}

impl SynthConfig {
    pub const MAX_OCTAVE_SHIFT: i8 = 4;
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            master_volume: 0.65,
            output_device: None,
            octave_shift: 0,
        }
    }
}
