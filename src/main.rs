use anyhow::Context;
use clap::Parser;
use log::info;
use vampire_synth::audio::{CpalEngine, SignalChain};
use vampire_synth::input::{KeyboardHandler, KeyboardStatus};
use vampire_synth::synth::{
    EnvelopeConfiguration, FmSynth, OperatorConfiguration, OperatorId, SynthConfig,
    OPERATOR_COUNT,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Four-operator FM synthesizer played from the computer keyboard", long_about = None)]
struct Args {
    /// Initial master volume (0.0 to 1.0)
    #[arg(short, long, default_value_t = 0.65)]
    volume: f32,

    /// Use the first output device whose name contains this text
    #[arg(short, long)]
    device: Option<String>,

    /// Initial octave shift (-4 to 4)
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    octave: i8,
}

impl From<Args> for SynthConfig {
    fn from(args: Args) -> Self {
        Self {
            master_volume: args.volume.clamp(0.0, 1.0),
            output_device: args.device,
            octave_shift: args.octave,
        }
    }
}

// The voice starts as a simple stack: A carries, B-D add quieter overtones.
fn initial_operators() -> [OperatorConfiguration; OPERATOR_COUNT] {
    [
        OperatorConfiguration::new(OperatorId::A).with_amplitude(0.5),
        OperatorConfiguration::new(OperatorId::B)
            .with_carrier_multiplier(2.0)
            .with_modulation_index(2.0)
            .with_amplitude(0.2),
        OperatorConfiguration::new(OperatorId::C)
            .with_carrier_multiplier(3.0)
            .with_modulating_multiplier(0.5)
            .with_amplitude(0.1),
        OperatorConfiguration::new(OperatorId::D)
            .with_carrier_multiplier(0.5)
            .with_modulation_index(0.0)
            .with_amplitude(0.15),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = SynthConfig::from(Args::parse());

    let chain = SignalChain::new(config.master_volume);
    let engine = CpalEngine::new(chain.clone(), config.output_device.clone());
    let mut synth = FmSynth::with_chain(&chain, engine);

    for operator in initial_operators() {
        synth.update_operator(operator.id, &operator.clamped());
        synth.update_envelope(operator.id, &EnvelopeConfiguration::new(operator.id));
    }

    synth.start().context("failed to start audio engine")?;

    let mut keyboard_handler = KeyboardHandler::new(config.octave_shift);
    info!("Play with A-; and W-[, Z/X shift octave, ,/. change volume, Esc quits");

    // Main loop for keyboard handling
    while keyboard_handler.update(&mut synth) == KeyboardStatus::Running {
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    synth.note_off();
    synth.stop();
    Ok(())
}
