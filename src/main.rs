// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridnotes::audio::{AudioConfig, AudioEngine, Instrument};
use gridnotes::config::{AppConfig, DeviceClass};
use gridnotes::midi::{print_ports, MidiPortSynth, MidirOutput};
use gridnotes::playback::Synthesizer;
use gridnotes::ui::{App, Player};

fn print_usage() {
    println!("GridNotes - Scale-aware grid keyboard");
    println!();
    println!("Usage: gridnotes [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <PATH>         Load startup options from a YAML file");
    println!("  --device <phone|tablet> Keyboard defaults to start from");
    println!("  --midi-out <NAME>       Play through a MIDI output instead of the built-in synth");
    println!("  --list-midi             List available MIDI outputs");
    println!("  --list-instruments      List available instruments");
    println!("  --help                  Show this help message");
}

fn print_instruments(config: &AppConfig) {
    println!("Instruments (sound banks in {}):", config.soundfont_dir.display());
    for instrument in Instrument::ALL {
        let marker = if config.soundfont_path(instrument).exists() { " " } else { "!" };
        println!("  {} {}", marker, instrument);
    }
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    device: Option<DeviceClass>,
    midi_out: Option<String>,
    list_midi: bool,
    list_instruments: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--device" => {
                let name = value("--device")?;
                let device = DeviceClass::from_name(&name)
                    .ok_or_else(|| anyhow!("Unknown device class: {}", name))?;
                options.device = Some(device);
            }
            "--midi-out" => options.midi_out = Some(value("--midi-out")?),
            "--list-midi" => options.list_midi = true,
            "--list-instruments" => options.list_instruments = true,
            "--help" | "-h" => options.help = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(options)
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file: {:?}", config.log_file))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_synth(config: &AppConfig, instrument: Instrument) -> Result<Box<dyn Synthesizer>> {
    if let Some(name) = &config.midi_output {
        let output = MidirOutput::new_by_name(name)?;
        info!(port = output.port_name(), "playing through MIDI output");
        return Ok(Box::new(MidiPortSynth::new(Box::new(output), 0)));
    }

    let mut engine = AudioEngine::new(
        AudioConfig::new(config.sample_rate, config.buffer_size),
        config.soundfont_dir.clone(),
    )
    .with_gain(config.gain);
    engine
        .initialize(instrument)
        .with_context(|| format!("Failed to start synth with {}", instrument))?;
    Ok(Box::new(engine))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return Ok(());
    }

    let mut config = match &options.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(device) = options.device {
        config.device_class = device;
    }
    if let Some(name) = options.midi_out {
        config.midi_output = Some(name);
    }

    if options.list_midi {
        return print_ports();
    }
    if options.list_instruments {
        print_instruments(&config);
        return Ok(());
    }

    init_logging(&config)?;
    info!(device = ?config.device_class, "starting GridNotes");

    let keyboard_config = config.initial_configuration();
    let synth = build_synth(&config, keyboard_config.instrument)?;
    let player = Player::new(keyboard_config, synth);

    let mut app = App::new(player, Duration::from_millis(config.hold_ms))
        .context("Failed to set up terminal")?;
    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["--device", "phone", "--midi-out", "IAC"])).unwrap();
        assert_eq!(options.device, Some(DeviceClass::Phone));
        assert_eq!(options.midi_out, Some("IAC".to_string()));
        assert!(!options.help);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--device"])).is_err());
        assert!(parse_args(&args(&["--device", "watch"])).is_err());
        assert!(parse_args(&args(&["--tempo", "120"])).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let options = parse_args(&args(&["--list-midi", "--list-instruments", "-h"])).unwrap();
        assert!(options.list_midi && options.list_instruments && options.help);
        assert!(options.config.is_none());
    }
}
