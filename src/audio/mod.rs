// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio engine for GridNotes.
//!
//! This module provides:
//! - FluidSynth integration for sound bank playback
//! - Audio output via cpal
//! - The instrument catalog
//! - [`AudioEngine`], which owns the synth and its output stream and
//!   can be torn down and rebuilt when the instrument changes

pub mod fluidsynth;
pub mod instrument;
pub mod output;

pub use fluidsynth::FluidSynth;
pub use instrument::Instrument;
pub use output::{AudioConfig, AudioOutput};

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info};

use crate::music::MidiNote;
use crate::playback::Synthesizer;

/// MIDI channel every note is played on
pub const CHANNEL: u8 = 0;

/// Preset selected after loading a sound bank
pub const PROGRAM: u8 = 0;

/// Audio error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("Audio initialization failed: {0}")]
    InitFailed(String),

    #[error("Soundfont load failed: {0}")]
    SoundfontLoadFailed(String),

    #[error("Audio stream failed: {0}")]
    StreamFailed(String),

    #[error("Failed to acquire audio lock")]
    LockFailed,

    #[error("No audio device available")]
    NoDevice,

    #[error("Synth is not initialized")]
    NotInitialized,

    #[error("MIDI event rejected: {0}")]
    MidiEvent(String),
}

/// A running synth and the stream it renders into
struct Running {
    synth: Arc<Mutex<FluidSynth>>,
    /// None when rendering without an audio device
    _output: Option<AudioOutput>,
}

/// The built-in synthesizer.
///
/// Starts torn down. [`AudioEngine::initialize`] builds the synth, loads
/// the instrument's sound bank and starts the output stream.
pub struct AudioEngine {
    running: Option<Running>,
    config: AudioConfig,
    soundfont_dir: PathBuf,
    gain: f32,
    instrument: Option<Instrument>,
    /// Whether to open an audio device on initialize
    with_output: bool,
}

impl AudioEngine {
    /// Create a torn-down engine
    pub fn new(config: AudioConfig, soundfont_dir: impl Into<PathBuf>) -> Self {
        Self {
            running: None,
            config,
            soundfont_dir: soundfont_dir.into(),
            gain: 0.5,
            instrument: None,
            with_output: true,
        }
    }

    /// Render without opening an audio device
    pub fn without_output(mut self) -> Self {
        self.with_output = false;
        self
    }

    /// Set output gain (0.0 - 1.0)
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain.clamp(0.0, 1.0);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.running.is_some()
    }

    /// The instrument loaded, if initialized
    pub fn instrument(&self) -> Option<Instrument> {
        self.instrument
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Build the synth, load the instrument and start output.
    ///
    /// Initializing an initialized engine tears it down first.
    pub fn initialize(&mut self, instrument: Instrument) -> Result<(), AudioError> {
        if self.is_initialized() {
            self.teardown();
        }

        let path = instrument.soundfont_path(&self.soundfont_dir);
        info!(instrument = %instrument, path = %path.display(), "initializing synth");

        let mut synth = FluidSynth::new(self.config.sample_rate as f64)?;
        synth.set_gain(self.gain);
        synth.load_soundfont(&path)?;
        synth.program_change(CHANNEL, PROGRAM)?;

        let synth = Arc::new(Mutex::new(synth));
        let output = if self.with_output {
            let render = Arc::clone(&synth);
            Some(AudioOutput::new(self.config.clone(), move |buffer, channels| {
                if let Ok(mut synth) = render.lock() {
                    synth.render(buffer, channels);
                }
            })?)
        } else {
            None
        };

        self.running = Some(Running {
            synth,
            _output: output,
        });
        self.instrument = Some(instrument);
        Ok(())
    }

    /// Silence everything, stop output and drop the synth. Safe to call
    /// when already torn down.
    pub fn teardown(&mut self) {
        if let Some(running) = self.running.take() {
            if let Ok(mut synth) = running.synth.lock() {
                synth.all_notes_off();
            }
            info!("synth torn down");
        }
        self.instrument = None;
    }

    /// Silence all, tear down, and initialize with another instrument
    pub fn change_instrument(&mut self, instrument: Instrument) -> Result<(), AudioError> {
        if self.is_initialized() {
            self.silence_all()?;
        }
        self.teardown();
        self.initialize(instrument)
    }

    fn with_synth<T>(
        &self,
        f: impl FnOnce(&mut FluidSynth) -> Result<T, AudioError>,
    ) -> Result<T, AudioError> {
        let running = self.running.as_ref().ok_or(AudioError::NotInitialized)?;
        let mut synth = running.synth.lock().map_err(|_| AudioError::LockFailed)?;
        f(&mut synth)
    }
}

impl Synthesizer for AudioEngine {
    fn note_on(&mut self, pitch: MidiNote, velocity: u8) -> Result<(), AudioError> {
        self.with_synth(|synth| synth.note_on(CHANNEL, pitch, velocity))
    }

    fn note_off(&mut self, pitch: MidiNote) -> Result<(), AudioError> {
        self.with_synth(|synth| synth.note_off(CHANNEL, pitch))
    }

    fn silence_all(&mut self) -> Result<(), AudioError> {
        debug!("silencing all notes");
        self.with_synth(|synth| {
            for pitch in 0..=crate::playback::MAX_MIDI_NOTE {
                synth.note_off(CHANNEL, pitch)?;
            }
            Ok(())
        })
    }

    fn set_instrument(&mut self, instrument: Instrument) -> Result<(), AudioError> {
        if self.instrument == Some(instrument) {
            return Ok(());
        }
        info!(instrument = %instrument, "changing instrument");
        self.change_instrument(instrument)
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}
