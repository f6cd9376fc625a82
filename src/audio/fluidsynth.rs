// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! FluidSynth integration for software synthesis.
//!
//! Wraps FluidLite for playing a single-preset SF2 sound bank on one
//! MIDI channel.

use fluidlite::{IsSettings, Settings, Synth};
use std::path::Path;

use super::AudioError;
use crate::midi::messages::{CC_ALL_NOTES_OFF, CC_ALL_SOUND_OFF, MAX_DATA_VALUE};

/// FluidSynth wrapper for software synthesis
pub struct FluidSynth {
    synth: Synth,
    /// Output gain (0.0 - 1.0)
    gain: f32,
    /// Loaded sound bank ID
    soundfont_id: Option<u32>,
    sample_rate: f64,
}

impl FluidSynth {
    /// Create a synth rendering at `sample_rate`
    pub fn new(sample_rate: f64) -> Result<Self, AudioError> {
        let settings = Settings::new()
            .map_err(|e| AudioError::InitFailed(format!("FluidLite settings: {:?}", e)))?;

        if let Some(setting) = settings.num("synth.sample-rate") {
            setting.set(sample_rate);
        }
        if let Some(setting) = settings.int("synth.polyphony") {
            setting.set(256);
        }
        if let Some(setting) = settings.int("synth.midi-channels") {
            setting.set(16);
        }

        let synth = Synth::new(settings)
            .map_err(|e| AudioError::InitFailed(format!("FluidLite synth: {:?}", e)))?;

        // Reverb and chorus add latency
        synth.set_reverb_on(false);
        synth.set_chorus_on(false);

        Ok(Self {
            synth,
            gain: 0.5,
            soundfont_id: None,
            sample_rate,
        })
    }

    /// Load a sound bank, replacing any previous one
    pub fn load_soundfont(&mut self, path: &Path) -> Result<(), AudioError> {
        if !path.exists() {
            return Err(AudioError::SoundfontLoadFailed(format!(
                "Soundfont file not found: {}",
                path.display()
            )));
        }
        let filename = path.to_str().ok_or_else(|| {
            AudioError::SoundfontLoadFailed(format!("Non UTF-8 path: {}", path.display()))
        })?;

        if let Some(id) = self.soundfont_id.take() {
            let _ = self.synth.sfunload(id, true);
        }

        let id = self.synth.sfload(filename, true).map_err(|_| {
            AudioError::SoundfontLoadFailed(format!("Failed to load soundfont: {}", filename))
        })?;
        self.soundfont_id = Some(id);
        Ok(())
    }

    pub fn has_soundfont(&self) -> bool {
        self.soundfont_id.is_some()
    }

    /// Render audio to buffer (interleaved)
    pub fn render(&mut self, buffer: &mut [f32], channels: usize) {
        if channels == 2 {
            let _ = self.synth.write(&mut *buffer);
            for sample in buffer.iter_mut() {
                *sample *= self.gain;
            }
        } else if channels == 1 {
            // Render stereo then mix down
            let frames = buffer.len();
            let mut stereo = vec![0.0f32; frames * 2];
            let _ = self.synth.write(stereo.as_mut_slice());
            for (i, sample) in buffer.iter_mut().enumerate() {
                *sample = (stereo[i * 2] + stereo[i * 2 + 1]) * 0.5 * self.gain;
            }
        }
    }

    /// Send note on. Velocity is clamped to 127.
    pub fn note_on(&mut self, channel: u8, note: u8, velocity: u8) -> Result<(), AudioError> {
        let velocity = velocity.min(MAX_DATA_VALUE);
        self.synth
            .note_on(channel as u32, note as u32, velocity as u32)
            .map_err(|e| AudioError::MidiEvent(format!("note on {}: {:?}", note, e)))
    }

    /// Send note off. FluidLite reports an error for notes that are not
    /// sounding; that is not a failure here.
    pub fn note_off(&mut self, channel: u8, note: u8) -> Result<(), AudioError> {
        let _ = self.synth.note_off(channel as u32, note as u32);
        Ok(())
    }

    /// Select a preset on a channel
    pub fn program_change(&mut self, channel: u8, program: u8) -> Result<(), AudioError> {
        self.synth
            .program_change(channel as u32, program as u32)
            .map_err(|e| AudioError::MidiEvent(format!("program change {}: {:?}", program, e)))
    }

    /// All notes off and all sound off on every channel
    pub fn all_notes_off(&mut self) {
        for channel in 0..16 {
            let _ = self.synth.cc(channel, CC_ALL_NOTES_OFF as u32, 0);
            let _ = self.synth.cc(channel, CC_ALL_SOUND_OFF as u32, 0);
        }
    }

    /// Set output gain (0.0 - 1.0)
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}
