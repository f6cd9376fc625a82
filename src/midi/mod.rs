// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI output abstraction layer.
//!
//! This module provides a trait-based abstraction for MIDI output so that
//! GridNotes can drive an external instrument instead of the built-in
//! synth. [`MidiPortSynth`] adapts any [`MidiOutput`] to the
//! [`Synthesizer`] the playback session talks to.

pub mod midir_backend;

use anyhow::Result;

pub use midir_backend::{list_ports, print_ports, MidirOutput};

use crate::audio::AudioError;
use crate::music::MidiNote;
use crate::playback::Synthesizer;

/// Trait for MIDI output implementations.
pub trait MidiOutput: Send {
    /// Send a MIDI message immediately.
    ///
    /// # Arguments
    /// * `message` - Raw MIDI bytes (e.g., `[0x90, 60, 127]` for Note On)
    fn send(&mut self, message: &[u8]) -> Result<()>;
}

/// MIDI message constants and builders
pub mod messages {
    // Channel Voice Messages (upper nibble, lower nibble is channel 0-15)
    pub const NOTE_OFF: u8 = 0x80;
    pub const NOTE_ON: u8 = 0x90;
    pub const PROGRAM_CHANGE: u8 = 0xC0;

    // Channel Mode Messages (controller numbers)
    pub const CC_ALL_SOUND_OFF: u8 = 120;
    pub const CC_ALL_NOTES_OFF: u8 = 123;

    /// Largest value a data byte can carry
    pub const MAX_DATA_VALUE: u8 = 0x7F;

    /// Note On, velocity clamped to a data byte
    pub fn note_on(channel: u8, note: u8, velocity: u8) -> [u8; 3] {
        [
            NOTE_ON | (channel & 0x0F),
            note & MAX_DATA_VALUE,
            velocity.min(MAX_DATA_VALUE),
        ]
    }

    /// Note Off with zero release velocity
    pub fn note_off(channel: u8, note: u8) -> [u8; 3] {
        [NOTE_OFF | (channel & 0x0F), note & MAX_DATA_VALUE, 0]
    }

    pub fn program_change(channel: u8, program: u8) -> [u8; 2] {
        [PROGRAM_CHANGE | (channel & 0x0F), program & MAX_DATA_VALUE]
    }
}

/// Plays notes on an external MIDI instrument
pub struct MidiPortSynth {
    output: Box<dyn MidiOutput>,
    channel: u8,
}

impl MidiPortSynth {
    /// Play on `channel` (0-15) of `output`
    pub fn new(output: Box<dyn MidiOutput>, channel: u8) -> Self {
        Self {
            output,
            channel: channel & 0x0F,
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Select a program on the instrument
    pub fn program_change(&mut self, program: u8) -> Result<(), AudioError> {
        self.send(&messages::program_change(self.channel, program))
    }

    fn send(&mut self, message: &[u8]) -> Result<(), AudioError> {
        self.output
            .send(message)
            .map_err(|e| AudioError::MidiEvent(e.to_string()))
    }
}

impl Synthesizer for MidiPortSynth {
    fn note_on(&mut self, pitch: MidiNote, velocity: u8) -> Result<(), AudioError> {
        self.send(&messages::note_on(self.channel, pitch, velocity))
    }

    fn note_off(&mut self, pitch: MidiNote) -> Result<(), AudioError> {
        self.send(&messages::note_off(self.channel, pitch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock MIDI output for testing
    #[derive(Clone)]
    struct MockMidiOutput {
        messages: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl MockMidiOutput {
        fn new() -> Self {
            Self {
                messages: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn get_messages(&self) -> Vec<Vec<u8>> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl MidiOutput for MockMidiOutput {
        fn send(&mut self, message: &[u8]) -> Result<()> {
            self.messages.lock().unwrap().push(message.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_message_builders() {
        assert_eq!(messages::note_on(0, 60, 100), [0x90, 60, 100]);
        assert_eq!(messages::note_on(3, 60, 128), [0x93, 60, 127]);
        assert_eq!(messages::note_off(0, 69), [0x80, 69, 0]);
        assert_eq!(messages::program_change(0, 5), [0xC0, 5]);
    }

    #[test]
    fn test_port_synth_sends_notes() {
        let output = MockMidiOutput::new();
        let mut synth = MidiPortSynth::new(Box::new(output.clone()), 0);

        synth.note_on(60, 128).unwrap();
        synth.note_off(60).unwrap();

        let messages = output.get_messages();
        assert_eq!(messages, vec![vec![0x90, 60, 127], vec![0x80, 60, 0]]);
    }

    #[test]
    fn test_port_synth_silence_all() {
        let output = MockMidiOutput::new();
        let mut synth = MidiPortSynth::new(Box::new(output.clone()), 0);

        synth.silence_all().unwrap();

        let messages = output.get_messages();
        assert_eq!(messages.len(), 128);
        assert!(messages.iter().all(|m| m[0] == messages::NOTE_OFF));
        assert_eq!(messages[127], vec![0x80, 127, 0]);
    }

    #[test]
    fn test_port_synth_errors_map_to_audio_error() {
        struct Closed;
        impl MidiOutput for Closed {
            fn send(&mut self, _: &[u8]) -> Result<()> {
                Err(anyhow::anyhow!("port closed"))
            }
        }

        let mut synth = MidiPortSynth::new(Box::new(Closed), 0);
        assert_eq!(
            synth.note_on(60, 100),
            Err(AudioError::MidiEvent("port closed".to_string()))
        );
    }
}
