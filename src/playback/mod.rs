// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback session.
//!
//! Translates key presses and releases into note-on / note-off calls on a
//! [`Synthesizer`], and keeps track of which notes are sounding and which
//! are latched in sticky mode.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::audio::{AudioError, Instrument};
use crate::music::{AbsoluteNote, MidiNote};

/// Velocity used for every key press
pub const DEFAULT_VELOCITY: u8 = 128;

/// Highest MIDI note number
pub const MAX_MIDI_NOTE: MidiNote = 127;

/// Something that can sound MIDI notes.
///
/// Implementations decide how to reach the wire; velocities above 127 are
/// theirs to clamp.
pub trait Synthesizer {
    /// Start sounding a note
    fn note_on(&mut self, pitch: MidiNote, velocity: u8) -> Result<(), AudioError>;

    /// Stop sounding a note
    fn note_off(&mut self, pitch: MidiNote) -> Result<(), AudioError>;

    /// Send a note-off for every MIDI note number
    fn silence_all(&mut self) -> Result<(), AudioError> {
        for pitch in 0..=MAX_MIDI_NOTE {
            self.note_off(pitch)?;
        }
        Ok(())
    }

    /// Switch to another instrument. Synths without a catalog ignore this.
    fn set_instrument(&mut self, _instrument: Instrument) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Tracks sounding and latched notes for one keyboard
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    sticky: bool,
    /// Notes held down in non-sticky mode
    sounding: HashSet<AbsoluteNote>,
    /// Notes latched on in sticky mode
    latched: BTreeSet<AbsoluteNote>,
}

impl PlaybackSession {
    /// Create a session
    pub fn new(sticky: bool) -> Self {
        Self {
            sticky,
            sounding: HashSet::new(),
            latched: BTreeSet::new(),
        }
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    /// Notes currently latched, lowest first
    pub fn latched(&self) -> &BTreeSet<AbsoluteNote> {
        &self.latched
    }

    pub fn has_latched(&self) -> bool {
        !self.latched.is_empty()
    }

    /// Whether a note is held or latched
    pub fn is_active(&self, note: AbsoluteNote) -> bool {
        self.sounding.contains(&note) || self.latched.contains(&note)
    }

    /// A key went down. In sticky mode this toggles the latch instead.
    pub fn press(&mut self, note: AbsoluteNote, synth: &mut dyn Synthesizer) -> Result<(), AudioError> {
        if self.sticky {
            return self.toggle(note, synth);
        }

        debug!(note = %note, pitch = note.midi_pitch(), "note on");
        synth.note_on(note.midi_pitch(), DEFAULT_VELOCITY)?;
        self.sounding.insert(note);
        Ok(())
    }

    /// A key came up. Latched keys ignore releases.
    pub fn release(&mut self, note: AbsoluteNote, synth: &mut dyn Synthesizer) -> Result<(), AudioError> {
        if self.sticky {
            return Ok(());
        }

        debug!(note = %note, pitch = note.midi_pitch(), "note off");
        synth.note_off(note.midi_pitch())?;
        self.sounding.remove(&note);
        Ok(())
    }

    /// Latch a note on, or release it if already latched
    pub fn toggle(&mut self, note: AbsoluteNote, synth: &mut dyn Synthesizer) -> Result<(), AudioError> {
        if self.latched.remove(&note) {
            debug!(note = %note, "unlatch");
            synth.note_off(note.midi_pitch())
        } else {
            debug!(note = %note, "latch");
            synth.note_on(note.midi_pitch(), DEFAULT_VELOCITY)?;
            self.latched.insert(note);
            Ok(())
        }
    }

    /// Release every latched note. Returns the notes that were released.
    pub fn clear_latched(&mut self, synth: &mut dyn Synthesizer) -> Result<Vec<AbsoluteNote>, AudioError> {
        let mut released = Vec::with_capacity(self.latched.len());
        while let Some(note) = self.latched.first().copied() {
            // Stays latched if the note-off fails
            synth.note_off(note.midi_pitch())?;
            self.latched.remove(&note);
            released.push(note);
        }
        if !released.is_empty() {
            debug!(count = released.len(), "cleared latched notes");
        }
        Ok(released)
    }

    /// Note-off on all 128 pitches and forget everything held
    pub fn silence_all(&mut self, synth: &mut dyn Synthesizer) -> Result<(), AudioError> {
        synth.silence_all()?;
        self.sounding.clear();
        self.latched.clear();
        Ok(())
    }

    /// Release latched notes, then silence everything. Call before the
    /// keyboard layout or the synth changes.
    pub fn reset(&mut self, synth: &mut dyn Synthesizer) -> Result<(), AudioError> {
        self.clear_latched(synth)?;
        self.silence_all(synth)
    }

    /// Switch sticky mode. Anything latched or held is released first.
    pub fn set_sticky(&mut self, sticky: bool, synth: &mut dyn Synthesizer) -> Result<(), AudioError> {
        if sticky != self.sticky {
            self.reset(synth)?;
            self.sticky = sticky;
        }
        Ok(())
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(false)
    }
}
