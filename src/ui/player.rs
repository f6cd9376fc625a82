// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard state behind the terminal UI.
//!
//! Owns the configuration, the computed keyboard, the playback session and
//! the synth. Control actions come in; note-on / note-off calls go out.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::info;

use crate::audio::AudioError;
use crate::config::Configuration;
use crate::control::ControlAction;
use crate::keyboard::{Interface, Keyboard};
use crate::music::AbsoluteNote;
use crate::playback::{PlaybackSession, Synthesizer};

/// Computer-keyboard row that plays the ring (the number row)
const RING_KEY_ROW: usize = 3;

/// A key position on the on-screen keyboard: (row, slot)
pub type KeyPosition = (usize, usize);

/// A key held down and the notes it started
#[derive(Debug, Clone)]
struct HeldKey {
    notes: Vec<AbsoluteNote>,
    since: Instant,
}

pub struct Player {
    config: Configuration,
    keyboard: Keyboard,
    session: PlaybackSession,
    synth: Box<dyn Synthesizer>,
    held: HashMap<KeyPosition, HeldKey>,
    /// Keys latched in sticky mode and the notes each one latched
    latched_keys: HashMap<KeyPosition, Vec<AbsoluteNote>>,
}

impl Player {
    /// Compute the keyboard for `config` and play through `synth`
    pub fn new(config: Configuration, synth: Box<dyn Synthesizer>) -> Self {
        Self {
            keyboard: Keyboard::compute(&config),
            session: PlaybackSession::new(config.sticky),
            config,
            synth,
            held: HashMap::new(),
            latched_keys: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Whether the key at `position` is held down
    pub fn is_held(&self, position: KeyPosition) -> bool {
        self.held.contains_key(&position)
    }

    /// Whether the key at `position` is latched in sticky mode
    pub fn is_latched(&self, position: KeyPosition) -> bool {
        self.latched_keys.contains_key(&position)
    }

    /// Whether any held key other than `position` is sounding `note`
    fn held_elsewhere(&self, position: KeyPosition, note: AbsoluteNote) -> bool {
        self.held
            .iter()
            .any(|(&other, key)| other != position && key.notes.contains(&note))
    }

    /// Whether any latched key other than `position` latched `note`
    fn latched_elsewhere(&self, position: KeyPosition, note: AbsoluteNote) -> bool {
        self.latched_keys
            .iter()
            .any(|(&other, notes)| other != position && notes.contains(&note))
    }

    /// Where a computer-keyboard key lands on the current keyboard.
    ///
    /// Grid rows count from the bottom; the ring takes the number row only.
    pub fn key_position(&self, row: usize, column: usize) -> Option<KeyPosition> {
        let position = match self.keyboard.interface() {
            Interface::GridNotes | Interface::GridChords => {
                let count = self.keyboard.row_count();
                (count.checked_sub(row + 1)?, column)
            }
            Interface::RingNotes if row == RING_KEY_ROW => (0, column),
            Interface::RingNotes => return None,
        };

        let slots = &self.keyboard.rows().get(position.0)?.slots;
        (position.1 < slots.len()).then_some(position)
    }

    /// Apply a control action. UI-only actions are ignored.
    pub fn apply(&mut self, action: ControlAction) -> Result<(), AudioError> {
        let mut next = self.config.clone();
        match action {
            ControlAction::PlayKey { row, column } => {
                if let Some(position) = self.key_position(row, column) {
                    self.press(position)?;
                }
                return Ok(());
            }
            ControlAction::ClearLatched => {
                self.session.clear_latched(self.synth.as_mut())?;
                self.latched_keys.clear();
                return Ok(());
            }
            ControlAction::TonicDown => next.tonic = next.tonic.predecessor(),
            ControlAction::TonicUp => next.tonic = next.tonic.successor(),
            ControlAction::ScalePrev => next.scale = next.scale.previous(),
            ControlAction::ScaleNext => next.scale = next.scale.next(),
            ControlAction::ToggleKeysPerOctave => next.keys_per_octave = next.keys_per_octave.toggled(),
            ControlAction::ToggleNonScaleStyle => next.non_scale_style = next.non_scale_style.toggled(),
            ControlAction::ToggleSticky => next.sticky = !next.sticky,
            ControlAction::NextInstrument => next.instrument = next.instrument.next(),
            ControlAction::NextInterface => next.interface = next.interface.next(),
            ControlAction::None | ControlAction::ToggleHelp | ControlAction::Quit => return Ok(()),
        }
        self.commit(next)
    }

    /// Replace the configuration.
    ///
    /// Latched notes are released one by one, then all 128 pitches are
    /// silenced before the keyboard is recomputed.
    pub fn commit(&mut self, config: Configuration) -> Result<(), AudioError> {
        let synth = self.synth.as_mut();
        if config.sticky != self.session.is_sticky() {
            self.session.set_sticky(config.sticky, synth)?;
        } else {
            self.session.reset(synth)?;
        }
        self.held.clear();
        self.latched_keys.clear();

        if config.instrument != self.config.instrument {
            synth.set_instrument(config.instrument)?;
        }

        self.keyboard = Keyboard::compute(&config);
        self.config = config;
        info!(
            title = %self.config.title(),
            interface = %self.config.interface,
            keys_per_octave = self.config.keys_per_octave.display_name(),
            sticky = self.config.sticky,
            instrument = %self.config.instrument,
            "configuration committed"
        );
        Ok(())
    }

    /// Press the key at `position`. Inert keys do nothing.
    ///
    /// Keys that share notes (overlapping chords) share them on the synth:
    /// a note starts with the first key that needs it and stops with the last.
    ///
    /// # Panics
    /// If the position does not exist on the keyboard.
    pub fn press(&mut self, position: KeyPosition) -> Result<(), AudioError> {
        let notes = self.keyboard.notes_for_press(position.0, position.1);
        if notes.is_empty() {
            return Ok(());
        }

        if self.session.is_sticky() {
            return self.toggle_latch(position, notes);
        }

        // Terminals without release events repeat presses while a key is down
        if let Some(held) = self.held.get_mut(&position) {
            held.since = Instant::now();
            return Ok(());
        }

        for &note in &notes {
            if !self.held_elsewhere(position, note) {
                self.session.press(note, self.synth.as_mut())?;
            }
        }
        self.held.insert(
            position,
            HeldKey {
                notes,
                since: Instant::now(),
            },
        );
        Ok(())
    }

    fn toggle_latch(&mut self, position: KeyPosition, notes: Vec<AbsoluteNote>) -> Result<(), AudioError> {
        if let Some(latched) = self.latched_keys.remove(&position) {
            for note in latched {
                if !self.latched_elsewhere(position, note) {
                    self.session.toggle(note, self.synth.as_mut())?;
                }
            }
            return Ok(());
        }

        for &note in &notes {
            if !self.session.latched().contains(&note) {
                self.session.toggle(note, self.synth.as_mut())?;
            }
        }
        self.latched_keys.insert(position, notes);
        Ok(())
    }

    /// Release the key at `position`, if held
    pub fn release(&mut self, position: KeyPosition) -> Result<(), AudioError> {
        if let Some(held) = self.held.remove(&position) {
            for note in held.notes {
                if !self.held_elsewhere(position, note) {
                    self.session.release(note, self.synth.as_mut())?;
                }
            }
        }
        Ok(())
    }

    /// Release a computer-keyboard key
    pub fn release_key(&mut self, row: usize, column: usize) -> Result<(), AudioError> {
        match self.key_position(row, column) {
            Some(position) => self.release(position),
            None => Ok(()),
        }
    }

    /// Release keys held longer than `hold` as of `now`
    pub fn release_expired(&mut self, now: Instant, hold: Duration) -> Result<(), AudioError> {
        let expired: Vec<KeyPosition> = self
            .held
            .iter()
            .filter(|(_, key)| now.saturating_duration_since(key.since) >= hold)
            .map(|(&position, _)| position)
            .collect();
        for position in expired {
            self.release(position)?;
        }
        Ok(())
    }

    /// Silence the synth before shutting down
    pub fn shutdown(&mut self) -> Result<(), AudioError> {
        self.held.clear();
        self.latched_keys.clear();
        self.session.reset(self.synth.as_mut())
    }
}
