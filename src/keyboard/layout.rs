// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard layout engine.
//!
//! Turns a configuration into rows of key slots. Layouts are always
//! recomputed from scratch; nothing is carried over from a previous
//! layout, so a slot can never pair a stale pitch with a stale style.

use crate::config::Configuration;
use crate::music::{AbsoluteNote, Chord, Note, Octave, Scale};

use super::{Interface, KeySlot, KeyStyle, KeysPerOctave, NonDiatonicKeyStyle};

/// Octave the ring interface is built on
pub const RING_OCTAVE: Octave = match Octave::new(4) {
    Some(octave) => octave,
    None => Octave::MAX,
};

/// Shape of a diatonic row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiatonicForm {
    /// Only the in-scale keys, side by side
    Compact,
    /// 12 positions with gaps where out-of-scale keys would be
    Sparse,
}

/// One row of keys for a tonic and octave.
///
/// Chromatic rows always have 12 slots; out-of-scale keys take the style
/// `non_scale_style` maps to. Diatonic rows hold only the in-scale keys.
/// Keys past the top of octave 8 become [`KeySlot::Empty`].
pub fn compute_row(
    tonic: Note,
    octave: Octave,
    scale: Scale,
    keys_per_octave: KeysPerOctave,
    non_scale_style: NonDiatonicKeyStyle,
) -> Vec<KeySlot> {
    build_row(tonic, octave, scale, keys_per_octave, non_scale_style, DiatonicForm::Compact)
}

/// Like [`compute_row`], but diatonic rows keep all 12 positions with
/// empty slots in the gaps so each key stays at a fixed position.
pub fn compute_sparse_row(
    tonic: Note,
    octave: Octave,
    scale: Scale,
    keys_per_octave: KeysPerOctave,
    non_scale_style: NonDiatonicKeyStyle,
) -> Vec<KeySlot> {
    build_row(tonic, octave, scale, keys_per_octave, non_scale_style, DiatonicForm::Sparse)
}

fn build_row(
    tonic: Note,
    octave: Octave,
    scale: Scale,
    keys_per_octave: KeysPerOctave,
    non_scale_style: NonDiatonicKeyStyle,
    form: DiatonicForm,
) -> Vec<KeySlot> {
    let row_tonic = AbsoluteNote::new(tonic, octave);

    match keys_per_octave {
        KeysPerOctave::Chromatic => AbsoluteNote::chromatic_scale(row_tonic)
            .iter()
            .enumerate()
            .map(|(i, note)| match note {
                None => KeySlot::Empty,
                Some(note) if scale.contains_offset(i) => KeySlot::key(*note, KeyStyle::Normal),
                Some(note) => KeySlot::key(*note, non_scale_style.key_style()),
            })
            .collect(),

        KeysPerOctave::Diatonic => {
            let notes: Vec<Option<AbsoluteNote>> = match form {
                DiatonicForm::Compact => scale.absolute_notes(row_tonic, 1),
                DiatonicForm::Sparse => scale.sparse_absolute_notes(row_tonic).to_vec(),
            };
            notes
                .into_iter()
                .map(|note| match note {
                    Some(note) => KeySlot::key(note, KeyStyle::Normal),
                    None => KeySlot::Empty,
                })
                .collect()
        }
    }
}

/// A row of keys together with the octave it was built on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRow {
    pub octave: Octave,
    pub slots: Vec<KeySlot>,
}

/// A fully computed keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    interface: Interface,
    tonic: Note,
    scale: Scale,
    keys_per_octave: KeysPerOctave,
    /// Topmost row first
    rows: Vec<KeyRow>,
}

impl Keyboard {
    /// Compute the keyboard for a configuration
    pub fn compute(config: &Configuration) -> Self {
        let row = |octave: Octave, sparse: bool| {
            let slots = if sparse {
                compute_sparse_row(
                    config.tonic,
                    octave,
                    config.scale,
                    config.keys_per_octave,
                    config.non_scale_style,
                )
            } else {
                compute_row(
                    config.tonic,
                    octave,
                    config.scale,
                    config.keys_per_octave,
                    config.non_scale_style,
                )
            };
            KeyRow { octave, slots }
        };

        let rows = match config.interface {
            // Highest octave on top
            Interface::GridNotes | Interface::GridChords => config
                .octaves
                .iter()
                .rev()
                .map(|&octave| row(octave, false))
                .collect(),
            Interface::RingNotes => vec![row(RING_OCTAVE, true)],
        };

        Self {
            interface: config.interface,
            tonic: config.tonic,
            scale: config.scale,
            keys_per_octave: config.keys_per_octave,
            rows,
        }
    }

    pub fn interface(&self) -> Interface {
        self.interface
    }

    /// All rows, topmost first
    pub fn rows(&self) -> &[KeyRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The slot at `row`, `index`.
    ///
    /// # Panics
    /// If the position does not exist on this keyboard.
    pub fn slot(&self, row: usize, index: usize) -> KeySlot {
        self.rows[row].slots[index]
    }

    /// Every note currently shown on the keyboard
    pub fn notes(&self) -> impl Iterator<Item = AbsoluteNote> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.slots.iter().filter_map(KeySlot::note))
    }

    /// The chord a slot plays on the chord grid, if it is an in-scale key
    pub fn chord_at(&self, row: usize, index: usize) -> Option<Chord> {
        if self.interface != Interface::GridChords {
            return None;
        }
        self.slot(row, index).playable_note()?;

        let degree = match self.keys_per_octave {
            KeysPerOctave::Diatonic => Some(index),
            KeysPerOctave::Chromatic => self
                .scale
                .semitone_offsets()
                .iter()
                .position(|&offset| offset as usize == index),
        }?;
        Chord::for_degree(degree)
    }

    /// The notes pressing a slot should sound. Empty for inert slots.
    ///
    /// # Panics
    /// If the position does not exist on this keyboard.
    pub fn notes_for_press(&self, row: usize, index: usize) -> Vec<AbsoluteNote> {
        let slot = self.slot(row, index);
        let Some(note) = slot.playable_note() else {
            return Vec::new();
        };

        match self.chord_at(row, index) {
            Some(chord) => {
                let row_tonic = AbsoluteNote::new(self.tonic, self.rows[row].octave);
                chord.absolute_notes(row_tonic, self.scale)
            }
            None => vec![note],
        }
    }
}
