// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard model.
//!
//! This module provides:
//! - The layout options a configuration can select (keys per octave,
//!   non-diatonic treatment, interface shape)
//! - Key slots and their styles
//! - The layout engine that turns a configuration into rows of slots

pub mod layout;

pub use layout::{compute_row, compute_sparse_row, Keyboard, KeyRow, RING_OCTAVE};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::music::AbsoluteNote;

/// How many keys each octave row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeysPerOctave {
    /// All 12 keys
    Chromatic,
    /// Only in-scale keys
    Diatonic,
}

impl KeysPerOctave {
    pub fn display_name(self) -> &'static str {
        match self {
            KeysPerOctave::Chromatic => "Chromatic (all 12 keys)",
            KeysPerOctave::Diatonic => "Diatonic (only in-scale keys)",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            KeysPerOctave::Chromatic => KeysPerOctave::Diatonic,
            KeysPerOctave::Diatonic => KeysPerOctave::Chromatic,
        }
    }
}

/// Treatment of out-of-scale keys in chromatic rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonDiatonicKeyStyle {
    /// Shaded, but still playable
    Shaded,
    /// Shaded and not playable
    Disabled,
}

impl NonDiatonicKeyStyle {
    pub fn display_name(self) -> &'static str {
        match self {
            NonDiatonicKeyStyle::Shaded => "Shaded, but Enabled",
            NonDiatonicKeyStyle::Disabled => "Shaded and Disabled",
        }
    }

    /// The other treatment
    pub fn toggled(self) -> Self {
        match self {
            NonDiatonicKeyStyle::Shaded => NonDiatonicKeyStyle::Disabled,
            NonDiatonicKeyStyle::Disabled => NonDiatonicKeyStyle::Shaded,
        }
    }

    /// The key style an out-of-scale key receives
    pub fn key_style(self) -> KeyStyle {
        match self {
            NonDiatonicKeyStyle::Shaded => KeyStyle::Shaded,
            NonDiatonicKeyStyle::Disabled => KeyStyle::Disabled,
        }
    }
}

/// Visual and enablement style of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyStyle {
    Normal,
    /// Out of scale, playable
    Shaded,
    /// Out of scale, not playable
    Disabled,
}

impl KeyStyle {
    pub fn is_enabled(self) -> bool {
        !matches!(self, KeyStyle::Disabled)
    }
}

impl From<NonDiatonicKeyStyle> for KeyStyle {
    fn from(style: NonDiatonicKeyStyle) -> Self {
        style.key_style()
    }
}

/// One key position on a keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySlot {
    /// No note can be assigned here; always inert
    Empty,
    /// A key sounding `note`
    Key { note: AbsoluteNote, style: KeyStyle },
}

impl KeySlot {
    pub fn key(note: AbsoluteNote, style: KeyStyle) -> Self {
        KeySlot::Key { note, style }
    }

    /// The note on this key, if any
    pub fn note(&self) -> Option<AbsoluteNote> {
        match self {
            KeySlot::Empty => None,
            KeySlot::Key { note, .. } => Some(*note),
        }
    }

    /// The style of this key, if any
    pub fn style(&self) -> Option<KeyStyle> {
        match self {
            KeySlot::Empty => None,
            KeySlot::Key { style, .. } => Some(*style),
        }
    }

    /// The note on this key if it may be pressed
    pub fn playable_note(&self) -> Option<AbsoluteNote> {
        match self {
            KeySlot::Key { note, style } if style.is_enabled() => Some(*note),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, KeySlot::Empty)
    }
}

/// Which keyboard layout is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interface {
    /// One row per octave, each key sounds one note
    GridNotes,
    /// A single ring of 12 fixed positions
    RingNotes,
    /// One row per octave, each in-scale key sounds its diatonic triad
    GridChords,
}

impl Interface {
    pub const ALL: [Interface; 3] = [Interface::GridNotes, Interface::RingNotes, Interface::GridChords];

    pub fn display_name(self) -> &'static str {
        match self {
            Interface::GridNotes => "Grid (Notes)",
            Interface::RingNotes => "Ring (Notes)",
            Interface::GridChords => "Grid (Chords)",
        }
    }

    /// The next interface in [`Interface::ALL`], wrapping
    pub fn next(self) -> Self {
        let index = Interface::ALL.iter().position(|&i| i == self).unwrap_or(0);
        Interface::ALL[(index + 1) % Interface::ALL.len()]
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
