// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch model: pitch classes, octaves and absolute notes.
//!
//! Octave numbering follows the keyboard layout rather than scientific
//! pitch notation: the octave number advances on the step from G♯/A♭ to
//! A, and the pitch-class order starts at A. MIDI numbering is still
//! standard (C4 = 60).

use std::fmt;

use serde::{Deserialize, Serialize};

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Number of pitch classes in an octave
pub const SEMITONES_PER_OCTAVE: usize = 12;

/// A 12-TET pitch class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    A,
    AsBb, // A♯ / B♭
    B,
    C,
    CsDb, // C♯ / D♭
    D,
    DsEb, // D♯ / E♭
    E,
    F,
    FsGb, // F♯ / G♭
    G,
    GsAb, // G♯ / A♭
}

impl Note {
    /// All notes in chromatic order, starting at A
    pub const ALL: [Note; 12] = [
        Note::A,
        Note::AsBb,
        Note::B,
        Note::C,
        Note::CsDb,
        Note::D,
        Note::DsEb,
        Note::E,
        Note::F,
        Note::FsGb,
        Note::G,
        Note::GsAb,
    ];

    /// Position of this note in [`Note::ALL`] (A = 0, C = 3)
    pub fn index(self) -> usize {
        match self {
            Note::A => 0,
            Note::AsBb => 1,
            Note::B => 2,
            Note::C => 3,
            Note::CsDb => 4,
            Note::D => 5,
            Note::DsEb => 6,
            Note::E => 7,
            Note::F => 8,
            Note::FsGb => 9,
            Note::G => 10,
            Note::GsAb => 11,
        }
    }

    /// Note at a position in [`Note::ALL`].
    ///
    /// # Panics
    /// If `index` is 12 or more.
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < SEMITONES_PER_OCTAVE,
            "note index {} out of range",
            index
        );
        Note::ALL[index]
    }

    /// The next note up, wrapping from G♯/A♭ to A
    pub fn successor(self) -> Self {
        Note::ALL[(self.index() + 1) % SEMITONES_PER_OCTAVE]
    }

    /// The note a semitone below, wrapping from A to G♯/A♭
    pub fn predecessor(self) -> Self {
        Note::ALL[(self.index() + SEMITONES_PER_OCTAVE - 1) % SEMITONES_PER_OCTAVE]
    }

    /// False for sharps and flats
    pub fn is_natural(self) -> bool {
        matches!(
            self,
            Note::A | Note::B | Note::C | Note::D | Note::E | Note::F | Note::G
        )
    }

    /// Human-readable name, e.g. "C" or "A♯/B♭"
    pub fn display_name(self) -> &'static str {
        match self {
            Note::A => "A",
            Note::AsBb => "A♯/B♭",
            Note::B => "B",
            Note::C => "C",
            Note::CsDb => "C♯/D♭",
            Note::D => "D",
            Note::DsEb => "D♯/E♭",
            Note::E => "E",
            Note::F => "F",
            Note::FsGb => "F♯/G♭",
            Note::G => "G",
            Note::GsAb => "G♯/A♭",
        }
    }

    /// Parse a note name. Accepts ASCII (`C#`, `Db`) and unicode (`C♯`,
    /// `D♭`) spellings as well as the combined display names.
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(note) = Note::ALL.iter().find(|n| n.display_name() == name.trim()) {
            return Some(*note);
        }

        let s = name
            .trim()
            .replace('♯', "#")
            .replace('♭', "b")
            .to_uppercase();
        match s.as_str() {
            "A" => Some(Note::A),
            "A#" | "AS" | "BB" => Some(Note::AsBb),
            "B" | "CB" => Some(Note::B),
            "C" | "B#" | "BS" => Some(Note::C),
            "C#" | "CS" | "DB" => Some(Note::CsDb),
            "D" => Some(Note::D),
            "D#" | "DS" | "EB" => Some(Note::DsEb),
            "E" | "FB" => Some(Note::E),
            "F" | "E#" | "ES" => Some(Note::F),
            "F#" | "FS" | "GB" => Some(Note::FsGb),
            "G" => Some(Note::G),
            "G#" | "GS" | "AB" => Some(Note::GsAb),
            _ => None,
        }
    }

    /// All 12 pitch classes starting at `start`
    pub fn chromatic_scale(start: Note) -> [Note; 12] {
        let mut notes = [start; SEMITONES_PER_OCTAVE];
        for i in 1..SEMITONES_PER_OCTAVE {
            notes[i] = notes[i - 1].successor();
        }
        notes
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An octave number, 0 through 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Octave(u8);

impl Octave {
    /// Lowest octave
    pub const MIN: Octave = Octave(0);
    /// Highest octave
    pub const MAX: Octave = Octave(8);

    /// Octaves that fit on a phone-sized screen
    pub const PHONE: [Octave; 5] = [Octave(2), Octave(3), Octave(4), Octave(5), Octave(6)];

    /// Octaves that fit on a tablet-sized screen
    pub const TABLET: [Octave; 7] = [
        Octave(1),
        Octave(2),
        Octave(3),
        Octave(4),
        Octave(5),
        Octave(6),
        Octave(7),
    ];

    /// Create an octave, or `None` above 8
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(Octave(value))
        } else {
            None
        }
    }

    /// Numeric value (0-8)
    pub fn value(self) -> u8 {
        self.0
    }

    /// The octave above, or `None` for octave 8
    pub fn successor(self) -> Option<Self> {
        Octave::new(self.0 + 1)
    }
}

impl TryFrom<u8> for Octave {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Octave::new(value).ok_or_else(|| format!("octave {} out of range 0-8", value))
    }
}

impl From<Octave> for u8 {
    fn from(octave: Octave) -> Self {
        octave.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note and an octave, e.g. "C4"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsoluteNote {
    pub note: Note,
    pub octave: Octave,
}

impl AbsoluteNote {
    /// Create an absolute note
    pub fn new(note: Note, octave: Octave) -> Self {
        Self { note, octave }
    }

    /// The next chromatic note. `None` once it would run past octave 8.
    pub fn successor(self) -> Option<Self> {
        match self.note {
            Note::GsAb => self.octave.successor().map(|octave| AbsoluteNote {
                note: Note::A,
                octave,
            }),
            note => Some(AbsoluteNote {
                note: note.successor(),
                octave: self.octave,
            }),
        }
    }

    /// Twelve consecutive chromatic notes starting at `start`.
    ///
    /// Entries past the top of octave 8 are `None`; once one entry is
    /// absent every later entry is absent too.
    pub fn chromatic_scale(start: AbsoluteNote) -> [Option<AbsoluteNote>; 12] {
        let mut notes = [None; SEMITONES_PER_OCTAVE];
        let mut note = Some(start);
        for slot in notes.iter_mut() {
            *slot = note;
            note = note.and_then(AbsoluteNote::successor);
        }
        notes
    }

    /// The MIDI note number of this note (C4 = 60)
    pub fn midi_pitch(self) -> MidiNote {
        let pitch = (self.note.index() as i16 - 3) + (self.octave.value() as i16 + 1) * 12;
        pitch as MidiNote
    }

    /// Single-line name, e.g. "C4" or "A♯4/B♭4"
    pub fn display_name(self) -> String {
        let o = self.octave;
        match self.note {
            Note::AsBb => format!("A♯{o}/B♭{o}"),
            Note::CsDb => format!("C♯{o}/D♭{o}"),
            Note::DsEb => format!("D♯{o}/E♭{o}"),
            Note::FsGb => format!("F♯{o}/G♭{o}"),
            Note::GsAb => format!("G♯{o}/A♭{o}"),
            natural => format!("{}{o}", natural.display_name()),
        }
    }

    /// The name wrapped onto two lines for narrow key labels, e.g. "A4♯\nB4♭"
    pub fn button_text(self) -> String {
        let o = self.octave;
        match self.note {
            Note::AsBb => format!("A{o}♯\nB{o}♭"),
            Note::CsDb => format!("C{o}♯\nD{o}♭"),
            Note::DsEb => format!("D{o}♯\nE{o}♭"),
            Note::FsGb => format!("F{o}♯\nG{o}♭"),
            Note::GsAb => format!("G{o}♯\nA{o}♭"),
            natural => format!("{}{o}", natural.display_name()),
        }
    }
}

impl PartialOrd for AbsoluteNote {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AbsoluteNote {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.midi_pitch().cmp(&other.midi_pitch())
    }
}

impl fmt::Display for AbsoluteNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
