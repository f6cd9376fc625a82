// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale catalog.
//!
//! Each scale is a fixed set of semitone offsets from a tonic. Membership
//! is decided by offset alone, so enharmonic spelling never matters.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::pitch::{AbsoluteNote, Note, SEMITONES_PER_OCTAVE};

/// Built-in scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Chromatic,
    Major, // Ionian
    NaturalMinor, // Aeolian
    HarmonicMinor,
    MelodicMinorBidirectional,
    MelodicMinorAscending,
    MelodicMinorDescending,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    WholeTone,
    MajorPentatonic,
    MinorPentatonic,
}

impl Scale {
    /// All scales in catalog order
    pub const ALL: [Scale; 15] = [
        Scale::Chromatic,
        Scale::Major,
        Scale::NaturalMinor,
        Scale::HarmonicMinor,
        Scale::MelodicMinorBidirectional,
        Scale::MelodicMinorAscending,
        Scale::MelodicMinorDescending,
        Scale::Dorian,
        Scale::Phrygian,
        Scale::Lydian,
        Scale::Mixolydian,
        Scale::Locrian,
        Scale::WholeTone,
        Scale::MajorPentatonic,
        Scale::MinorPentatonic,
    ];

    /// Semitone offsets from the tonic, ascending, always starting at 0
    pub fn semitone_offsets(self) -> &'static [u8] {
        match self {
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            // Union of the ascending and descending forms
            Scale::MelodicMinorBidirectional => &[0, 2, 3, 5, 7, 8, 9, 10, 11],
            Scale::MelodicMinorAscending => &[0, 2, 3, 5, 7, 9, 11],
            Scale::MelodicMinorDescending => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Scale::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Scale::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Scale::WholeTone => &[0, 2, 4, 6, 8, 10],
            Scale::MajorPentatonic => &[0, 2, 4, 7, 9],
            Scale::MinorPentatonic => &[0, 3, 5, 7, 10],
        }
    }

    /// Whether a chromatic offset from the tonic (taken modulo 12) is in the scale
    pub fn contains_offset(self, offset: usize) -> bool {
        let offset = (offset % SEMITONES_PER_OCTAVE) as u8;
        self.semitone_offsets().contains(&offset)
    }

    /// Whether a pitch class belongs to this scale built on `tonic`
    pub fn contains(self, tonic: Note, note: Note) -> bool {
        let offset = (note.index() + SEMITONES_PER_OCTAVE - tonic.index()) % SEMITONES_PER_OCTAVE;
        self.contains_offset(offset)
    }

    /// Number of notes per octave
    pub fn len(self) -> usize {
        self.semitone_offsets().len()
    }

    /// Always false; every scale contains its tonic
    pub fn is_empty(self) -> bool {
        false
    }

    /// The in-scale pitch classes, starting at the tonic
    pub fn notes(self, tonic: Note) -> Vec<Note> {
        let chromatic = Note::chromatic_scale(tonic);
        self.semitone_offsets()
            .iter()
            .map(|&i| chromatic[i as usize])
            .collect()
    }

    /// The in-scale notes for `octave_count` octaves starting at `tonic`.
    ///
    /// Notes that would run past octave 8 are kept as `None` placeholders
    /// so callers can preserve slot counts.
    pub fn absolute_notes(self, tonic: AbsoluteNote, octave_count: usize) -> Vec<Option<AbsoluteNote>> {
        let mut notes = Vec::with_capacity(self.len() * octave_count);
        let mut note = Some(tonic);
        for _ in 0..octave_count {
            for i in 0..SEMITONES_PER_OCTAVE {
                if self.contains_offset(i) {
                    notes.push(note);
                }
                note = note.and_then(AbsoluteNote::successor);
            }
        }
        notes
    }

    /// Like [`Scale::absolute_notes`] but with absent notes dropped
    pub fn compact_absolute_notes(self, tonic: AbsoluteNote, octave_count: usize) -> Vec<AbsoluteNote> {
        self.absolute_notes(tonic, octave_count)
            .into_iter()
            .flatten()
            .collect()
    }

    /// One entry per chromatic semitone from `tonic`: the note where the
    /// offset is in the scale, `None` elsewhere (and past octave 8).
    pub fn sparse_absolute_notes(self, tonic: AbsoluteNote) -> [Option<AbsoluteNote>; 12] {
        let mut notes = AbsoluteNote::chromatic_scale(tonic);
        for (i, slot) in notes.iter_mut().enumerate() {
            if !self.contains_offset(i) {
                *slot = None;
            }
        }
        notes
    }

    /// Parse a scale from its display name or snake_case name
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace([' ', '-', '_', '/', '(', ')'], "");
        if let Some(scale) = Scale::ALL.iter().find(|s| {
            s.display_name()
                .to_lowercase()
                .replace([' ', '-', '_', '/', '(', ')'], "")
                == normalized
        }) {
            return Some(*scale);
        }

        match normalized.as_str() {
            "chromatic" => Some(Scale::Chromatic),
            "major" | "ionian" => Some(Scale::Major),
            "minor" | "naturalminor" | "aeolian" => Some(Scale::NaturalMinor),
            "harmonicminor" => Some(Scale::HarmonicMinor),
            "melodicminor" | "melodicminorbidirectional" => Some(Scale::MelodicMinorBidirectional),
            "melodicminorascending" => Some(Scale::MelodicMinorAscending),
            "melodicminordescending" => Some(Scale::MelodicMinorDescending),
            "dorian" => Some(Scale::Dorian),
            "phrygian" => Some(Scale::Phrygian),
            "lydian" => Some(Scale::Lydian),
            "mixolydian" => Some(Scale::Mixolydian),
            "locrian" => Some(Scale::Locrian),
            "wholetone" => Some(Scale::WholeTone),
            "majorpentatonic" | "pentatonicmajor" => Some(Scale::MajorPentatonic),
            "minorpentatonic" | "pentatonicminor" | "pentatonic" => Some(Scale::MinorPentatonic),
            _ => None,
        }
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            Scale::Chromatic => "Chromatic",
            Scale::Major => "Major / Ionian",
            Scale::NaturalMinor => "Natural Minor / Aeolian",
            Scale::HarmonicMinor => "Harmonic Minor",
            Scale::MelodicMinorBidirectional => "Melodic Minor (bidirectional)",
            Scale::MelodicMinorAscending => "Melodic Minor (ascending)",
            Scale::MelodicMinorDescending => "Melodic Minor (descending)",
            Scale::Dorian => "Dorian",
            Scale::Phrygian => "Phrygian",
            Scale::Lydian => "Lydian",
            Scale::Mixolydian => "Mixolydian",
            Scale::Locrian => "Locrian",
            Scale::WholeTone => "Whole Tone",
            Scale::MajorPentatonic => "Major Pentatonic",
            Scale::MinorPentatonic => "Minor Pentatonic",
        }
    }

    fn position(self) -> usize {
        Scale::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// The next scale in the catalog, wrapping
    pub fn next(self) -> Self {
        Scale::ALL[(self.position() + 1) % Scale::ALL.len()]
    }

    /// The previous scale in the catalog, wrapping
    pub fn previous(self) -> Self {
        Scale::ALL[(self.position() + Scale::ALL.len() - 1) % Scale::ALL.len()]
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::pitch::Octave;

    fn abs(note: Note, octave: u8) -> AbsoluteNote {
        AbsoluteNote::new(note, Octave::new(octave).unwrap())
    }

    #[test]
    fn test_offsets_well_formed() {
        for scale in Scale::ALL {
            let offsets = scale.semitone_offsets();
            assert_eq!(offsets[0], 0, "{} must contain the tonic", scale);
            assert!(offsets.iter().all(|&o| o < 12), "{}", scale);
            assert!(
                offsets.windows(2).all(|w| w[0] < w[1]),
                "{} offsets must be strictly increasing",
                scale
            );
        }
    }

    #[test]
    fn test_scale_sizes() {
        assert_eq!(Scale::Chromatic.len(), 12);
        assert_eq!(Scale::Major.len(), 7);
        assert_eq!(Scale::MelodicMinorBidirectional.len(), 9);
        assert_eq!(Scale::WholeTone.len(), 6);
        assert_eq!(Scale::MinorPentatonic.len(), 5);
    }

    #[test]
    fn test_scale_notes() {
        assert_eq!(
            Scale::Major.notes(Note::C),
            vec![Note::C, Note::D, Note::E, Note::F, Note::G, Note::A, Note::B]
        );
        assert_eq!(
            Scale::NaturalMinor.notes(Note::A),
            vec![Note::A, Note::B, Note::C, Note::D, Note::E, Note::F, Note::G]
        );
    }

    #[test]
    fn test_membership_by_offset() {
        assert!(Scale::Major.contains(Note::C, Note::G));
        assert!(!Scale::Major.contains(Note::C, Note::FsGb));
        // F major contains B♭, spelled here as the shared A♯/B♭ class
        assert!(Scale::Major.contains(Note::F, Note::AsBb));
        assert!(Scale::Major.contains_offset(12));
    }

    #[test]
    fn test_sparse_c_major() {
        let sparse = Scale::Major.sparse_absolute_notes(abs(Note::C, 4));
        assert_eq!(sparse.len(), 12);

        let present: Vec<usize> = sparse
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.map(|_| i))
            .collect();
        assert_eq!(present, vec![0, 2, 4, 5, 7, 9, 11]);

        let notes: Vec<AbsoluteNote> = sparse.iter().flatten().copied().collect();
        assert_eq!(
            notes,
            vec![
                abs(Note::C, 4),
                abs(Note::D, 4),
                abs(Note::E, 4),
                abs(Note::F, 4),
                abs(Note::G, 4),
                abs(Note::A, 5),
                abs(Note::B, 5),
            ]
        );
    }

    #[test]
    fn test_sparse_always_twelve_entries() {
        for scale in Scale::ALL {
            for tonic in Note::ALL {
                let sparse = scale.sparse_absolute_notes(abs(tonic, 3));
                for (i, entry) in sparse.iter().enumerate() {
                    assert_eq!(entry.is_some(), scale.contains_offset(i));
                }
            }
        }
    }

    #[test]
    fn test_absolute_notes_multiple_octaves() {
        let notes = Scale::MajorPentatonic.compact_absolute_notes(abs(Note::C, 3), 2);
        assert_eq!(notes.len(), 10);
        assert_eq!(notes[0], abs(Note::C, 3));
        assert_eq!(notes[5], abs(Note::C, 4));
        assert!(notes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_absolute_notes_truncate_at_top() {
        // D8 major: D E F♯ G are in range, A9 and beyond are not
        let notes = Scale::Major.absolute_notes(abs(Note::D, 8), 1);
        assert_eq!(notes.len(), 7);
        assert_eq!(notes.iter().filter(|n| n.is_some()).count(), 4);
        assert!(notes[4..].iter().all(|n| n.is_none()));

        let compact = Scale::Major.compact_absolute_notes(abs(Note::D, 8), 1);
        assert_eq!(compact.len(), 4);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Scale::from_name("major"), Some(Scale::Major));
        assert_eq!(Scale::from_name("Major / Ionian"), Some(Scale::Major));
        assert_eq!(Scale::from_name("Melodic Minor (ascending)"), Some(Scale::MelodicMinorAscending));
        assert_eq!(Scale::from_name("whole_tone"), Some(Scale::WholeTone));
        assert_eq!(Scale::from_name("Aeolian"), Some(Scale::NaturalMinor));
        assert_eq!(Scale::from_name("bebop"), None);
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Scale::Chromatic.next(), Scale::Major);
        assert_eq!(Scale::MinorPentatonic.next(), Scale::Chromatic);
        assert_eq!(Scale::Chromatic.previous(), Scale::MinorPentatonic);
        for scale in Scale::ALL {
            assert_eq!(scale.next().previous(), scale);
        }
    }
}
