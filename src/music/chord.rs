// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic triads built on scale degrees.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::pitch::AbsoluteNote;
use super::scale::Scale;

/// Triad rooted on a scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chord {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl Chord {
    /// All chords, I through VII
    pub const ALL: [Chord; 7] = [
        Chord::I,
        Chord::II,
        Chord::III,
        Chord::IV,
        Chord::V,
        Chord::VI,
        Chord::VII,
    ];

    /// Chord rooted on a zero-based scale degree, if there is one
    pub fn for_degree(degree: usize) -> Option<Self> {
        Chord::ALL.get(degree).copied()
    }

    /// Zero-based scale degree of the chord root
    pub fn root_degree(self) -> usize {
        match self {
            Chord::I => 0,
            Chord::II => 1,
            Chord::III => 2,
            Chord::IV => 3,
            Chord::V => 4,
            Chord::VI => 5,
            Chord::VII => 6,
        }
    }

    /// Zero-based indices into the scale's note sequence: root, third, fifth
    pub fn diatonic_indices(self) -> [usize; 3] {
        let root = self.root_degree();
        [root, root + 2, root + 4]
    }

    /// The notes of this chord in `scale` built on `tonic`.
    ///
    /// Resolved against two octaves of the scale; notes that would fall
    /// past octave 8 are left out.
    pub fn absolute_notes(self, tonic: AbsoluteNote, scale: Scale) -> Vec<AbsoluteNote> {
        let scale_notes = scale.compact_absolute_notes(tonic, 2);
        self.diatonic_indices()
            .iter()
            .filter_map(|&i| scale_notes.get(i).copied())
            .collect()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = match self {
            Chord::I => "I",
            Chord::II => "II",
            Chord::III => "III",
            Chord::IV => "IV",
            Chord::V => "V",
            Chord::VI => "VI",
            Chord::VII => "VII",
        };
        write!(f, "{}", numeral)
    }
}
