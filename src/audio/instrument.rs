// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Instrument catalog.
//!
//! Each instrument is a single-preset SF2 sound bank extracted from the
//! Fluid R3 General MIDI set, stored as `<soundfont_dir>/<name>.sf2`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A sound bank the synth can load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    #[default]
    RhodesEp,
    YamahaGrandPiano,
    BrightYamahaGrand,
    ElectricPiano,
    Harpsichord,
    Clavinet,
    Celesta,
    Glockenspiel,
    MusicBox,
    Vibraphone,
    Marimba,
    Xylophone,
    TubularBells,
    DrawbarOrgan,
    ChurchOrgan,
    Accordion,
    NylonStringGuitar,
    SteelStringGuitar,
    AcousticBass,
    Violin,
    Cello,
    Harp,
    StringEnsemble,
    ChoirAahs,
    Trumpet,
    FrenchHorns,
    AltoSax,
    Flute,
    PanFlute,
    SteelDrums,
}

impl Instrument {
    pub const ALL: [Instrument; 30] = [
        Instrument::RhodesEp,
        Instrument::YamahaGrandPiano,
        Instrument::BrightYamahaGrand,
        Instrument::ElectricPiano,
        Instrument::Harpsichord,
        Instrument::Clavinet,
        Instrument::Celesta,
        Instrument::Glockenspiel,
        Instrument::MusicBox,
        Instrument::Vibraphone,
        Instrument::Marimba,
        Instrument::Xylophone,
        Instrument::TubularBells,
        Instrument::DrawbarOrgan,
        Instrument::ChurchOrgan,
        Instrument::Accordion,
        Instrument::NylonStringGuitar,
        Instrument::SteelStringGuitar,
        Instrument::AcousticBass,
        Instrument::Violin,
        Instrument::Cello,
        Instrument::Harp,
        Instrument::StringEnsemble,
        Instrument::ChoirAahs,
        Instrument::Trumpet,
        Instrument::FrenchHorns,
        Instrument::AltoSax,
        Instrument::Flute,
        Instrument::PanFlute,
        Instrument::SteelDrums,
    ];

    /// Name shown in the UI; also the sound bank file stem
    pub fn display_name(self) -> &'static str {
        match self {
            Instrument::RhodesEp => "Rhodes EP",
            Instrument::YamahaGrandPiano => "Yamaha Grand Piano",
            Instrument::BrightYamahaGrand => "Bright Yamaha Grand",
            Instrument::ElectricPiano => "Electric Piano",
            Instrument::Harpsichord => "Harpsichord",
            Instrument::Clavinet => "Clavinet",
            Instrument::Celesta => "Celesta",
            Instrument::Glockenspiel => "Glockenspiel",
            Instrument::MusicBox => "Music Box",
            Instrument::Vibraphone => "Vibraphone",
            Instrument::Marimba => "Marimba",
            Instrument::Xylophone => "Xylophone",
            Instrument::TubularBells => "Tubular Bells",
            Instrument::DrawbarOrgan => "Drawbar Organ",
            Instrument::ChurchOrgan => "Church Organ",
            Instrument::Accordion => "Accordion",
            Instrument::NylonStringGuitar => "Nylon String Guitar",
            Instrument::SteelStringGuitar => "Steel String Guitar",
            Instrument::AcousticBass => "Acoustic Bass",
            Instrument::Violin => "Violin",
            Instrument::Cello => "Cello",
            Instrument::Harp => "Harp",
            Instrument::StringEnsemble => "String Ensemble",
            Instrument::ChoirAahs => "Choir Aahs",
            Instrument::Trumpet => "Trumpet",
            Instrument::FrenchHorns => "French Horns",
            Instrument::AltoSax => "Alto Sax",
            Instrument::Flute => "Flute",
            Instrument::PanFlute => "Pan Flute",
            Instrument::SteelDrums => "Steel Drums",
        }
    }

    /// Path of this instrument's sound bank inside `dir`
    pub fn soundfont_path(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.sf2", self.display_name()))
    }

    /// The next instrument in the catalog, wrapping
    pub fn next(self) -> Self {
        let index = Instrument::ALL.iter().position(|&i| i == self).unwrap_or(0);
        Instrument::ALL[(index + 1) % Instrument::ALL.len()]
    }

    /// Look up an instrument by display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Instrument::ALL
            .iter()
            .copied()
            .find(|i| i.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_instrument() {
        assert_eq!(Instrument::default(), Instrument::RhodesEp);
        assert_eq!(Instrument::default().display_name(), "Rhodes EP");
    }

    #[test]
    fn test_soundfont_path() {
        let path = Instrument::YamahaGrandPiano.soundfont_path(Path::new("sf"));
        assert_eq!(path, PathBuf::from("sf/Yamaha Grand Piano.sf2"));
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(Instrument::RhodesEp.next(), Instrument::YamahaGrandPiano);
        assert_eq!(Instrument::SteelDrums.next(), Instrument::RhodesEp);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Instrument::from_name("rhodes ep"), Some(Instrument::RhodesEp));
        assert_eq!(Instrument::from_name("Kazoo"), None);
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<&str> = Instrument::ALL.iter().map(|i| i.display_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Instrument::ALL.len());
    }
}
