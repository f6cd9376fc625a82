// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for GridNotes
//!
//! These tests verify that multiple components work together correctly.

use std::sync::{Arc, Mutex};

use gridnotes::audio::{AudioError, Instrument};
use gridnotes::config::{AppConfig, Configuration, DeviceClass};
use gridnotes::control::{ControlAction, KeyboardController};
use gridnotes::keyboard::{compute_row, Interface, KeySlot, KeyStyle, Keyboard, KeysPerOctave, NonDiatonicKeyStyle};
use gridnotes::music::{AbsoluteNote, MidiNote, Note, Octave, Scale};
use gridnotes::playback::{PlaybackSession, Synthesizer, DEFAULT_VELOCITY};
use gridnotes::ui::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    On(MidiNote, u8),
    Off(MidiNote),
}

/// Records every call for inspection
#[derive(Clone, Default)]
struct RecordingSynth(Arc<Mutex<Vec<Event>>>);

impl RecordingSynth {
    fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl Synthesizer for RecordingSynth {
    fn note_on(&mut self, pitch: MidiNote, velocity: u8) -> Result<(), AudioError> {
        self.0.lock().unwrap().push(Event::On(pitch, velocity));
        Ok(())
    }

    fn note_off(&mut self, pitch: MidiNote) -> Result<(), AudioError> {
        self.0.lock().unwrap().push(Event::Off(pitch));
        Ok(())
    }
}

fn abs(note: Note, octave: u8) -> AbsoluteNote {
    AbsoluteNote::new(note, Octave::new(octave).unwrap())
}

/// Sparse C major at octave 4 has keys exactly at the major offsets
#[test]
fn test_sparse_c_major_octave_4() {
    let notes = Scale::Major.sparse_absolute_notes(abs(Note::C, 4));
    let present: Vec<usize> = notes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.is_some())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(present, vec![0, 2, 4, 5, 7, 9, 11]);

    let pitches: Vec<MidiNote> = notes.iter().flatten().map(|n| n.midi_pitch()).collect();
    assert_eq!(pitches, vec![60, 62, 64, 65, 67, 69, 71]);
}

/// A chromatic row of the chromatic scale has no non-scale keys
#[test]
fn test_chromatic_scale_row_all_normal() {
    let row = compute_row(
        Note::C,
        Octave::new(4).unwrap(),
        Scale::Chromatic,
        KeysPerOctave::Chromatic,
        NonDiatonicKeyStyle::Disabled,
    );
    assert_eq!(row.len(), 12);
    assert!(row.iter().all(|s| s.style() == Some(KeyStyle::Normal)));
}

/// Rows are recomputed identically from the same inputs
#[test]
fn test_layout_idempotent_for_every_scale() {
    for scale in Scale::ALL {
        for note in Note::ALL {
            for mode in [KeysPerOctave::Chromatic, KeysPerOctave::Diatonic] {
                let octave = Octave::new(8).unwrap();
                let a = compute_row(note, octave, scale, mode, NonDiatonicKeyStyle::Shaded);
                let b = compute_row(note, octave, scale, mode, NonDiatonicKeyStyle::Shaded);
                assert_eq!(a, b);
            }
        }
    }
}

/// Keys past octave 8 are empty, and empty keys only trail the row
#[test]
fn test_top_octave_rows_truncate() {
    let row = compute_row(
        Note::C,
        Octave::MAX,
        Scale::Chromatic,
        KeysPerOctave::Chromatic,
        NonDiatonicKeyStyle::Shaded,
    );
    let first_empty = row.iter().position(KeySlot::is_empty).unwrap();
    assert_eq!(first_empty, 9);
    assert!(row[first_empty..].iter().all(KeySlot::is_empty));
    assert_eq!(row[8].note().map(|n| n.midi_pitch()), Some(116));
}

/// Pressing C4 sounds MIDI 60 at the default velocity, releasing stops it
#[test]
fn test_press_release_c4() {
    let mut synth = RecordingSynth::default();
    let mut session = PlaybackSession::new(false);

    session.press(abs(Note::C, 4), &mut synth).unwrap();
    assert_eq!(synth.take(), vec![Event::On(60, DEFAULT_VELOCITY)]);
    assert_eq!(DEFAULT_VELOCITY, 128);

    session.release(abs(Note::C, 4), &mut synth).unwrap();
    assert_eq!(synth.take(), vec![Event::Off(60)]);
}

/// Sticky mode: pressing MIDI 69 twice latches then unlatches it
#[test]
fn test_sticky_toggle_69() {
    let mut synth = RecordingSynth::default();
    let mut session = PlaybackSession::new(true);
    let note = abs(Note::GsAb, 4).successor().unwrap();
    assert_eq!(note.midi_pitch(), 69);

    session.press(note, &mut synth).unwrap();
    assert!(session.latched().contains(&note));
    assert_eq!(synth.take(), vec![Event::On(69, 128)]);

    session.press(note, &mut synth).unwrap();
    assert!(session.latched().is_empty());
    assert_eq!(synth.take(), vec![Event::Off(69)]);
}

/// After any presses, clearing releases exactly what was latched
#[test]
fn test_clear_all_releases_every_latched_note() {
    let mut synth = RecordingSynth::default();
    let mut session = PlaybackSession::new(true);
    let notes = [
        abs(Note::C, 4),
        abs(Note::E, 4),
        abs(Note::G, 4),
        abs(Note::E, 4), // toggled back off
        abs(Note::A, 2),
    ];
    for note in notes {
        session.press(note, &mut synth).unwrap();
    }
    let before: Vec<MidiNote> = session.latched().iter().map(|n| n.midi_pitch()).collect();
    synth.take();

    session.clear_latched(&mut synth).unwrap();
    assert!(session.latched().is_empty());

    let mut offs: Vec<MidiNote> = synth
        .take()
        .into_iter()
        .map(|e| match e {
            Event::Off(p) => p,
            Event::On(..) => panic!("clear emitted a note on"),
        })
        .collect();
    offs.sort();
    let mut before = before;
    before.sort();
    assert_eq!(offs, before);
    assert_eq!(offs, vec![33, 60, 67]);
}

/// Device defaults feed the layout engine
#[test]
fn test_device_defaults_produce_keyboards() {
    let phone = Keyboard::compute(&Configuration::for_device(DeviceClass::Phone));
    assert_eq!(phone.row_count(), 5);
    assert!(phone.rows().iter().all(|r| r.slots.len() == 7));
    assert_eq!(phone.rows()[0].octave.value(), 6);

    let tablet = Keyboard::compute(&Configuration::for_device(DeviceClass::Tablet));
    assert_eq!(tablet.row_count(), 7);
    assert!(tablet.rows().iter().all(|r| r.slots.len() == 12));
    assert_eq!(tablet.rows()[6].octave.value(), 1);
}

/// Key events flow from bindings through the player to the synth
#[test]
fn test_keys_to_synth() {
    let synth = RecordingSynth::default();
    let controller = KeyboardController::with_defaults();
    let mut player = Player::new(
        Configuration::for_device(DeviceClass::Tablet),
        Box::new(synth.clone()),
    );

    use crossterm::event::{KeyCode, KeyModifiers};
    let action = controller
        .get_action(KeyCode::Char('z'), KeyModifiers::NONE)
        .unwrap();
    player.apply(action).unwrap();
    // Tablet bottom row is octave 1: C1 = 24
    assert_eq!(synth.take(), vec![Event::On(24, 128)]);

    player.release_key(0, 0).unwrap();
    assert_eq!(synth.take(), vec![Event::Off(24)]);

    // Changing the scale silences everything
    let action = controller.get_action(KeyCode::F(4), KeyModifiers::NONE).unwrap();
    player.apply(action).unwrap();
    assert_eq!(synth.take().len(), 128);
    assert_eq!(player.config().scale, Scale::NaturalMinor);
}

/// The ring is a single sparse row at octave 4 regardless of device
#[test]
fn test_ring_interface() {
    let mut config = Configuration::for_device(DeviceClass::Tablet);
    config.interface = Interface::RingNotes;
    config.keys_per_octave = KeysPerOctave::Diatonic;
    config.scale = Scale::MajorPentatonic;

    let keyboard = Keyboard::compute(&config);
    assert_eq!(keyboard.row_count(), 1);
    let row = &keyboard.rows()[0];
    assert_eq!(row.slots.len(), 12);
    let present: Vec<usize> = (0..12).filter(|&i| !row.slots[i].is_empty()).collect();
    assert_eq!(present, vec![0, 2, 4, 7, 9]);
}

/// Chord grid keys sound diatonic triads
#[test]
fn test_chord_grid_triads() {
    let synth = RecordingSynth::default();
    let mut config = Configuration::for_device(DeviceClass::Phone);
    config.interface = Interface::GridChords;
    let mut player = Player::new(config, Box::new(synth.clone()));

    // Second key of the bottom row (octave 2) is ii: D2 F2 A3
    player.apply(ControlAction::PlayKey { row: 0, column: 1 }).unwrap();
    let ons: Vec<MidiNote> = synth
        .take()
        .into_iter()
        .filter_map(|e| match e {
            Event::On(p, _) => Some(p),
            Event::Off(_) => None,
        })
        .collect();
    assert_eq!(ons, vec![38, 41, 45]);
}

/// Startup options round-trip through a file
#[test]
fn test_app_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gridnotes.yaml");

    let mut config = AppConfig::default();
    config.device_class = DeviceClass::Phone;
    config.soundfont_dir = dir.path().to_path_buf();
    config.save(&path).unwrap();

    let loaded = AppConfig::load(&path).unwrap();
    assert_eq!(loaded.initial_configuration(), Configuration::for_device(DeviceClass::Phone));
    assert_eq!(
        loaded.soundfont_path(Instrument::Cello),
        dir.path().join("Cello.sf2")
    );
}
