// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory for GridNotes.
//!
//! This module provides the pitch model, the scale catalog and the
//! diatonic chord catalog the keyboard layouts are built from.

pub mod chord;
pub mod pitch;
pub mod scale;

pub use chord::Chord;
pub use pitch::{AbsoluteNote, MidiNote, Note, Octave, SEMITONES_PER_OCTAVE};
pub use scale::Scale;
