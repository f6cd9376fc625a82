// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! GridNotes: a scale-aware grid and ring keyboard.
//!
//! The music-theory engine ([`music`], [`keyboard`]) maps a configuration
//! to rows of playable keys; [`playback`] turns key presses into note-on
//! and note-off calls on a synth ([`audio`] or an external [`midi`] port).

pub mod audio;
pub mod config;
pub mod control;
pub mod keyboard;
pub mod midi;
pub mod music;
pub mod playback;
pub mod ui;
