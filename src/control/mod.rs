// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control system for computer-keyboard input.
//!
//! This module provides:
//! - The actions a key can trigger
//! - Keyboard bindings, including the rows of keys that play notes

pub mod keyboard;

pub use keyboard::{format_shortcut, KeyBinding, KeyboardController, Shortcut, KEY_ROWS};

/// Action that can be triggered by a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// No action
    None,

    // Playing
    /// Play the key at `column` of a computer-keyboard row, counted from
    /// the bottom (0 is the `z` row)
    PlayKey { row: usize, column: usize },
    /// Release every latched note
    ClearLatched,

    // Settings
    /// Move the tonic down a semitone
    TonicDown,
    /// Move the tonic up a semitone
    TonicUp,
    /// Previous scale in the catalog
    ScalePrev,
    /// Next scale in the catalog
    ScaleNext,
    /// Switch between chromatic and diatonic rows
    ToggleKeysPerOctave,
    /// Switch between shaded and disabled out-of-scale keys
    ToggleNonScaleStyle,
    /// Switch sticky mode
    ToggleSticky,
    /// Next instrument in the catalog
    NextInstrument,
    /// Next keyboard interface
    NextInterface,

    // UI
    /// Toggle help display
    ToggleHelp,
    /// Quit application
    Quit,
}
