// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for GridNotes.
//!
//! This module provides two things:
//! - [`Configuration`], the in-memory keyboard settings the layout engine
//!   reads. It is never persisted; every launch starts from the defaults
//!   for the device class.
//! - [`AppConfig`], an optional YAML file with startup options (audio
//!   settings, sound bank location, logging).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::Instrument;
use crate::keyboard::{Interface, KeysPerOctave, NonDiatonicKeyStyle};
use crate::music::{Note, Octave, Scale};

/// Screen size class the defaults are chosen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Narrow screen: five octaves, diatonic keys
    Phone,
    /// Wide screen: seven octaves, all 12 keys
    Tablet,
}

impl DeviceClass {
    /// Parse from a CLI/config string
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "phone" => Some(DeviceClass::Phone),
            "tablet" | "pad" => Some(DeviceClass::Tablet),
            _ => None,
        }
    }
}

/// Keyboard settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Layout shape
    pub interface: Interface,
    /// Pitch class the scale is built on
    pub tonic: Note,
    /// Active scale
    pub scale: Scale,
    /// Octaves to show, lowest first
    pub octaves: Vec<Octave>,
    /// Chromatic or diatonic rows
    pub keys_per_octave: KeysPerOctave,
    /// Treatment of out-of-scale keys in chromatic rows
    pub non_scale_style: NonDiatonicKeyStyle,
    /// Latch keys on press instead of holding them
    pub sticky: bool,
    /// Sound bank in use
    pub instrument: Instrument,
}

impl Configuration {
    /// Defaults for a device class
    pub fn for_device(device: DeviceClass) -> Self {
        let (octaves, keys_per_octave) = match device {
            DeviceClass::Phone => (Octave::PHONE.to_vec(), KeysPerOctave::Diatonic),
            DeviceClass::Tablet => (Octave::TABLET.to_vec(), KeysPerOctave::Chromatic),
        };

        Self {
            interface: Interface::GridNotes,
            tonic: Note::C,
            scale: Scale::Major,
            octaves,
            keys_per_octave,
            non_scale_style: NonDiatonicKeyStyle::Disabled,
            sticky: false,
            instrument: Instrument::default(),
        }
    }

    /// Toolbar title, e.g. "C Major / Ionian"
    pub fn title(&self) -> String {
        format!("{} {}", self.tonic, self.scale)
    }
}

/// Startup options loaded from a YAML file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Device class the keyboard defaults come from
    #[serde(default = "default_device_class")]
    pub device_class: DeviceClass,
    /// Directory containing the instrument `.sf2` files
    #[serde(default = "default_soundfont_dir")]
    pub soundfont_dir: PathBuf,
    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Output buffer size in frames
    #[serde(default = "default_buffer_size")]
    pub buffer_size: u32,
    /// Master gain (0.0 - 1.0)
    #[serde(default = "default_gain")]
    pub gain: f32,
    /// Send notes to this MIDI output port instead of the built-in synth
    #[serde(default)]
    pub midi_output: Option<String>,
    /// Where log output goes while the terminal UI is running
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// How long a key sounds when the terminal cannot report key releases
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
}

fn default_device_class() -> DeviceClass {
    DeviceClass::Tablet
}
fn default_soundfont_dir() -> PathBuf {
    PathBuf::from("soundfonts")
}
fn default_sample_rate() -> u32 {
    44100
}
fn default_buffer_size() -> u32 {
    512
}
fn default_gain() -> f32 {
    0.5
}
fn default_log_file() -> PathBuf {
    PathBuf::from("gridnotes.log")
}
fn default_hold_ms() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device_class: default_device_class(),
            soundfont_dir: default_soundfont_dir(),
            sample_rate: default_sample_rate(),
            buffer_size: default_buffer_size(),
            gain: default_gain(),
            midi_output: None,
            log_file: default_log_file(),
            hold_ms: default_hold_ms(),
        }
    }
}

impl AppConfig {
    /// Load startup options from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse startup options from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save startup options to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Keyboard settings for the configured device class
    pub fn initial_configuration(&self) -> Configuration {
        Configuration::for_device(self.device_class)
    }

    /// Path of the sound bank for an instrument
    pub fn soundfont_path(&self, instrument: Instrument) -> PathBuf {
        instrument.soundfont_path(&self.soundfont_dir)
    }
}
