// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard shortcut handling.
//!
//! Binds the computer keyboard to note keys and settings. Four rows of
//! character keys play the bottom four rows of the on-screen keyboard;
//! function keys edit the configuration.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use super::ControlAction;

/// Character keys that play notes, bottom row first
pub const KEY_ROWS: [&str; 4] = ["zxcvbnm,./", "asdfghjkl;'\\", "qwertyuiop[]", "1234567890-="];

/// A keyboard shortcut definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a shortcut with no modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Create a shortcut with Ctrl modifier
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Check if this shortcut matches a key event
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }
}

/// A keyboard binding (shortcut to action)
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// The shortcut
    pub shortcut: Shortcut,
    /// The action to perform
    pub action: ControlAction,
    /// Description for help display
    pub description: String,
    /// Category for grouping in help
    pub category: String,
}

impl KeyBinding {
    /// Create a new key binding
    pub fn new(shortcut: Shortcut, action: ControlAction, description: impl Into<String>) -> Self {
        Self {
            shortcut,
            action,
            description: description.into(),
            category: "General".to_string(),
        }
    }

    /// Set the category
    pub fn category(mut self, cat: impl Into<String>) -> Self {
        self.category = cat.into();
        self
    }
}

/// Keyboard controller with configurable bindings
pub struct KeyboardController {
    bindings: HashMap<Shortcut, KeyBinding>,
}

impl KeyboardController {
    /// Create an empty keyboard controller
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a keyboard controller with default bindings
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        controller.add_default_bindings();
        controller
    }

    fn add_default_bindings(&mut self) {
        // Note keys
        for (row, keys) in KEY_ROWS.iter().enumerate() {
            for (column, c) in keys.chars().enumerate() {
                self.add(
                    KeyBinding::new(
                        Shortcut::key(KeyCode::Char(c)),
                        ControlAction::PlayKey { row, column },
                        format!("Play row {} key {}", row + 1, column + 1),
                    )
                    .category("Keys"),
                );
            }
        }

        self.add(
            KeyBinding::new(
                Shortcut::key(KeyCode::Backspace),
                ControlAction::ClearLatched,
                "Clear latched notes",
            )
            .category("Keys"),
        );

        // Settings
        let settings = [
            (1, ControlAction::TonicDown, "Tonic down"),
            (2, ControlAction::TonicUp, "Tonic up"),
            (3, ControlAction::ScalePrev, "Previous scale"),
            (4, ControlAction::ScaleNext, "Next scale"),
            (5, ControlAction::ToggleKeysPerOctave, "Chromatic / diatonic keys"),
            (6, ControlAction::ToggleNonScaleStyle, "Shade / disable non-scale keys"),
            (7, ControlAction::ToggleSticky, "Sticky keys"),
            (8, ControlAction::NextInstrument, "Next instrument"),
            (9, ControlAction::NextInterface, "Next interface"),
        ];
        for (n, action, description) in settings {
            self.add(KeyBinding::new(Shortcut::key(KeyCode::F(n)), action, description).category("Settings"));
        }

        // UI
        self.add(
            KeyBinding::new(Shortcut::key(KeyCode::F(10)), ControlAction::ToggleHelp, "Toggle Help")
                .category("UI"),
        );

        self.add(
            KeyBinding::new(Shortcut::key(KeyCode::Char('?')), ControlAction::ToggleHelp, "Toggle Help")
                .category("UI"),
        );

        self.add(KeyBinding::new(Shortcut::key(KeyCode::Esc), ControlAction::Quit, "Quit").category("UI"));

        self.add(
            KeyBinding::new(Shortcut::ctrl(KeyCode::Char('c')), ControlAction::Quit, "Quit").category("UI"),
        );
    }

    /// Add a key binding
    pub fn add(&mut self, binding: KeyBinding) {
        self.bindings.insert(binding.shortcut.clone(), binding);
    }

    /// Remove a key binding
    pub fn remove(&mut self, shortcut: &Shortcut) -> Option<KeyBinding> {
        self.bindings.remove(shortcut)
    }

    /// Get action for a key event.
    ///
    /// Shift is ignored on character keys, since terminals differ on
    /// whether they report it for characters like `?`.
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<ControlAction> {
        let lookup = |modifiers| self.bindings.get(&Shortcut::new(code, modifiers)).map(|b| b.action);

        lookup(modifiers).or_else(|| match code {
            KeyCode::Char(_) if modifiers.contains(KeyModifiers::SHIFT) => {
                lookup(modifiers - KeyModifiers::SHIFT)
            }
            _ => None,
        })
    }

    /// Get all bindings for help display
    pub fn bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.values()
    }

    /// Get bindings grouped by category
    pub fn bindings_by_category(&self) -> HashMap<String, Vec<&KeyBinding>> {
        let mut grouped: HashMap<String, Vec<&KeyBinding>> = HashMap::new();

        for binding in self.bindings.values() {
            grouped
                .entry(binding.category.clone())
                .or_default()
                .push(binding);
        }

        grouped
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Format a shortcut for display
pub fn format_shortcut(shortcut: &Shortcut) -> String {
    let mut parts = Vec::new();

    if shortcut.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if shortcut.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if shortcut.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }

    let key = match shortcut.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        _ => "?".to_string(),
    };

    parts.push(&key);
    parts.join("+")
}
