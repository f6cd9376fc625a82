// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for GridNotes.
//!
//! Provides a ratatui-based terminal interface: a toolbar, the grid or ring
//! keyboard, a status bar and a help overlay. Key presses on the computer
//! keyboard play the on-screen keys.

mod grid;
mod player;
mod ring;
mod toolbar;

pub use grid::GridWidget;
pub use player::{KeyPosition, Player};
pub use ring::RingWidget;
pub use toolbar::ToolbarWidget;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{info, warn};

use crate::config::Configuration;
use crate::control::{format_shortcut, ControlAction, KeyboardController};
use crate::keyboard::Interface;

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Status bar text describing the setting an action changed
pub fn describe_setting(action: ControlAction, config: &Configuration) -> Option<String> {
    let text = match action {
        ControlAction::TonicDown | ControlAction::TonicUp => format!("Tonic: {}", config.tonic),
        ControlAction::ScalePrev | ControlAction::ScaleNext => format!("Scale: {}", config.scale),
        ControlAction::ToggleKeysPerOctave => {
            format!("Keys per octave: {}", config.keys_per_octave.display_name())
        }
        ControlAction::ToggleNonScaleStyle => {
            format!("Non-diatonic keys: {}", config.non_scale_style.display_name())
        }
        ControlAction::ToggleSticky => {
            format!("Sticky keys: {}", if config.sticky { "on" } else { "off" })
        }
        ControlAction::NextInstrument => format!("Instrument: {}", config.instrument),
        ControlAction::NextInterface => format!("Interface: {}", config.interface),
        _ => return None,
    };
    Some(text)
}

/// Terminal UI application
pub struct App {
    player: Player,
    controller: KeyboardController,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
    running: bool,
    show_help: bool,
    /// Whether the terminal reports key releases
    releases_reported: bool,
    /// Auto-release time when it does not
    hold: Duration,
    status: Option<(String, Instant)>,
}

impl App {
    /// Take over the terminal
    pub fn new(player: Player, hold: Duration) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let releases_reported = supports_keyboard_enhancement().unwrap_or(false);
        if releases_reported {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            warn!(
                hold_ms = hold.as_millis() as u64,
                "terminal does not report key releases, keys auto-release"
            );
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            player,
            controller: KeyboardController::with_defaults(),
            terminal,
            frame_rate: 60,
            running: true,
            show_help: false,
            releases_reported,
            hold,
            status: None,
        })
    }

    /// Set frame rate
    pub fn set_frame_rate(&mut self, fps: u32) {
        self.frame_rate = fps.clamp(1, 120);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run until quit. Synth failures end the loop with an error.
    pub fn run(&mut self) -> Result<()> {
        info!("terminal UI started");
        while self.running {
            self.draw()?;

            if let Some(Event::Key(key)) = self.poll_event()? {
                self.handle_key(key)?;
            }

            if !self.releases_reported {
                self.player
                    .release_expired(Instant::now(), self.hold)
                    .context("Failed to release held keys")?;
            }
            self.clear_expired_status();
        }

        self.player.shutdown().context("Failed to silence synth")?;
        info!("terminal UI stopped");
        Ok(())
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = self
            .controller
            .get_action(key.code, key.modifiers)
            .unwrap_or(ControlAction::None);

        match key.kind {
            KeyEventKind::Release => {
                if let ControlAction::PlayKey { row, column } = action {
                    self.player
                        .release_key(row, column)
                        .context("Failed to release key")?;
                }
                return Ok(());
            }
            KeyEventKind::Repeat => return Ok(()),
            KeyEventKind::Press => {}
        }

        match action {
            ControlAction::Quit => self.running = false,
            ControlAction::ToggleHelp => self.show_help = !self.show_help,
            ControlAction::None => {}
            action => {
                self.player
                    .apply(action)
                    .with_context(|| format!("Synth failed handling {:?}", action))?;
                if let Some(text) = describe_setting(action, self.player.config()) {
                    self.set_status(text);
                }
            }
        }
        Ok(())
    }

    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
    }

    fn clear_expired_status(&mut self) {
        if let Some((_, time)) = &self.status {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status = None;
            }
        }
    }

    /// Poll for events with timeout
    fn poll_event(&self) -> io::Result<Option<Event>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    pub fn draw(&mut self) -> io::Result<()> {
        let player = &self.player;
        let controller = &self.controller;
        let status = self.status.as_ref().map(|(text, _)| text.as_str());
        let show_help = self.show_help;

        self.terminal.draw(|frame| {
            let area = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Toolbar
                    Constraint::Min(6),    // Keyboard
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            let session = player.session();
            frame.render_widget(
                ToolbarWidget::new(player.config(), session.has_latched()),
                chunks[0],
            );

            render_keyboard(frame, chunks[1], player);
            render_status_bar(frame, chunks[2], status);

            if show_help {
                render_help_overlay(frame, area, controller);
            }
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if self.releases_reported {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn render_keyboard(frame: &mut Frame, area: Rect, player: &Player) {
    let keyboard = player.keyboard();
    let session = player.session();
    let is_active = |row: usize, index: usize| {
        player.is_held((row, index))
            || keyboard
                .slot(row, index)
                .note()
                .is_some_and(|note| session.latched().contains(&note))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", keyboard.interface()));

    match keyboard.interface() {
        Interface::GridNotes | Interface::GridChords => {
            frame.render_widget(GridWidget::new(keyboard, &is_active).block(block), area)
        }
        Interface::RingNotes => {
            frame.render_widget(RingWidget::new(keyboard, &is_active).block(block), area)
        }
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let text = match status {
        Some(msg) => Span::styled(msg, Style::default().fg(Color::Yellow)),
        None => Span::styled(
            " z-row..1-row: Play | F1-F9: Settings | Backspace: Clear | F10/?: Help | Esc: Quit",
            Style::default().fg(Color::DarkGray),
        ),
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Help text: the playing keys, then every settings and UI binding
fn help_lines(controller: &KeyboardController) -> Vec<Line<'static>> {
    let grouped = controller.bindings_by_category();

    let mut lines = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  z x c v ...  Bottom row, first 10 keys"),
        Line::from("  a s d f ...  Second row"),
        Line::from("  q w e r ...  Third row"),
        Line::from("  1 2 3 4 ...  Fourth row / ring"),
        Line::from("  Backspace    Clear latched notes"),
        Line::from(Span::styled(
            "  Last 2 keys of a 12-key bottom row have no key",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    for category in ["Settings", "UI"] {
        let Some(bindings) = grouped.get(category) else {
            continue;
        };
        let mut entries: Vec<(String, String)> = bindings
            .iter()
            .map(|b| (format_shortcut(&b.shortcut), b.description.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            category,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (key, description) in entries {
            lines.push(Line::from(format!("  {:<12} {}", key, description)));
        }
    }
    lines
}

fn render_help_overlay(frame: &mut Frame, area: Rect, controller: &KeyboardController) {
    let lines = help_lines(controller);

    let width = 50.min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, help_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));
    frame.render_widget(Paragraph::new(lines).block(block), help_area);
}
