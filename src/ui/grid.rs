// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Grid keyboard widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::keyboard::{KeySlot, KeyStyle, Keyboard};

/// Style for a key cell
pub(super) fn key_style(slot: &KeySlot, active: bool) -> Style {
    match slot {
        KeySlot::Empty => Style::default().fg(Color::Black),
        KeySlot::Key { .. } if active => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        KeySlot::Key { style, note } => match style {
            KeyStyle::Normal if note.note.is_natural() => {
                Style::default().fg(Color::Black).bg(Color::White)
            }
            KeyStyle::Normal => Style::default().fg(Color::White).bg(Color::Blue),
            KeyStyle::Shaded => Style::default().fg(Color::White).bg(Color::DarkGray),
            KeyStyle::Disabled => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        },
    }
}

/// Draw one key cell with its two-line label
pub(super) fn render_key(slot: &KeySlot, active: bool, area: Rect, buf: &mut Buffer) {
    let Some(note) = slot.note() else {
        return;
    };
    let style = key_style(slot, active);

    let block = Block::default().borders(Borders::ALL).border_style(style);
    let inner = block.inner(area);
    block.render(area, buf);

    let label = note.button_text();
    let lines: Vec<Line> = label.lines().map(Line::from).collect();
    Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

/// Rows of keys, highest octave on top
pub struct GridWidget<'a> {
    keyboard: &'a Keyboard,
    is_active: &'a dyn Fn(usize, usize) -> bool,
    block: Option<Block<'a>>,
}

impl<'a> GridWidget<'a> {
    /// `is_active(row, index)` decides which keys are lit
    pub fn new(keyboard: &'a Keyboard, is_active: &'a dyn Fn(usize, usize) -> bool) -> Self {
        Self {
            keyboard,
            is_active,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let rows = self.keyboard.rows();
        if rows.is_empty() {
            return;
        }

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, rows.len() as u32); rows.len()])
            .split(area);

        for (r, (row, row_area)) in rows.iter().zip(row_areas.iter()).enumerate() {
            if row.slots.is_empty() {
                continue;
            }
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, row.slots.len() as u32); row.slots.len()])
                .split(*row_area);

            for (i, (slot, cell)) in row.slots.iter().zip(columns.iter()).enumerate() {
                render_key(slot, (self.is_active)(r, i), *cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, DeviceClass};
    use crate::music::{AbsoluteNote, Note, Octave};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_key_styles_differ() {
        let c4 = AbsoluteNote::new(Note::C, Octave::new(4).unwrap());
        let normal = key_style(&KeySlot::key(c4, KeyStyle::Normal), false);
        let shaded = key_style(&KeySlot::key(c4, KeyStyle::Shaded), false);
        let disabled = key_style(&KeySlot::key(c4, KeyStyle::Disabled), false);
        let active = key_style(&KeySlot::key(c4, KeyStyle::Normal), true);

        assert_ne!(normal, shaded);
        assert_ne!(shaded, disabled);
        assert_ne!(normal, active);
    }

    #[test]
    fn test_grid_renders_labels() {
        let keyboard = Keyboard::compute(&Configuration::for_device(DeviceClass::Phone));
        let inactive = |_: usize, _: usize| false;
        let area = Rect::new(0, 0, 70, 25);
        let mut buf = Buffer::empty(area);

        GridWidget::new(&keyboard, &inactive).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("C2"));
        assert!(text.contains("B6"));
    }

    #[test]
    fn test_render_key_skips_empty_slot() {
        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::empty(area);
        render_key(&KeySlot::Empty, false, area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
