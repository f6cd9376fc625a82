// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Toolbar widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::config::Configuration;

/// Application name and version, clear indicator, and the tonic and scale
pub struct ToolbarWidget<'a> {
    config: &'a Configuration,
    has_latched: bool,
    block: Option<Block<'a>>,
}

impl<'a> ToolbarWidget<'a> {
    pub fn new(config: &'a Configuration, has_latched: bool) -> Self {
        Self {
            config,
            has_latched,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for ToolbarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20), // Name and version
                Constraint::Length(12), // Clear indicator
                Constraint::Min(0),     // Title
            ])
            .split(area);

        let name = format!("GridNotes {}", env!("CARGO_PKG_VERSION"));
        Paragraph::new(name)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .render(chunks[0], buf);

        if self.has_latched {
            Paragraph::new(Span::styled(
                "[Clear ⌫]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .render(chunks[1], buf);
        }

        let mut spans = vec![Span::styled(
            self.config.title(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        if self.config.sticky {
            spans.push(Span::styled("  sticky", Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::styled(
            format!("  {} · {}", self.config.interface, self.config.instrument),
            Style::default().fg(Color::DarkGray),
        ));
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Right)
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceClass;

    fn render(config: &Configuration, has_latched: bool) -> String {
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        ToolbarWidget::new(config, has_latched).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_toolbar_shows_title() {
        let config = Configuration::for_device(DeviceClass::Tablet);
        let text = render(&config, false);
        assert!(text.contains("GridNotes"));
        assert!(text.contains("C Major / Ionian"));
        assert!(!text.contains("Clear"));
    }

    #[test]
    fn test_toolbar_clear_indicator() {
        let config = Configuration::for_device(DeviceClass::Tablet);
        assert!(render(&config, true).contains("Clear"));
    }
}
