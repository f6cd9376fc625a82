// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Ring keyboard widget: 12 fixed positions around a circle, tonic at the top.

use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use super::grid::render_key;
use crate::keyboard::Keyboard;

const KEY_WIDTH: u16 = 9;
const KEY_HEIGHT: u16 = 4;

/// Cell for `position` of `count` on an ellipse, clockwise from the top
fn key_area(area: Rect, position: usize, count: usize) -> Rect {
    let width = KEY_WIDTH.min(area.width);
    let height = KEY_HEIGHT.min(area.height);

    // Terminal cells are about twice as tall as wide
    let radius_x = (area.width.saturating_sub(width) / 2) as f64;
    let radius_y = (area.height.saturating_sub(height) / 2) as f64;
    let center_x = area.x as f64 + (area.width / 2) as f64;
    let center_y = area.y as f64 + (area.height / 2) as f64;

    let angle = TAU * position as f64 / count.max(1) as f64;
    let x = center_x + radius_x * angle.sin() - (width / 2) as f64;
    let y = center_y - radius_y * angle.cos() - (height / 2) as f64;

    let x = (x.round().max(area.x as f64) as u16).min(area.right().saturating_sub(width));
    let y = (y.round().max(area.y as f64) as u16).min(area.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

/// The first keyboard row drawn as a ring
pub struct RingWidget<'a> {
    keyboard: &'a Keyboard,
    is_active: &'a dyn Fn(usize, usize) -> bool,
    block: Option<Block<'a>>,
}

impl<'a> RingWidget<'a> {
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

impl Widget for RingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let Some(row) = self.keyboard.rows().first() else {
            return;
        };
        for (i, slot) in row.slots.iter().enumerate() {
            let cell = key_area(area, i, row.slots.len());
            render_key(slot, (self.is_active)(0, i), cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, DeviceClass};
    use crate::keyboard::Interface;

    #[test]
    fn test_key_areas_stay_inside() {
        let area = Rect::new(2, 1, 60, 30);
        for i in 0..12 {
            let cell = key_area(area, i, 12);
            assert!(cell.x >= area.x && cell.right() <= area.right());
            assert!(cell.y >= area.y && cell.bottom() <= area.bottom());
        }
    }

    #[test]
    fn test_tonic_at_top_and_opposite_at_bottom() {
        let area = Rect::new(0, 0, 60, 30);
        let top = key_area(area, 0, 12);
        let bottom = key_area(area, 6, 12);
        assert_eq!(top.y, 0);
        assert_eq!(bottom.bottom(), 30);
        assert_eq!(top.x, bottom.x);
    }

    #[test]
    fn test_ring_renders_in_scale_keys() {
        let mut config = Configuration::for_device(DeviceClass::Phone);
        config.interface = Interface::RingNotes;
        let keyboard = Keyboard::compute(&config);
        let inactive = |_: usize, _: usize| false;

        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        RingWidget::new(&keyboard, &inactive).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("C4"));
        assert!(text.contains("E4"));
        assert!(!text.contains("C4♯"));
    }
}
