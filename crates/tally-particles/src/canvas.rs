//! Cell grid the particle field is drawn into before it becomes ratatui lines.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::chars::LINK_CHAR;
use crate::color::fade;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
    /// Brightness used to decide which of two overlapping links wins.
    alpha: f64,
}

/// A fixed-size grid of optional glyphs.
#[derive(Debug)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Option<Cell>>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    /// Glyph at a cell, if anything was drawn there.
    #[cfg(test)]
    pub fn get(&self, col: u16, row: u16) -> Option<(char, Color)> {
        let idx = self.index(col as i32, row as i32)?;
        self.cells[idx].map(|cell| (cell.ch, cell.color))
    }

    /// Draw a glyph, replacing whatever was there.
    pub fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if let Some(idx) = self.index(col, row) {
            self.cells[idx] = Some(Cell {
                ch,
                color,
                alpha: 1.0,
            });
        }
    }

    /// Draw a link between two cells with Bresenham's algorithm.
    ///
    /// A dimmer link never overwrites a brighter one.
    pub fn link(&mut self, from: (i32, i32), to: (i32, i32), rgb: (u8, u8, u8), alpha: f64) {
        let color = fade(rgb, alpha);
        let (mut col, mut row) = from;
        let dx = (to.0 - col).abs();
        let dy = -(to.1 - row).abs();
        let step_col = if col < to.0 { 1 } else { -1 };
        let step_row = if row < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend(col, row, color, alpha);
            if (col, row) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                col += step_col;
            }
            if e2 <= dx {
                err += dx;
                row += step_row;
            }
        }
    }

    fn blend(&mut self, col: i32, row: i32, color: Color, alpha: f64) {
        let Some(idx) = self.index(col, row) else {
            return;
        };
        let brighter = self.cells[idx].is_none_or(|cell| cell.alpha < alpha);
        if brighter {
            self.cells[idx] = Some(Cell {
                ch: LINK_CHAR,
                color,
                alpha,
            });
        }
    }

    /// Convert to one styled line per row.
    pub fn into_lines(self) -> Vec<Line<'static>> {
        let width = self.width.max(1) as usize;
        self.cells
            .chunks(width)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(cell) => Span::styled(cell.ch.to_string(), Style::new().fg(cell.color)),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}
