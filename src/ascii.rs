//! Text rendering of a room for the terminal.
//!
//! [`AsciiSurface`] implements [`Surface`] on a character grid where each cell
//! covers `cell_px` x `cell_px` room pixels. A fill marks every cell its
//! rectangle touches, so later fills overwrite earlier ones exactly like the
//! painter's order on a real canvas. Outlines are below cell resolution and
//! are not drawn.

#[cfg(test)]
#[path = "ascii_test.rs"]
mod ascii_test;

use canvas::geom::Rect;
use canvas::render::{Paint, Surface};

const BACKGROUND: char = '.';

/// Grid character for a fill paint.
#[must_use]
pub fn glyph(paint: Paint) -> char {
    match paint {
        Paint::BlockOff => 'o',
        Paint::BlockOn => '#',
        Paint::BlockEmpty => ':',
        Paint::Door => 'D',
        Paint::Outline => '+',
    }
}

/// One-line key for the glyphs.
#[must_use]
pub fn legend() -> String {
    format!(
        "{BACKGROUND} floor  {} off  {} on  {} empty  {} door",
        glyph(Paint::BlockOff),
        glyph(Paint::BlockOn),
        glyph(Paint::BlockEmpty),
        glyph(Paint::Door)
    )
}

#[derive(Debug, Clone)]
pub struct AsciiSurface {
    cell_px: f64,
    rows: Vec<Vec<char>>,
}

impl AsciiSurface {
    #[must_use]
    pub fn new(cell_px: u32) -> Self {
        Self { cell_px: f64::from(cell_px.max(1)), rows: Vec::new() }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }

    /// Cell span `[start, end)` covered by `[from, from + len)` pixels,
    /// limited to `count` cells.
    fn span(&self, from: f64, len: f64, count: usize) -> (usize, usize) {
        let start = to_cell((from / self.cell_px).floor(), count);
        let end = to_cell(((from + len) / self.cell_px).ceil(), count);
        (start, end.max(start))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn to_cell(value: f64, count: usize) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= count as f64 {
        count
    } else {
        value as usize
    }
}

impl Surface for AsciiSurface {
    fn clear(&mut self, width: f64, height: f64) {
        let cols = to_cell((width / self.cell_px).ceil(), usize::MAX);
        let rows = to_cell((height / self.cell_px).ceil(), usize::MAX);
        self.rows = vec![vec![BACKGROUND; cols]; rows];
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        let (c0, c1) = self.span(rect.x, rect.width, self.columns());
        let (r0, r1) = self.span(rect.y, rect.height, self.rows.len());
        let ch = glyph(paint);
        for row in &mut self.rows[r0..r1] {
            for cell in &mut row[c0..c1] {
                *cell = ch;
            }
        }
    }

    fn stroke_rect(&mut self, _rect: Rect, _paint: Paint) {}
}

impl std::fmt::Display for AsciiSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
