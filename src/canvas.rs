use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::config::{CANVAS_BG, CELL_SIZE_PX, GLYPH_HALF_UPPER, GridSize};

/// One axis-aligned filled rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FillRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
    pub color: Color,
}

/// Drawing surface the game renders onto.
pub trait Canvas {
    fn fill_rect(&mut self, rect: FillRect);
}

/// Canvas that only records what was drawn.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RecordingCanvas {
    pub calls: Vec<FillRect>,
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: FillRect) {
        self.calls.push(rect);
    }
}

/// Canvas that composites cell fills into half-block terminal glyphs.
///
/// Each terminal row shows two logical rows: the upper one as the glyph's
/// foreground, the lower one as its background.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    grid: GridSize,
    cells: Vec<Option<Color>>,
}

impl TerminalCanvas {
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            cells: vec![None; grid.total_cells()],
        }
    }

    /// Terminal size needed to show the whole grid.
    #[must_use]
    pub fn terminal_size(grid: GridSize) -> (u16, u16) {
        (grid.width, grid.height.div_ceil(2))
    }

    /// Returns the color filled at logical cell `(x, y)`, if any.
    #[must_use]
    pub fn color_at(&self, x: u16, y: u16) -> Option<Color> {
        self.index(i32::from(x), i32::from(y))
            .and_then(|index| self.cells[index])
    }

    /// Writes the composited glyphs into `area`, clipping what does not fit.
    pub fn flush(&self, buffer: &mut Buffer, area: Rect) {
        let (columns, rows) = Self::terminal_size(self.grid);

        for row in 0..rows.min(area.height) {
            for column in 0..columns.min(area.width) {
                let upper = self.color_at(column, row * 2).unwrap_or(CANVAS_BG);
                let lower = self.color_at(column, row * 2 + 1).unwrap_or(CANVAS_BG);

                buffer.set_string(
                    area.x + column,
                    area.y + row,
                    GLYPH_HALF_UPPER,
                    Style::new().fg(upper).bg(lower),
                );
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let width = usize::from(self.grid.width);

        if x >= width || y >= usize::from(self.grid.height) {
            return None;
        }

        Some(y * width + x)
    }
}

impl Canvas for TerminalCanvas {
    fn fill_rect(&mut self, rect: FillRect) {
        let cell_px = i32::from(CELL_SIZE_PX);
        let first_x = rect.x.div_euclid(cell_px);
        let first_y = rect.y.div_euclid(cell_px);
        let columns = i32::from(rect.width.div_ceil(CELL_SIZE_PX));
        let rows = i32::from(rect.height.div_ceil(CELL_SIZE_PX));

        for y in first_y..first_y + rows {
            for x in first_x..first_x + columns {
                if let Some(index) = self.index(x, y) {
                    self.cells[index] = Some(rect.color);
                }
            }
        }
    }
}
