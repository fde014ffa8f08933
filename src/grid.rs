use std::fmt;

use thiserror::Error;

use crate::GridCoord;
use crate::cell::Glyphs;
use crate::cell::State;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid dimensions cannot be negative, got {width}x{height}")]
    InvalidSize { width: GridCoord, height: GridCoord },

    #[error("Expected a buffer of {expected} cells, but got {got}")]
    BufferLength { expected: usize, got: usize },
}

/// A rectangular field of cells, stored row-major.
///
/// The buffer always holds exactly `width * height` cells. Coordinates are `(x, y)` with `x` the
/// column and `y` the row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<State>,
}

impl Grid {
    /// Create a grid where every cell is dead.
    pub fn new(width: GridCoord, height: GridCoord) -> Result<Self, GridError> {
        let (width, height) = Self::validate(width, height)?;

        Ok(Self {
            width,
            height,
            cells: vec![State::Dead; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid has no cells at all (zero width or zero height).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Resize the grid in place.
    ///
    /// The overlapping rectangle `[0, min(w, w')) x [0, min(h, h'))` is kept as-is, newly exposed
    /// cells are dead and cells outside the new bounds are dropped. On error the grid is left
    /// untouched.
    pub fn resize(&mut self, width: GridCoord, height: GridCoord) -> Result<(), GridError> {
        let (width, height) = Self::validate(width, height)?;

        if width == self.width && height == self.height {
            return Ok(());
        }

        let mut cells = vec![State::Dead; width * height];
        let min_w = self.width.min(width);
        let min_h = self.height.min(height);

        // Rows are strided by the old width in the source and the new width in the destination
        for y in 0..min_h {
            let src = y * self.width;
            let dst = y * width;

            cells[dst..dst + min_w].copy_from_slice(&self.cells[src..src + min_w]);
        }

        self.cells = cells;
        self.width = width;
        self.height = height;

        Ok(())
    }

    pub fn set_width(&mut self, width: GridCoord) -> Result<(), GridError> {
        self.resize(width, self.height as GridCoord)
    }

    pub fn set_height(&mut self, height: GridCoord) -> Result<(), GridError> {
        self.resize(self.width as GridCoord, height)
    }

    /// Returns the state at `(x, y)`, or `None` if the coordinates are out of range.
    pub fn cell(&self, x: GridCoord, y: GridCoord) -> Option<State> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Like [`Grid::cell`], but out of range reads as dead.
    pub fn is_alive(&self, x: GridCoord, y: GridCoord) -> bool {
        self.cell(x, y).is_some_and(State::is_alive)
    }

    /// Overwrite the state at `(x, y)`. Out of range coordinates are ignored.
    pub fn set_cell(&mut self, x: GridCoord, y: GridCoord, state: State) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = state;
        }
    }

    /// Flip the state at `(x, y)`. Out of range coordinates are ignored.
    pub fn toggle(&mut self, x: GridCoord, y: GridCoord) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = self.cells[i].toggled();
        }
    }

    /// The whole row-major buffer.
    pub fn cells(&self) -> &[State] {
        &self.cells
    }

    /// Replace the whole buffer. The length must be `width * height`.
    pub fn set_cells(&mut self, cells: Vec<State>) -> Result<(), GridError> {
        let expected = self.width * self.height;

        if cells.len() != expected {
            return Err(GridError::BufferLength {
                expected,
                got: cells.len(),
            });
        }

        self.cells = cells;

        Ok(())
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[State]> {
        (0..self.height).map(move |y| &self.cells[self.xy_from(0, y)..self.xy_from(0, y + 1)])
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(State::Dead);
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Draw the grid with the given glyphs, one line per row.
    pub fn render(&self, glyphs: &Glyphs) -> String {
        let mut s = String::with_capacity((self.width + 1) * self.height);

        for row in self.rows() {
            s.extend(row.iter().map(|c| c.glyph(glyphs)));
            s.push('\n');
        }

        s
    }

    /// Unchecked read for in-range `usize` coordinates.
    pub(crate) fn get(&self, x: usize, y: usize) -> State {
        self.cells[self.xy_from(x, y)]
    }

    /// Exchange the live buffer with `buf`, which must already be `width * height` long.
    pub(crate) fn swap_cells(&mut self, buf: &mut Vec<State>) {
        debug_assert_eq!(buf.len(), self.cells.len(), "swap buffer has the wrong length");

        std::mem::swap(&mut self.cells, buf);
    }

    fn validate(width: GridCoord, height: GridCoord) -> Result<(usize, usize), GridError> {
        match (usize::try_from(width), usize::try_from(height)) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => Err(GridError::InvalidSize { width, height }),
        }
    }

    fn index(&self, x: GridCoord, y: GridCoord) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;

        (x < self.width && y < self.height).then(|| self.xy_from(x, y))
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Glyphs::default()))
    }
}
