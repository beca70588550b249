//! Board module - the grid of locked cells
//!
//! The board is a fixed 10x20 grid holding only *locked* blocks; the active piece
//! and its ghost live elsewhere and are composed on top by [`crate::display`].
//! Uses a flat array for cache locality and zero allocation on the hot paths.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Cell, Position, Rgba, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one clear pass, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.filled)
    }

    /// Whether a piece cell may sit at (x, y)
    ///
    /// Columns must be in range and rows must be above the floor. Rows above the
    /// visible board (y < 0) skip the occupancy check so pieces can spawn partially
    /// hidden.
    #[inline]
    pub fn can_occupy(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Whether every given absolute cell may be occupied
    pub fn fits(&self, cells: &[Position]) -> bool {
        cells.iter().all(|p| self.can_occupy(p.x, p.y))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.filled)
    }

    /// Write absolute cells as filled with `color`
    ///
    /// Cells outside the board (including rows above the top) are clipped.
    pub fn lock_cells(&mut self, cells: &[Position], color: Rgba) {
        for p in cells {
            self.set(p.x, p.y, Cell::filled(color));
        }
    }

    /// Remove every full row in a single pass
    ///
    /// Rows are scanned bottom to top; surviving rows are compacted toward the
    /// bottom and fresh empty rows appear at the top. Returns the removed row
    /// indices (bottom to top). An empty result means the board was not touched.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        for y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(y) {
                cleared_rows.push(y);
            }
        }
        if cleared_rows.is_empty() {
            return cleared_rows;
        }

        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if cleared_rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells.copy_within(src_start..src_start + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = Cell::EMPTY;
        }

        cleared_rows
    }

    /// Clear full rows and return how many were removed
    pub fn clear_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.filled).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::EMPTY;
        }
    }

    /// Fill a whole row with `color`
    pub fn fill_row(&mut self, y: i8, color: Rgba) {
        for x in 0..BOARD_WIDTH as i8 {
            self.set(x, y, Cell::filled(color));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
