//! Display board - locked cells, ghost projection, and active piece in one grid
//!
//! The display board is derived state: it is rebuilt from the locked [`Board`] and
//! the active [`Piece`] after every committed command and is never written back.
//! Ghost cells carry the active color at alpha 0.3 *and* an explicit [`Layer::Ghost`]
//! tag, so renderers may key off either.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::pieces::{drop_position, Piece};
use crate::types::{Cell, Rgba, BOARD_HEIGHT, BOARD_WIDTH, GHOST_ALPHA};

/// What put a display cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Empty,
    Locked,
    Ghost,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DisplayCell {
    pub filled: bool,
    pub color: Rgba,
    pub layer: Layer,
}

impl DisplayCell {
    pub const EMPTY: DisplayCell = DisplayCell {
        filled: false,
        color: Rgba::TRANSPARENT,
        layer: Layer::Empty,
    };

    fn locked(cell: Cell) -> Self {
        if !cell.filled {
            return Self::EMPTY;
        }
        Self {
            filled: true,
            color: cell.color,
            layer: Layer::Locked,
        }
    }

    pub fn is_ghost(&self) -> bool {
        self.layer == Layer::Ghost
    }

    /// The plain cell value, as a consumer without layer awareness sees it
    pub fn as_cell(&self) -> Cell {
        Cell {
            filled: self.filled,
            color: self.color,
        }
    }
}

pub type DisplayGrid = [[DisplayCell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Board-shaped view of everything a renderer needs to draw
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayBoard {
    rows: DisplayGrid,
}

impl DisplayBoard {
    pub fn empty() -> Self {
        Self {
            rows: [[DisplayCell::EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
        }
    }

    /// Compose locked cells, the optional ghost, and the optional active piece
    ///
    /// The ghost is only projected when `show_ghost` is set and it lands strictly
    /// below the active piece. Ghost cells never cover locked cells; active cells
    /// cover everything. Cells above the visible board are clipped.
    pub fn compose(board: &Board, active: Option<&Piece>, show_ghost: bool) -> Self {
        let mut out = Self::empty();
        for (y, row) in board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                out.rows[y][x] = DisplayCell::locked(*cell);
            }
        }

        let Some(active) = active else {
            return out;
        };

        if show_ghost {
            let ghost = drop_position(active, board);
            if ghost.position.y > active.position.y {
                let color = active.color().with_alpha(GHOST_ALPHA);
                for p in ghost.cells() {
                    if let Some(slot) = out.slot_mut(p.x, p.y) {
                        if !slot.filled {
                            *slot = DisplayCell {
                                filled: true,
                                color,
                                layer: Layer::Ghost,
                            };
                        }
                    }
                }
            }
        }

        let color = active.color();
        for p in active.cells() {
            if let Some(slot) = out.slot_mut(p.x, p.y) {
                *slot = DisplayCell {
                    filled: true,
                    color,
                    layer: Layer::Active,
                };
            }
        }

        out
    }

    fn slot_mut(&mut self, x: i8, y: i8) -> Option<&mut DisplayCell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
    }

    pub fn get(&self, x: i8, y: i8) -> Option<DisplayCell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    pub fn rows(&self) -> &DisplayGrid {
        &self.rows
    }

    /// Count cells on a given layer
    pub fn count(&self, layer: Layer) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| c.layer == layer)
            .count()
    }

    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.filled).count()
    }
}

impl Default for DisplayBoard {
    fn default() -> Self {
        Self::empty()
    }
}
