//! Pieces module - tetromino shapes, the active piece, and wall kicks
//!
//! Each kind has four fixed rotation states of exactly four relative cells.
//! Rotation is clockwise only; a blocked rotation retries at three fixed offsets
//! (left, right, up) before giving up.

use crate::board::Board;
use crate::types::{PieceKind, Position, Rgba, Rotation, BOARD_WIDTH};

use serde::{Deserialize, Serialize};

/// Offset of a single mino relative to piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the top-left anchor
pub type PieceShape = [MinoOffset; 4];

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_POSITION: Position = Position::new(BOARD_WIDTH as i8 / 2 - 1, 0);

/// Offsets tried, in order, when a rotation is blocked in place
pub const WALL_KICKS: [MinoOffset; 3] = [(-1, 0), (1, 0), (0, -1)];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece: vertical on even rotations, horizontal on odd
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::R0 | Rotation::R2 => [(0, 0), (0, 1), (0, 2), (0, 3)],
        Rotation::R1 | Rotation::R3 => [(0, 0), (1, 0), (2, 0), (3, 0)],
    }
}

/// O piece (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(0, 0), (1, 0), (0, 1), (1, 1)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::R0 => [(0, 0), (1, 0), (2, 0), (1, 1)],
        Rotation::R1 => [(1, 0), (0, 1), (1, 1), (1, 2)],
        Rotation::R2 => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::R3 => [(0, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::R0 | Rotation::R2 => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::R1 | Rotation::R3 => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::R0 | Rotation::R2 => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::R1 | Rotation::R3 => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::R0 => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::R1 => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::R2 => [(0, 0), (1, 0), (2, 0), (2, 1)],
        Rotation::R3 => [(0, 0), (0, 1), (0, 2), (1, 0)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::R0 => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::R1 => [(0, 0), (1, 0), (1, 1), (1, 2)],
        Rotation::R2 => [(0, 0), (1, 0), (2, 0), (0, 1)],
        Rotation::R3 => [(0, 0), (0, 1), (0, 2), (1, 2)],
    }
}

/// A piece instance: kind, top-left anchor, and rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub position: Position,
    pub rotation: Rotation,
}

impl Piece {
    /// Create a new piece at the spawn anchor in its spawn rotation
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_POSITION)
    }

    /// Create a piece at an explicit anchor
    pub fn at(kind: PieceKind, position: Position) -> Self {
        Self {
            kind,
            position,
            rotation: Rotation::R0,
        }
    }

    /// Relative cells for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells occupied by the piece
    pub fn cells(&self) -> [Position; 4] {
        self.shape().map(|(dx, dy)| self.position.offset(dx, dy))
    }

    pub fn color(&self) -> Rgba {
        self.kind.color()
    }

    /// Whether every cell satisfies the board's occupancy rule
    pub fn is_valid(&self, board: &Board) -> bool {
        board.fits(&self.cells())
    }

    /// Same piece shifted by a delta
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }

    /// Same piece rotated clockwise in place
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}

/// Try to rotate a piece clockwise, falling back to wall kicks
///
/// Returns the rotated (and possibly kicked) piece, or `None` if the rotation fits
/// neither in place nor at any kick offset. The input piece is never modified.
pub fn try_rotate(piece: &Piece, board: &Board) -> Option<Piece> {
    let rotated = piece.rotated();
    if rotated.is_valid(board) {
        return Some(rotated);
    }

    WALL_KICKS
        .iter()
        .map(|&(dx, dy)| rotated.shifted(dx, dy))
        .find(|kicked| kicked.is_valid(board))
}

/// Project a piece straight down to the lowest valid row
///
/// Checks only against the locked board. The result has the same x and rotation.
pub fn drop_position(piece: &Piece, board: &Board) -> Piece {
    let mut landed = *piece;
    loop {
        let next = landed.shifted(0, 1);
        if !next.is_valid(board) {
            return landed;
        }
        landed = next;
    }
}
