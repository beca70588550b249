//! Piece tests - shape table, rotation cycle, kicks, and drop projection

use std::collections::HashSet;

use tetris_engine::core::{drop_position, get_shape, try_rotate, Board, Piece, SPAWN_POSITION};
use tetris_engine::types::{Cell, PieceKind, Position, Rgba, Rotation, BOARD_HEIGHT};

const ROTATIONS: [Rotation; 4] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

#[test]
fn test_every_state_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let shape = get_shape(kind, rotation);
            let unique: HashSet<_> = shape.iter().collect();
            assert_eq!(unique.len(), 4, "{:?} {:?}", kind, rotation);
            assert!(shape.iter().all(|&(dx, dy)| dx >= 0 && dy >= 0));
        }
    }
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        let full_turn = piece.rotated().rotated().rotated().rotated();
        assert_eq!(full_turn, piece);
        assert_eq!(full_turn.cells(), piece.cells());
    }
}

#[test]
fn test_two_state_pieces_repeat() {
    for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
        assert_eq!(get_shape(kind, Rotation::R0), get_shape(kind, Rotation::R2));
        assert_eq!(get_shape(kind, Rotation::R1), get_shape(kind, Rotation::R3));
    }
    for rotation in ROTATIONS {
        assert_eq!(get_shape(PieceKind::O, rotation), get_shape(PieceKind::O, Rotation::R0));
    }
}

#[test]
fn test_i_spawns_vertical() {
    let cells = Piece::new(PieceKind::I).cells();
    assert_eq!(
        cells,
        [
            Position::new(4, 0),
            Position::new(4, 1),
            Position::new(4, 2),
            Position::new(4, 3),
        ]
    );
}

#[test]
fn test_every_kind_spawns_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!(piece.position, SPAWN_POSITION);
        assert_eq!(piece.rotation, Rotation::R0);
        assert!(piece.is_valid(&board), "{:?}", kind);
    }
}

#[test]
fn test_rotation_blocked_everywhere() {
    let board = Board::new();
    // Vertical I against the right wall: horizontal needs four columns.
    let piece = Piece::at(PieceKind::I, Position::new(9, 5));
    assert!(piece.is_valid(&board));
    assert_eq!(try_rotate(&piece, &board), None);
}

#[test]
fn test_rotation_uses_first_fitting_kick() {
    let board = Board::new();
    // Vertical I at x = 7: horizontal spans 7..=10; one step left fits.
    let piece = Piece::at(PieceKind::I, Position::new(7, 5));
    let rotated = try_rotate(&piece, &board).unwrap();
    assert_eq!(rotated.rotation, Rotation::R1);
    assert_eq!(rotated.position, Position::new(6, 5));
}

#[test]
fn test_drop_position_stops_on_stack() {
    let mut board = Board::new();
    board.set(4, 12, Cell::filled(Rgba::new(1, 2, 3, 255)));

    let piece = Piece::new(PieceKind::O);
    let landed = drop_position(&piece, &board);
    assert_eq!(landed.position, Position::new(4, 10));
    assert_eq!(landed.rotation, piece.rotation);

    // Already resting: projection is the piece itself.
    assert_eq!(drop_position(&landed, &board), landed);

    let free = Piece::at(PieceKind::O, Position::new(0, 0));
    assert_eq!(
        drop_position(&free, &board).position.y,
        BOARD_HEIGHT as i8 - 2
    );
}
