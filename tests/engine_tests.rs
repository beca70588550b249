//! Engine lifecycle tests through the facade

use std::sync::{Arc, Mutex};

use tetris_engine::core::{Layer, SequencePieces, TetrisEngine};
use tetris_engine::types::{GameState, PieceKind, Rgba, Score, BOARD_WIDTH, GHOST_ALPHA_THRESHOLD};

fn engine(kinds: &[PieceKind]) -> TetrisEngine<SequencePieces> {
    TetrisEngine::with_source(SequencePieces::new(kinds.to_vec()).unwrap())
}

#[test]
fn test_full_round_lifecycle() {
    let mut engine = engine(&[PieceKind::T, PieceKind::I]);
    assert_eq!(engine.state(), GameState::Ready);

    engine.start();
    assert_eq!(engine.state(), GameState::Playing);
    assert_eq!(engine.active_piece().unwrap().kind, PieceKind::T);
    assert_eq!(engine.next_piece().unwrap().kind, PieceKind::I);

    engine.pause();
    assert_eq!(engine.state(), GameState::Paused);
    assert!(!engine.move_left());

    engine.start();
    assert_eq!(engine.state(), GameState::Playing);

    engine.hard_drop();
    assert_eq!(engine.active_piece().unwrap().kind, PieceKind::I);
    assert_eq!(engine.locked_board().filled_count(), 4);

    engine.reset();
    assert_eq!(engine.state(), GameState::Ready);
    assert_eq!(engine.score(), Score::default());
    assert_eq!(engine.board().filled_count(), 0);
    assert_eq!(engine.active_piece(), None);
    assert_eq!(engine.next_piece(), None);
}

#[test]
fn test_sequence_continues_across_rounds() {
    let mut engine = engine(&[PieceKind::T, PieceKind::I, PieceKind::O]);
    engine.start();
    engine.reset();
    engine.start();
    // The source is not rewound by reset.
    assert_eq!(engine.active_piece().unwrap().kind, PieceKind::O);
    assert_eq!(engine.next_piece().unwrap().kind, PieceKind::T);
}

#[test]
fn test_i_pieces_clear_a_tetris() {
    // Five vertical I pieces standing in columns 0,2,4,6,8 plus five in 1,3,5,7,9
    // fill the bottom four rows exactly.
    let mut engine = engine(&[PieceKind::I]);
    engine.start();

    for column in 0..BOARD_WIDTH as i8 {
        let piece = engine.active_piece().unwrap();
        let dx = column - piece.position.x;
        for _ in 0..dx.abs() {
            let moved = if dx < 0 {
                engine.move_left()
            } else {
                engine.move_right()
            };
            assert!(moved);
        }
        engine.hard_drop();
    }

    let score = engine.score();
    assert_eq!(score.lines, 4);
    assert_eq!(score.score, 800);
    assert_eq!(score.level, 1);
    assert_eq!(engine.locked_board().filled_count(), 0);
    let lock = engine.last_lock().unwrap();
    assert_eq!(lock.lines_cleared, 4);
    assert_eq!(lock.points, 800);
    assert!(!lock.topped_out);
}

#[test]
fn test_ghost_is_translucent_active_color() {
    let mut engine = engine(&[PieceKind::L]);
    engine.start();

    let board = engine.board();
    let ghost: Vec<_> = board
        .rows()
        .iter()
        .flatten()
        .filter(|c| c.layer == Layer::Ghost)
        .collect();
    assert_eq!(ghost.len(), 4);
    for cell in ghost {
        assert!(cell.filled);
        assert!(cell.color.a <= GHOST_ALPHA_THRESHOLD);
        assert_eq!(cell.color.with_alpha(255), PieceKind::L.color());
    }
    let active = board
        .rows()
        .iter()
        .flatten()
        .filter(|c| c.layer == Layer::Active)
        .all(|c| c.color == PieceKind::L.color() && c.color.a == 255);
    assert!(active);
}

#[test]
fn test_game_over_freezes_everything() {
    let mut engine = engine(&[PieceKind::O]);
    engine.start();
    for _ in 0..10 {
        engine.hard_drop();
    }
    assert_eq!(engine.state(), GameState::GameOver);
    assert!(engine.last_lock().unwrap().topped_out);

    // The blocked spawn stays visible; no ghost outside PLAYING.
    assert_eq!(engine.board().count(Layer::Active), 4);
    assert_eq!(engine.board().count(Layer::Ghost), 0);

    let frozen = engine.snapshot();
    engine.move_left();
    engine.move_right();
    engine.move_down();
    engine.rotate();
    engine.hard_drop();
    engine.tick();
    engine.pause();
    assert_eq!(engine.snapshot(), frozen);

    engine.start();
    assert_eq!(engine.state(), GameState::Playing);
    assert_eq!(engine.locked_board().filled_count(), 0);
    assert_eq!(engine.score(), Score::default());
}

#[test]
fn test_subscriber_sees_each_commit_once() {
    let mut engine = engine(&[PieceKind::T]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    engine.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.state));

    engine.start();
    engine.move_left();
    engine.pause();
    engine.move_left(); // ignored
    engine.reset();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            GameState::Playing,
            GameState::Playing,
            GameState::Paused,
            GameState::Ready
        ]
    );
}

#[test]
fn test_snapshot_json_shape() {
    let mut engine = engine(&[PieceKind::S]);
    engine.start();
    let json = serde_json::to_value(engine.snapshot()).unwrap();

    assert_eq!(json["state"], "PLAYING");
    assert_eq!(json["score"]["level"], 1);
    assert_eq!(json["active"]["kind"], "s");
    assert_eq!(json["tick_interval_ms"], 800);
    assert_eq!(json["play_session"], 1);
    assert!(json["last_lock"].is_null());

    let back: tetris_engine::core::GameSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, engine.snapshot());
}

#[test]
fn test_locked_color_survives_in_display() {
    let mut engine = engine(&[PieceKind::Z]);
    engine.start();
    engine.hard_drop();
    let locked: Vec<Rgba> = engine
        .board()
        .rows()
        .iter()
        .flatten()
        .filter(|c| c.layer == Layer::Locked)
        .map(|c| c.color)
        .collect();
    assert_eq!(locked, vec![PieceKind::Z.color(); 4]);
}
