//! Placement bot used by the headless runner.
//!
//! Picks a rotation count and target column for the active piece by scoring
//! every landing spot on a copy of the locked board, then plays it through the
//! engine's ordinary commands. Wall kicks or a blocked path can make the actual
//! landing differ from the plan; the bot does not care.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tetris_engine_core::types::{GameState, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
use tetris_engine_core::{drop_position, Board, Piece, PieceSource, TetrisEngine};

const W_HEIGHT: f64 = -0.51;
const W_LINES: f64 = 0.76;
const W_HOLES: f64 = -0.36;
const W_BUMP: f64 = -0.18;

/// Chance of ignoring the evaluation and picking a random landing spot
const EXPLORE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    /// Clockwise rotations to apply
    pub rotations: u8,
    /// Target x of the piece origin
    pub target_x: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Rotated,
    Shifted,
    /// Plan done or blocked; the piece is soft-dropped
    Dropped,
    /// Nothing to do (not playing)
    Idle,
}

#[derive(Debug)]
pub struct Bot {
    rng: StdRng,
    current: Option<Plan>,
}

impl Bot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            current: None,
        }
    }

    /// Choose a landing spot for the active piece
    pub fn plan<S: PieceSource>(&mut self, engine: &TetrisEngine<S>) -> Option<Plan> {
        if engine.state() != GameState::Playing {
            return None;
        }
        let active = engine.active_piece()?;

        if self.rng.gen_bool(EXPLORE) {
            return Some(Plan {
                rotations: self.rng.gen_range(0..4),
                target_x: self.rng.gen_range(0..BOARD_WIDTH as i8),
            });
        }

        let board = engine.locked_board();
        let mut best: Option<(f64, Plan)> = None;
        for rotations in 0..4u8 {
            let rotation = Rotation::from_index(active.rotation.index() + rotations as usize);
            for x in -3..BOARD_WIDTH as i8 {
                let candidate = Piece {
                    position: active.position.offset(x - active.position.x, 0),
                    rotation,
                    ..active
                };
                if !candidate.is_valid(board) {
                    continue;
                }
                let score = evaluate(board, &drop_position(&candidate, board));
                let plan = Plan {
                    rotations,
                    target_x: x,
                };
                if best.map_or(true, |(s, _)| score > s) {
                    best = Some((score, plan));
                }
            }
        }
        best.map(|(_, plan)| plan)
    }

    /// Play one whole piece: rotate, shift, hard drop
    pub fn play_piece<S: PieceSource>(&mut self, engine: &mut TetrisEngine<S>) {
        let Some(plan) = self.plan(engine) else {
            return;
        };
        for _ in 0..plan.rotations {
            if !engine.rotate() {
                break;
            }
        }
        shift_towards(engine, plan.target_x, usize::MAX);
        engine.hard_drop();
    }

    /// Apply a single input towards the current plan.
    ///
    /// Used when a clock drives gravity: the bot rotates, then shifts one
    /// column per call, then soft-drops until the piece locks.
    pub fn step<S: PieceSource>(&mut self, engine: &mut TetrisEngine<S>) -> Step {
        if engine.take_last_lock().is_some() {
            self.current = None;
        }
        if self.current.is_none() {
            self.current = self.plan(engine);
        }
        let Some(plan) = self.current.as_mut() else {
            return Step::Idle;
        };

        if plan.rotations > 0 {
            plan.rotations -= 1;
            if engine.rotate() {
                return Step::Rotated;
            }
            plan.rotations = 0;
        }
        if shift_towards(engine, plan.target_x, 1) > 0 {
            return Step::Shifted;
        }
        engine.move_down();
        Step::Dropped
    }
}

/// Shift the active piece towards `target_x`, at most `max_moves` columns.
/// Returns the number of successful moves.
fn shift_towards<S: PieceSource>(
    engine: &mut TetrisEngine<S>,
    target_x: i8,
    max_moves: usize,
) -> usize {
    let mut moves = 0;
    while moves < max_moves {
        let Some(active) = engine.active_piece() else {
            break;
        };
        let moved = match active.position.x.cmp(&target_x) {
            std::cmp::Ordering::Less => engine.move_right(),
            std::cmp::Ordering::Greater => engine.move_left(),
            std::cmp::Ordering::Equal => false,
        };
        if !moved {
            break;
        }
        moves += 1;
    }
    moves
}

fn evaluate(board: &Board, landed: &Piece) -> f64 {
    let mut after = board.clone();
    after.lock_cells(&landed.cells(), landed.color());
    let lines = after.clear_lines() as f64;

    let mut heights = [0i32; BOARD_WIDTH as usize];
    let mut holes = 0i32;
    for (x, height) in heights.iter_mut().enumerate() {
        let mut seen = false;
        for y in 0..BOARD_HEIGHT as i8 {
            if after.is_occupied(x as i8, y) {
                if !seen {
                    *height = BOARD_HEIGHT as i32 - y as i32;
                    seen = true;
                }
            } else if seen {
                holes += 1;
            }
        }
    }
    let aggregate: i32 = heights.iter().sum();
    let bumpiness: i32 = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();

    W_HEIGHT * aggregate as f64
        + W_LINES * lines
        + W_HOLES * holes as f64
        + W_BUMP * bumpiness as f64
}
