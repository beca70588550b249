//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every game rule and all mutable game state. It has **no
//! dependencies** on rendering, input devices, timers, or I/O, which makes it:
//!
//! - **Deterministic**: a seeded [`RandomPieces`] (or a [`SequencePieces`]) replays
//!   the same game for the same command stream
//! - **Host-agnostic**: a 2D canvas, a terminal, or a 3D scene drive it identically
//! - **Testable**: every rule is exercised without a clock
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, collision rule, and line clearing
//! - [`pieces`]: tetromino shapes, the active [`Piece`], wall kicks, drop projection
//! - [`rng`]: piece sources (uniform random, fixed sequence)
//! - [`scoring`]: line-clear points, levels, and the speed curve
//! - [`display`]: the display board (locked + ghost + active)
//! - [`engine`]: [`TetrisEngine`], the state machine tying it all together
//! - [`snapshot`]: immutable snapshots handed to observers
//! - [`config`]: clock tunables
//!
//! # Game Rules
//!
//! - **Spawn**: uniform random kind at (4, 0), rotation 0
//! - **Rotation**: clockwise only; blocked rotations retry shifted left, right, then up
//! - **Gravity**: each tick moves the piece down one row, locking it when blocked
//! - **Ghost Piece**: shows where the current piece would land (while playing)
//! - **Scoring**: 100/300/500/800 for 1-4 lines, times the current level
//! - **Levels**: one per 10 lines; the tick interval shrinks by 0.8x per level
//!
//! # Example
//!
//! ```
//! use tetris_engine_core::{SequencePieces, TetrisEngine};
//! use tetris_engine_core::types::{GameState, PieceKind};
//!
//! let mut engine = TetrisEngine::with_source(SequencePieces::repeat(PieceKind::O));
//! engine.start();
//! assert_eq!(engine.state(), GameState::Playing);
//!
//! assert!(engine.move_left());
//! engine.hard_drop();
//! assert_eq!(engine.locked_board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! The engine owns no clock. A host calls [`TetrisEngine::tick`] every
//! [`TetrisEngine::tick_interval_ms`] milliseconds while the state is `Playing`;
//! the `tetris-engine-driver` crate provides a tokio driver that does exactly that.

pub mod board;
pub mod config;
pub mod display;
pub mod engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_engine_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::{ConfigError, EngineConfig};
pub use display::{DisplayBoard, DisplayCell, Layer};
pub use engine::{Subscriber, SubscriptionId, TetrisEngine};
pub use pieces::{drop_position, get_shape, try_rotate, Piece, SPAWN_POSITION, WALL_KICKS};
pub use rng::{PieceSource, PieceSourceError, RandomPieces, SequencePieces};
pub use scoring::{calculate_line_score, level_for_lines, tick_interval_ms};
pub use snapshot::{GameSnapshot, LockEvent};
