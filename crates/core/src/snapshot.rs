//! Snapshot module - immutable views handed to observers
//!
//! A snapshot captures one committed revision; two snapshots with the same
//! revision from the same engine are always equal.

use serde::{Deserialize, Serialize};

use crate::display::DisplayBoard;
use crate::pieces::Piece;
use crate::types::{GameState, Score};

/// Outcome of the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    /// The piece promoted after this lock did not fit; the round ended
    pub topped_out: bool,
}

/// Everything an observer may read, captured at one committed revision
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub board: DisplayBoard,
    pub score: Score,
    pub active: Option<Piece>,
    pub next: Option<Piece>,
    pub tick_interval_ms: u64,
    pub revision: u64,
    pub play_session: u64,
    pub last_lock: Option<LockEvent>,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.state == GameState::Playing
    }
}
