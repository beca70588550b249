//! Engine module - the complete game: board, pieces, clock, and score
//!
//! [`TetrisEngine`] owns every piece of mutable state. Front ends call its commands
//! and read state back through getters, [`TetrisEngine::snapshot`], or a subscription.
//! The lifecycle [`GameState`] is the only authority for which commands are accepted:
//! movement, rotation, drops and ticks are silently ignored unless the engine is
//! `Playing`, and an ignored command leaves every field untouched.
//!
//! Every accepted command finishes with a single commit: the display board is
//! rebuilt, the revision counter advances, and subscribers see the new snapshot once.

use std::fmt;

use tracing::{debug, error, info, trace};

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig};
use crate::display::DisplayBoard;
use crate::pieces::{try_rotate, Piece};
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::{apply_line_clear, tick_interval_ms};
use crate::snapshot::{GameSnapshot, LockEvent};
use crate::types::{GameState, Score};

/// Callback invoked with every committed snapshot
pub type Subscriber = Box<dyn FnMut(&GameSnapshot) + Send>;

/// Handle returned by [`TetrisEngine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct TetrisEngine<S: PieceSource = RandomPieces> {
    config: EngineConfig,
    source: S,
    /// Locked cells only
    board: Board,
    /// Locked cells + ghost + active, rebuilt on every commit
    display: DisplayBoard,
    active: Option<Piece>,
    next: Option<Piece>,
    state: GameState,
    score: Score,
    tick_interval_ms: u64,
    /// Bumped once per committed command
    revision: u64,
    /// Bumped every time the state enters `Playing`
    play_session: u64,
    last_lock: Option<LockEvent>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl TetrisEngine<RandomPieces> {
    /// Engine with an entropy-seeded uniform piece source
    pub fn new() -> Self {
        Self::with_source(RandomPieces::from_entropy())
    }

    /// Engine whose piece order is fully determined by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(RandomPieces::new(seed))
    }
}

impl Default for TetrisEngine<RandomPieces> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PieceSource> TetrisEngine<S> {
    pub fn with_source(source: S) -> Self {
        let config = EngineConfig::default();
        Self {
            config,
            source,
            board: Board::new(),
            display: DisplayBoard::empty(),
            active: None,
            next: None,
            state: GameState::Ready,
            score: Score::default(),
            tick_interval_ms: config.initial_tick_ms,
            revision: 0,
            play_session: 0,
            last_lock: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_config(source: S, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self::with_source(source);
        engine.config = config;
        engine.tick_interval_ms = config.initial_tick_ms;
        Ok(engine)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The display board (locked cells + ghost + active piece)
    pub fn board(&self) -> &DisplayBoard {
        &self.display
    }

    /// Locked cells only
    pub fn locked_board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.next
    }

    pub fn active_piece(&self) -> Option<Piece> {
        self.active
    }

    /// Current gravity interval in milliseconds
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn play_session(&self) -> u64 {
        self.play_session
    }

    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    /// Consume the last lock event.
    ///
    /// Taking an event changes the observable state, so it commits like any
    /// other command. Taking when there is nothing to take changes nothing.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        let event = self.last_lock.take()?;
        self.commit();
        Some(event)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.state = self.state;
        out.board.clone_from(&self.display);
        out.score = self.score;
        out.active = self.active;
        out.next = self.next;
        out.tick_interval_ms = self.tick_interval_ms;
        out.revision = self.revision;
        out.play_session = self.play_session;
        out.last_lock = self.last_lock;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            board: self.display.clone(),
            score: self.score,
            active: self.active,
            next: self.next,
            tick_interval_ms: self.tick_interval_ms,
            revision: self.revision,
            play_session: self.play_session,
            last_lock: self.last_lock,
        }
    }

    /// Register a callback that runs after every committed command
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&GameSnapshot) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Start a new round from `Ready`/`GameOver`, or resume from `Paused`
    pub fn start(&mut self) {
        match self.state {
            GameState::Ready | GameState::GameOver => {
                self.clear_round();
                let active = self.spawn();
                let next = self.spawn();
                self.active = Some(active);
                self.next = Some(next);
                self.enter_playing();
                debug!(active = ?active.kind, next = ?next.kind, "round started");
            }
            GameState::Paused => {
                self.enter_playing();
                debug!("resumed");
            }
            GameState::Playing => return,
        }
        self.commit();
    }

    pub fn pause(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        self.state = GameState::Paused;
        debug!(session = self.play_session, "paused");
        self.commit();
    }

    /// Return to `Ready` from any state, discarding the round
    pub fn reset(&mut self) {
        self.clear_round();
        self.state = GameState::Ready;
        debug!("reset");
        self.commit();
    }

    pub fn move_left(&mut self) -> bool {
        self.shift_command(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift_command(1, 0)
    }

    /// Move one row down. Does not lock when blocked; see [`Self::tick`].
    pub fn move_down(&mut self) -> bool {
        self.shift_command(0, 1)
    }

    /// Rotate clockwise, trying wall kicks left, right, then up
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.playing_piece() else {
            return false;
        };
        match try_rotate(&piece, &self.board) {
            Some(rotated) => {
                self.active = Some(rotated);
                self.commit();
                true
            }
            None => false,
        }
    }

    /// Drop to the floor and lock, as one command
    pub fn hard_drop(&mut self) {
        if self.playing_piece().is_none() {
            return;
        }
        let mut rows = 0u32;
        while self.try_move(0, 1) {
            rows += 1;
        }
        trace!(rows, "hard drop");
        self.lock_piece();
        self.commit();
    }

    /// One gravity step: descend, or lock when blocked
    pub fn tick(&mut self) {
        if self.playing_piece().is_none() {
            return;
        }
        if self.try_move(0, 1) {
            trace!("tick: descended");
        } else {
            trace!("tick: locking");
            self.lock_piece();
        }
        self.commit();
    }

    /// The active piece, if commands are accepted right now
    fn playing_piece(&self) -> Option<Piece> {
        if self.state != GameState::Playing {
            return None;
        }
        if self.active.is_none() {
            error!("playing without an active piece");
            debug_assert!(false, "playing without an active piece");
        }
        self.active
    }

    fn shift_command(&mut self, dx: i8, dy: i8) -> bool {
        if self.playing_piece().is_none() {
            return false;
        }
        let moved = self.try_move(dx, dy);
        if moved {
            self.commit();
        }
        moved
    }

    /// Shift the active piece if the result is valid; never leaves partial state
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shifted(dx, dy);
        if !moved.is_valid(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    fn spawn(&mut self) -> Piece {
        Piece::new(self.source.next_kind())
    }

    /// Commit the active piece, clear lines, score, and promote the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock_cells(&piece.cells(), piece.color());

        let lines_cleared = self.board.clear_lines();
        let mut points = 0;
        if lines_cleared > 0 {
            let (score, awarded) = apply_line_clear(self.score, lines_cleared);
            points = awarded;
            self.score = score;
            self.tick_interval_ms = tick_interval_ms(
                self.config.initial_tick_ms,
                self.config.speed_decay,
                score.level,
            );
            info!(
                lines = lines_cleared,
                points,
                total = score.score,
                level = score.level,
                interval_ms = self.tick_interval_ms,
                "lines cleared"
            );
        }

        let promoted = match self.next.take() {
            Some(next) => next,
            None => self.spawn(),
        };
        let next = self.spawn();
        self.next = Some(next);
        self.active = Some(promoted);

        let topped_out = !promoted.is_valid(&self.board);
        if topped_out {
            self.state = GameState::GameOver;
            info!(
                score = self.score.score,
                lines = self.score.lines,
                level = self.score.level,
                "game over"
            );
        }

        self.last_lock = Some(LockEvent {
            lines_cleared: lines_cleared as u32,
            points,
            topped_out,
        });
    }

    fn enter_playing(&mut self) {
        self.state = GameState::Playing;
        self.play_session += 1;
    }

    fn clear_round(&mut self) {
        self.board.clear();
        self.score = Score::default();
        self.tick_interval_ms = self.config.initial_tick_ms;
        self.active = None;
        self.next = None;
        self.last_lock = None;
    }

    fn commit(&mut self) {
        self.display = DisplayBoard::compose(
            &self.board,
            self.active.as_ref(),
            self.state == GameState::Playing,
        );
        self.revision += 1;

        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&snapshot);
        }
    }
}

impl<S: PieceSource> fmt::Debug for TetrisEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TetrisEngine")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .field("revision", &self.revision)
            .field("play_session", &self.play_session)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
