//! Shared, serialized access to one engine

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::trace;

use tetris_engine_core::{GameSnapshot, PieceSource, RandomPieces, TetrisEngine};
use tetris_engine_types::GameState;

/// Cloneable handle to an engine behind a mutex
///
/// Every command takes the lock for its whole duration, so commands from the
/// tick driver and from input handlers are applied one at a time and observers
/// never see a half-applied command. Committed snapshots are also published on
/// a `tokio::sync::watch` channel; see [`EngineHandle::subscribe`].
pub struct EngineHandle<S: PieceSource = RandomPieces> {
    engine: Arc<Mutex<TetrisEngine<S>>>,
    snapshots: watch::Receiver<GameSnapshot>,
}

impl<S: PieceSource> Clone for EngineHandle<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            snapshots: self.snapshots.clone(),
        }
    }
}

impl<S> EngineHandle<S>
where
    S: PieceSource + Send + 'static,
{
    pub fn new(mut engine: TetrisEngine<S>) -> Self {
        let (tx, rx) = watch::channel(engine.snapshot());
        engine.subscribe(move |snapshot| {
            tx.send_replace(snapshot.clone());
        });
        Self {
            engine: Arc::new(Mutex::new(engine)),
            snapshots: rx,
        }
    }

    pub fn start(&self) {
        self.engine.lock().start();
    }

    pub fn pause(&self) {
        self.engine.lock().pause();
    }

    pub fn reset(&self) {
        self.engine.lock().reset();
    }

    pub fn move_left(&self) -> bool {
        self.engine.lock().move_left()
    }

    pub fn move_right(&self) -> bool {
        self.engine.lock().move_right()
    }

    pub fn move_down(&self) -> bool {
        self.engine.lock().move_down()
    }

    pub fn rotate(&self) -> bool {
        self.engine.lock().rotate()
    }

    pub fn hard_drop(&self) {
        self.engine.lock().hard_drop();
    }

    pub fn tick(&self) {
        self.engine.lock().tick();
    }

    /// Tick only if the engine is still playing in `session`.
    ///
    /// Returns the interval to wait before the next tick, or `None` when the
    /// caller's session is over (paused, reset, restarted, or topped out).
    /// The check and the tick happen under one lock acquisition, so a tick can
    /// never land after the command that ended its session.
    pub fn tick_session(&self, session: u64) -> Option<u64> {
        let mut engine = self.engine.lock();
        if engine.state() != GameState::Playing || engine.play_session() != session {
            trace!(session, current = engine.play_session(), "stale tick dropped");
            return None;
        }
        engine.tick();
        if engine.state() != GameState::Playing {
            return None;
        }
        Some(engine.tick_interval_ms())
    }

    /// Fresh snapshot taken under the lock
    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.lock().snapshot()
    }

    /// Latest published snapshot, without taking the engine lock
    pub fn latest(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Latest-value feed of committed snapshots
    ///
    /// Slow receivers skip intermediate revisions; the current value is always
    /// the most recent commit.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Run `f` with exclusive access to the engine.
    ///
    /// Callbacks registered through `engine.subscribe` run while this lock is
    /// held and must not call back into the handle.
    pub fn with<R>(&self, f: impl FnOnce(&mut TetrisEngine<S>) -> R) -> R {
        f(&mut self.engine.lock())
    }
}

impl<S: PieceSource> fmt::Debug for EngineHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let latest = self.snapshots.borrow();
        f.debug_struct("EngineHandle")
            .field("state", &latest.state)
            .field("revision", &latest.revision)
            .field("play_session", &latest.play_session)
            .finish()
    }
}
