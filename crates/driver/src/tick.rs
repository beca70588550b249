//! Gravity clock for an [`EngineHandle`]

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

use tetris_engine_core::PieceSource;
use tetris_engine_types::{GameState, TICK_START_DELAY_MS};

use crate::handle::EngineHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Delay between entering `Playing` and the first tick
    pub start_delay: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(TICK_START_DELAY_MS),
        }
    }
}

/// Aborts the wrapped task when dropped
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Ticks an engine while it is playing.
///
/// A supervisor task follows the snapshot feed. Each time the engine enters a
/// new play session it starts a tick loop bound to that session; when the
/// session ends (pause, reset, game over) the loop is aborted. A loop that
/// somehow outlives its session still cannot tick, because
/// [`EngineHandle::tick_session`] rejects stale sessions under the lock.
///
/// Must be spawned from within a tokio runtime. Dropping the driver stops it.
#[derive(Debug)]
pub struct TickDriver {
    supervisor: JoinHandle<()>,
}

impl TickDriver {
    pub fn spawn<S>(handle: EngineHandle<S>, config: DriverConfig) -> Self
    where
        S: PieceSource + Send + 'static,
    {
        Self {
            supervisor: tokio::spawn(supervise(handle, config)),
        }
    }

    pub fn stop(self) {
        self.supervisor.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.supervisor.is_finished()
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.supervisor.abort();
    }
}

async fn supervise<S>(handle: EngineHandle<S>, config: DriverConfig)
where
    S: PieceSource + Send + 'static,
{
    let mut snapshots = handle.subscribe();
    let mut running: Option<(u64, AbortOnDrop)> = None;

    loop {
        let wanted = {
            let snapshot = snapshots.borrow_and_update();
            (snapshot.state == GameState::Playing).then_some(snapshot.play_session)
        };
        let current = running.as_ref().map(|(session, _)| *session);

        if wanted != current {
            if let Some((session, _loop)) = running.take() {
                debug!(session, "tick loop cancelled");
            }
            if let Some(session) = wanted {
                let task = tokio::spawn(tick_loop(handle.clone(), session, config.start_delay));
                running = Some((session, AbortOnDrop(task)));
            }
        }

        if snapshots.changed().await.is_err() {
            break;
        }
    }
}

async fn tick_loop<S>(handle: EngineHandle<S>, session: u64, start_delay: Duration)
where
    S: PieceSource + Send + 'static,
{
    debug!(session, delay_ms = start_delay.as_millis() as u64, "tick loop started");
    time::sleep(start_delay).await;
    while let Some(interval_ms) = handle.tick_session(session) {
        time::sleep(Duration::from_millis(interval_ms)).await;
    }
    debug!(session, "tick loop finished");
}
