//! Host integration for the engine
//!
//! The core engine has no clock and no locking. This crate supplies both for
//! hosts running on tokio:
//!
//! - [`EngineHandle`]: a cloneable handle that serializes every command through
//!   one mutex and publishes committed snapshots on a `watch` channel
//! - [`TickDriver`]: the gravity clock, bound to the engine's play session
//!
//! ```no_run
//! use tetris_engine_core::TetrisEngine;
//! use tetris_engine_driver::{DriverConfig, EngineHandle, TickDriver};
//!
//! # async fn run() {
//! let handle = EngineHandle::new(TetrisEngine::with_seed(7));
//! let _driver = TickDriver::spawn(handle.clone(), DriverConfig::default());
//! handle.start();
//!
//! let mut feed = handle.subscribe();
//! while feed.changed().await.is_ok() {
//!     let snapshot = feed.borrow_and_update().clone();
//!     if !snapshot.playable() {
//!         break;
//!     }
//! }
//! # }
//! ```

pub mod handle;
pub mod tick;

pub use handle::EngineHandle;
pub use tick::{DriverConfig, TickDriver};
