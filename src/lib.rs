//! Falling-block puzzle engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tetris_engine::{types, core, driver}` and hosts the
//! pieces shared by the `tetris-headless` binary and the integration tests.

pub use tetris_engine_core as core;
pub use tetris_engine_driver as driver;
pub use tetris_engine_types as types;

pub mod bot;
pub mod cli;
pub mod logging;
