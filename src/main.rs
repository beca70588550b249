//! Headless runner.
//!
//! `autoplay` drives the engine synchronously, one bot-placed piece at a time.
//! `realtime` runs the tokio tick driver and lets the bot nudge pieces while
//! gravity does the rest.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::time;
use tracing::info;

use tetris_engine::bot::Bot;
use tetris_engine::cli::{parse_args, Mode, RunConfig, USAGE};
use tetris_engine::core::{RandomPieces, TetrisEngine};
use tetris_engine::driver::{EngineHandle, TickDriver};
use tetris_engine::logging::init_tracing_default;
use tetris_engine::types::GameState;

const NUDGE_INTERVAL: Duration = Duration::from_millis(120);

fn main() -> Result<()> {
    init_tracing_default();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(());
    }

    let config = parse_args(&args, RunConfig::from_env())?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, mode = ?config.mode, "starting");

    match config.mode {
        Mode::Autoplay => run_autoplay(&config, seed),
        Mode::Realtime => run_realtime(&config, seed),
    }
}

fn bot_seed(seed: u64) -> u64 {
    seed ^ 0x9E37_79B9_7F4A_7C15
}

fn run_autoplay(config: &RunConfig, seed: u64) -> Result<()> {
    let mut engine = TetrisEngine::with_config(RandomPieces::new(seed), config.engine)
        .context("failed to build engine")?;
    let mut bot = Bot::new(bot_seed(seed));
    let mut out = io::stdout().lock();

    engine.start();
    let mut pieces = 0u32;
    while engine.state() == GameState::Playing {
        if config.max_pieces.is_some_and(|max| pieces >= max) {
            break;
        }
        bot.play_piece(&mut engine);
        pieces += 1;

        if config.json && engine.last_lock().is_some() {
            serde_json::to_writer(&mut out, &engine.snapshot())
                .context("failed to serialize snapshot")?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    let score = engine.score();
    info!(
        pieces,
        score = score.score,
        lines = score.lines,
        level = score.level,
        state = engine.state().as_str(),
        "autoplay finished"
    );
    Ok(())
}

fn run_realtime(config: &RunConfig, seed: u64) -> Result<()> {
    let rt = Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(async {
        let engine = TetrisEngine::with_config(RandomPieces::new(seed), config.engine)
            .context("failed to build engine")?;
        let handle = EngineHandle::new(engine);
        let driver = TickDriver::spawn(handle.clone(), config.driver);
        let mut feed = handle.subscribe();
        let mut bot = Bot::new(bot_seed(seed));

        handle.start();

        let deadline = time::sleep(config.duration);
        tokio::pin!(deadline);
        let mut nudge = time::interval(NUDGE_INTERVAL);

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    info!(duration_ms = config.duration.as_millis() as u64, "time limit reached");
                    break;
                }
                _ = nudge.tick() => {
                    handle.with(|engine| bot.step(engine));
                }
                changed = feed.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if feed.borrow_and_update().state == GameState::GameOver {
                        break;
                    }
                }
            }
        }

        driver.stop();
        let snapshot = handle.snapshot();
        info!(
            score = snapshot.score.score,
            lines = snapshot.score.lines,
            level = snapshot.score.level,
            state = snapshot.state.as_str(),
            revision = snapshot.revision,
            "realtime finished"
        );
        Ok::<(), anyhow::Error>(())
    })
}
