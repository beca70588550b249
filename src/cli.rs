//! Command-line and environment configuration for `tetris-headless`.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::warn;

use tetris_engine_core::EngineConfig;
use tetris_engine_driver::DriverConfig;

pub const USAGE: &str = "\
usage: tetris-headless [autoplay|realtime] [options]

modes:
  autoplay            play piece by piece without a clock (default)
  realtime            run the tick driver; a bot nudges the falling piece

options:
  --seed <u64>            piece and bot seed (env TETRIS_SEED)
  --tick-ms <ms>          level-1 gravity interval (env TETRIS_INITIAL_TICK_MS)
  --start-delay-ms <ms>   delay before the first tick (env TETRIS_START_DELAY_MS)
  --max-pieces <n>        autoplay: stop after n pieces
  --json                  autoplay: print one JSON snapshot per lock
  --duration-ms <ms>      realtime: stop after this long (default 30000)";

pub const DEFAULT_DURATION_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Autoplay,
    Realtime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mode: Mode,
    pub seed: Option<u64>,
    pub engine: EngineConfig,
    pub driver: DriverConfig,
    pub max_pieces: Option<u32>,
    pub json: bool,
    pub duration: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Autoplay,
            seed: None,
            engine: EngineConfig::default(),
            driver: DriverConfig::default(),
            max_pieces: None,
            json: false,
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
        }
    }
}

impl RunConfig {
    /// Defaults overridden by `TETRIS_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RunConfig::from_env`], reading variables through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(seed) = parse_var(&lookup, "TETRIS_SEED") {
            config.seed = Some(seed);
        }
        if let Some(ms) = parse_var(&lookup, "TETRIS_INITIAL_TICK_MS") {
            config.engine.initial_tick_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "TETRIS_START_DELAY_MS") {
            config.driver.start_delay = Duration::from_millis(ms);
        }
        config
    }
}

fn parse_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = raw, "ignoring invalid environment value");
            None
        }
    }
}

/// Apply command-line arguments (without the program name) on top of `base`
pub fn parse_args(args: &[String], base: RunConfig) -> Result<RunConfig> {
    let mut config = base;
    let mut rest = args;

    match args.first().map(String::as_str) {
        Some("autoplay") => {
            config.mode = Mode::Autoplay;
            rest = &args[1..];
        }
        Some("realtime") => {
            config.mode = Mode::Realtime;
            rest = &args[1..];
        }
        _ => {}
    }

    let mut i = 0usize;
    while i < rest.len() {
        match rest[i].as_str() {
            "--seed" => {
                i += 1;
                config.seed = Some(flag_value(rest, i, "--seed")?);
            }
            "--tick-ms" => {
                i += 1;
                config.engine.initial_tick_ms = flag_value(rest, i, "--tick-ms")?;
            }
            "--start-delay-ms" => {
                i += 1;
                let ms: u64 = flag_value(rest, i, "--start-delay-ms")?;
                config.driver.start_delay = Duration::from_millis(ms);
            }
            "--max-pieces" => {
                i += 1;
                config.max_pieces = Some(flag_value(rest, i, "--max-pieces")?);
            }
            "--duration-ms" => {
                i += 1;
                let ms: u64 = flag_value(rest, i, "--duration-ms")?;
                config.duration = Duration::from_millis(ms);
            }
            "--json" => config.json = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    config.engine.validate().context("invalid engine configuration")?;
    Ok(config)
}

fn flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T> {
    let v = args.get(i).ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>().map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_autoplay() {
        let cfg = parse_args(&[], RunConfig::default()).unwrap();
        assert_eq!(cfg, RunConfig::default());
        assert_eq!(cfg.mode, Mode::Autoplay);
    }

    #[test]
    fn parses_realtime_flags() {
        let cfg = parse_args(
            &args(&["realtime", "--seed", "42", "--duration-ms", "500", "--start-delay-ms", "0"]),
            RunConfig::default(),
        )
        .unwrap();
        assert_eq!(cfg.mode, Mode::Realtime);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.duration, Duration::from_millis(500));
        assert_eq!(cfg.driver.start_delay, Duration::ZERO);
    }

    #[test]
    fn flags_without_mode_keep_autoplay() {
        let cfg = parse_args(&args(&["--json", "--max-pieces", "7"]), RunConfig::default())
            .unwrap();
        assert_eq!(cfg.mode, Mode::Autoplay);
        assert!(cfg.json);
        assert_eq!(cfg.max_pieces, Some(7));
    }

    #[test]
    fn rejects_bad_input() {
        let err = parse_args(&args(&["--seed"]), RunConfig::default()).unwrap_err();
        assert!(err.to_string().contains("missing value for --seed"));

        let err = parse_args(&args(&["--seed", "x"]), RunConfig::default()).unwrap_err();
        assert!(err.to_string().contains("invalid --seed value"));

        let err = parse_args(&args(&["--bogus"]), RunConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unknown argument"));

        let err = parse_args(&args(&["--tick-ms", "0"]), RunConfig::default()).unwrap_err();
        assert!(err.to_string().contains("invalid engine configuration"));
    }

    #[test]
    fn env_lookup_overrides_defaults() {
        let cfg = RunConfig::from_lookup(|key| match key {
            "TETRIS_SEED" => Some("9".to_string()),
            "TETRIS_INITIAL_TICK_MS" => Some("500".to_string()),
            "TETRIS_START_DELAY_MS" => Some("not-a-number".to_string()),
            _ => None,
        });
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.engine.initial_tick_ms, 500);
        assert_eq!(cfg.driver.start_delay, DriverConfig::default().start_delay);
    }

    #[test]
    fn flags_override_env() {
        let base = RunConfig::from_lookup(|key| (key == "TETRIS_SEED").then(|| "1".to_string()));
        let cfg = parse_args(&args(&["--seed", "2"]), base).unwrap();
        assert_eq!(cfg.seed, Some(2));
    }
}
