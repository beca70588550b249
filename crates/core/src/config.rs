//! Engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{INITIAL_TICK_MS, SPEED_DECAY};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial tick interval must be positive")]
    ZeroTickInterval,
    #[error("speed decay must be in (0, 1], got {0}")]
    InvalidSpeedDecay(f64),
}

/// Tunables for the game clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Gravity interval at level 1, in milliseconds
    pub initial_tick_ms: u64,
    /// Per-level multiplier on the interval
    pub speed_decay: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_tick_ms: INITIAL_TICK_MS,
            speed_decay: SPEED_DECAY,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if !(self.speed_decay > 0.0 && self.speed_decay <= 1.0) {
            return Err(ConfigError::InvalidSpeedDecay(self.speed_decay));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let zero = EngineConfig {
            initial_tick_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroTickInterval));

        for decay in [0.0, -0.5, 1.5, f64::NAN] {
            let cfg = EngineConfig {
                speed_decay: decay,
                ..EngineConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidSpeedDecay(_))
            ));
        }
    }
}
