//! Engine configuration and environment loader.
use std::env;
use std::time::Duration;

use thiserror::Error;

use battle_core::DEFAULT_LOG_CAPACITY;

/// Settings the engine cannot run with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Timing, buffering and randomness settings for a [`crate::BattleEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Fixed countdown step every skill timer sleeps between decrements.
    pub tick_ms: u64,
    /// How long the hit flag stays raised after damage lands.
    pub hit_flash_ms: u64,
    /// How long the healed flag stays raised after a heal.
    pub heal_flash_ms: u64,
    pub log_capacity: usize,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Seed for damage and crit rolls. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            hit_flash_ms: 150,
            heal_flash_ms: 250,
            log_capacity: DEFAULT_LOG_CAPACITY,
            command_buffer_size: 32,
            event_buffer_size: 100,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_TICK_MS` - Timer countdown step (default: 100)
    /// - `BATTLE_HIT_FLASH_MS` - Hit flash window (default: 150)
    /// - `BATTLE_HEAL_FLASH_MS` - Heal flash window (default: 250)
    /// - `BATTLE_LOG_CAPACITY` - Log lines kept (default: 60)
    /// - `BATTLE_COMMAND_BUFFER` - Worker command queue size (default: 32)
    /// - `BATTLE_EVENT_BUFFER` - Per-topic event buffer (default: 100)
    /// - `BATTLE_SEED` - Fixed RNG seed (default: entropy)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(tick) = read_env::<u64>("BATTLE_TICK_MS") {
            config.tick_ms = tick.max(1);
        }
        if let Some(ms) = read_env::<u64>("BATTLE_HIT_FLASH_MS") {
            config.hit_flash_ms = ms;
        }
        if let Some(ms) = read_env::<u64>("BATTLE_HEAL_FLASH_MS") {
            config.heal_flash_ms = ms;
        }
        if let Some(capacity) = read_env::<usize>("BATTLE_LOG_CAPACITY") {
            config.log_capacity = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("BATTLE_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("BATTLE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        config.seed = read_env::<u64>("BATTLE_SEED");

        config
    }

    /// Rejects values tokio or the timer loop cannot work with.
    ///
    /// A zero tick never advances any countdown, and a zero-sized channel
    /// cannot be created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("tick_ms", self.tick_ms),
            ("log_capacity", self.log_capacity as u64),
            ("command_buffer_size", self.command_buffer_size as u64),
            ("event_buffer_size", self.event_buffer_size as u64),
        ];
        match fields.into_iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ConfigError::Zero { field }),
            None => Ok(()),
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn hit_flash(&self) -> Duration {
        Duration::from_millis(self.hit_flash_ms)
    }

    pub fn heal_flash(&self) -> Duration {
        Duration::from_millis(self.heal_flash_ms)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = EngineConfig {
            tick_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Zero { field: "tick_ms" })
        );

        let config = EngineConfig {
            command_buffer_size: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Zero {
                field: "command_buffer_size"
            })
        );
    }
}
