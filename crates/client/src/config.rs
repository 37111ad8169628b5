//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use battle_runtime::EngineConfig;

/// How the observer prints what it sees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Log lines with a health summary.
    #[default]
    Text,
    /// One JSON object per combat event.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub engine: EngineConfig,
    /// Battles to run before exiting; the engine is reset between them.
    pub rounds: u32,
    pub format: OutputFormat,
    /// Directory for a log file in addition to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            rounds: 1,
            format: OutputFormat::default(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables (plus everything [`EngineConfig::from_env`] reads):
    /// - `BATTLE_ROUNDS` - Battles to run (default: 1)
    /// - `BATTLE_OUTPUT` - `text` or `json` (default: text)
    /// - `BATTLE_LOG_DIR` - Also write logs to `<dir>/arena.log`
    pub fn from_env() -> Self {
        let mut config = Self {
            engine: EngineConfig::from_env(),
            ..Self::default()
        };

        if let Some(rounds) = read_env::<u32>("BATTLE_ROUNDS") {
            config.rounds = rounds.max(1);
        }
        if let Some(format) = read_env::<OutputFormat>("BATTLE_OUTPUT") {
            config.format = format;
        }
        config.log_dir = env::var("BATTLE_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
