//! Logging configuration.
//!
//! Resolved in order, later sources winning:
//! 1. `RUST_LOG` (most verbose level named in any directive)
//! 2. `NBS_LOG` level and `NBS_LOG_FORMAT`
//! 3. `-v`/`-q` and `--log-format`

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

pub const ENV_LOG_LEVEL: &str = "NBS_LOG";
pub const ENV_LOG_FORMAT: &str = "NBS_LOG_FORMAT";

/// Where log lines go and how they look. Always stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Console lines, ANSI colors on a terminal
    #[default]
    Human,
    /// One JSON object per event
    Jsonl,
}

/// Minimum severity that is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

fn parse_enum<T: ValueEnum>(value: &str) -> Option<T> {
    T::from_str(value.trim(), true).ok()
}

/// Most verbose level named by a `RUST_LOG` value such as
/// `warn,nbs_core=debug`. Directives without a level are ignored.
fn level_from_rust_log(value: &str) -> Option<LogLevel> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            parse_enum::<LogLevel>(level)
        })
        .min_by_key(|level| *level as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
}

impl LogConfig {
    /// Build from the process environment, then apply CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// [`LogConfig::from_env`] with an explicit variable lookup.
    /// Unparseable values are ignored.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let env_level = lookup(ENV_LOG_LEVEL)
            .and_then(|v| parse_enum(&v))
            .or_else(|| lookup("RUST_LOG").and_then(|v| level_from_rust_log(&v)));
        let env_format = lookup(ENV_LOG_FORMAT).and_then(|v| parse_enum(&v));

        LogConfig {
            level: cli_level.or(env_level).unwrap_or_default(),
            format: cli_format.or(env_format).unwrap_or_default(),
        }
    }
}
