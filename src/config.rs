//! Run configuration: defaults, then environment, then command-line flags.

use std::env;

use anyhow::{anyhow, Result};

use crate::engine::SessionConfig;
use crate::input::{InputConfig, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
use crate::types::{REPEAT_DELAY_MS, REPEAT_RATE_MS};

pub const DEFAULT_FRAME_MS: u32 = crate::engine::DEFAULT_FRAME_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Fixed supply seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub repeat_delay_ms: u32,
    pub repeat_rate_ms: u32,
    pub frame_ms: u32,
    pub key_release_timeout_ms: u32,
    /// JSON-lines event log target; `None` disables logging.
    pub event_log_path: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            repeat_delay_ms: REPEAT_DELAY_MS,
            repeat_rate_ms: REPEAT_RATE_MS,
            frame_ms: DEFAULT_FRAME_MS,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            event_log_path: None,
        }
    }
}

impl RunConfig {
    /// Read `TETRIS_*` environment variables. Unparsable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RunConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let num = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let frame_ms = match num("TETRIS_FRAME_MS", defaults.frame_ms) {
            0 => defaults.frame_ms,
            ms => ms,
        };

        Self {
            seed: lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok()),
            repeat_delay_ms: num("TETRIS_REPEAT_DELAY_MS", defaults.repeat_delay_ms),
            repeat_rate_ms: num("TETRIS_REPEAT_RATE_MS", defaults.repeat_rate_ms),
            frame_ms,
            key_release_timeout_ms: num("TETRIS_KEY_RELEASE_MS", defaults.key_release_timeout_ms),
            event_log_path: lookup("TETRIS_EVENT_LOG_PATH")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Overlay command-line flags (program name already stripped).
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut it = args.iter();
        while let Some(flag) = it.next() {
            let mut value = || {
                it.next()
                    .ok_or_else(|| anyhow!("args: missing value for {}", flag))
            };
            match flag.as_str() {
                "--seed" => self.seed = Some(parse_num(flag, value()?)?),
                "--repeat-delay" => self.repeat_delay_ms = parse_num(flag, value()?)?,
                "--repeat-rate" => self.repeat_rate_ms = parse_num(flag, value()?)?,
                "--frame-ms" => {
                    let ms: u32 = parse_num(flag, value()?)?;
                    if ms == 0 {
                        return Err(anyhow!("args: --frame-ms must be greater than 0"));
                    }
                    self.frame_ms = ms;
                }
                "--event-log" => self.event_log_path = Some(value()?.clone()),
                other => return Err(anyhow!("args: unknown argument: {}", other)),
            }
        }
        Ok(self)
    }

    pub fn input(&self) -> InputConfig {
        InputConfig {
            repeat_delay_ms: self.repeat_delay_ms,
            repeat_rate_ms: self.repeat_rate_ms,
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            frame_ms: self.frame_ms,
            input: self.input(),
        }
    }
}

fn parse_num<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("args: invalid {} value: {}", flag, value))
}
