//! Logging settings for demoted close failures
//!
//! A close error that cannot be returned to the caller is logged instead. The
//! level of that record is the only runtime knob the library has; it can be
//! deserialized from a host application's config or read from
//! `CLOSER_LOG_LEVEL`.

use crate::constants::CLOSER_LOG_LEVEL_VAR;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Level at which a demoted close failure is emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(Error::configuration(format!(
                "unknown close log level '{other}', expected one of error, warn, info, debug"
            ))),
        }
    }
}

/// Settings for the close reconciler
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level used when a close error is logged instead of returned
    pub log_level: LogLevel,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(CLOSER_LOG_LEVEL_VAR) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => LogLevel::default(),
        };
        Ok(Self { log_level })
    }

    #[must_use]
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }
}
