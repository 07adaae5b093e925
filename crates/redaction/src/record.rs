//! Log records and severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use userdata_common::{Error, Timestamp};

/// Severity of a log record, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

/// A single message on its way to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Name of the emitting logger.
    pub name: String,
    pub level: Level,
    /// Raw, unredacted message.
    pub message: String,
    pub created: Timestamp,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            message: message.into(),
            created: Timestamp::now(),
        }
    }

    /// Replace the creation time.
    pub fn at(mut self, created: Timestamp) -> Self {
        self.created = created;
        self
    }
}
