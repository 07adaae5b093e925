//! An explicitly constructed logger that writes redacted lines to a sink.

use crate::formatter::RedactingFormatter;
use crate::record::{Level, LogRecord};
use std::io::Write;
use userdata_common::Result;

/// Name of the logger used for user data rows.
pub const USER_DATA_LOGGER: &str = "user_data";

/// Writes formatted records at or above a threshold to its sink.
pub struct Logger<W: Write> {
    name: String,
    level: Level,
    formatter: RedactingFormatter,
    sink: W,
}

impl<W: Write> Logger<W> {
    pub fn new(name: impl Into<String>, level: Level, formatter: RedactingFormatter, sink: W) -> Self {
        Self {
            name: name.into(),
            level,
            formatter,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Log a message. Returns whether a line was written.
    pub fn log(&mut self, level: Level, message: &str) -> Result<bool> {
        if !self.is_enabled(level) {
            return Ok(false);
        }
        let record = LogRecord::new(self.name.clone(), level, message);
        self.emit(&record)?;
        Ok(true)
    }

    /// Format and write an existing record, ignoring the threshold.
    pub fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.formatter.format(record);
        writeln!(self.sink, "{}", line)?;
        self.sink.flush()?;
        Ok(())
    }

    pub fn debug(&mut self, message: &str) -> Result<bool> {
        self.log(Level::Debug, message)
    }

    pub fn info(&mut self, message: &str) -> Result<bool> {
        self.log(Level::Info, message)
    }

    pub fn warning(&mut self, message: &str) -> Result<bool> {
        self.log(Level::Warning, message)
    }

    pub fn error(&mut self, message: &str) -> Result<bool> {
        self.log(Level::Error, message)
    }

    /// Consume the logger and hand back its sink.
    pub fn into_sink(self) -> W {
        self.sink
    }
}

/// Build the `user_data` logger: `INFO` threshold, full PII redaction.
pub fn get_logger<W: Write>(sink: W) -> Result<Logger<W>> {
    Ok(Logger::new(
        USER_DATA_LOGGER,
        Level::Info,
        RedactingFormatter::for_pii()?,
        sink,
    ))
}
