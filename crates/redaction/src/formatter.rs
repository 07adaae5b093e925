//! Log line formatting with field redaction.

use crate::record::LogRecord;
use crate::redactor::{Redactor, RedactorConfig};
use crate::PII_FIELDS;
use userdata_common::Result;

/// Prefix shown at the start of every formatted line.
pub const DEFAULT_PREFIX: &str = "HOLBERTON";

/// Configuration for the formatter.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Text placed inside the leading brackets.
    pub prefix: String,
    pub redactor: RedactorConfig,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            redactor: RedactorConfig::default(),
        }
    }
}

/// Formats records as `[PREFIX] <name> <LEVEL> <asctime>: <message>`, with
/// sensitive field values in the message replaced.
pub struct RedactingFormatter {
    prefix: String,
    redactor: Redactor,
}

impl RedactingFormatter {
    /// Create a formatter redacting `fields` with the default token and separator.
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        let redactor = RedactorConfig {
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
            ..Default::default()
        };
        Self::with_config(FormatterConfig {
            redactor,
            ..Default::default()
        })
    }

    /// Create a formatter for the full PII field set.
    pub fn for_pii() -> Result<Self> {
        Self::new(&PII_FIELDS)
    }

    pub fn with_config(config: FormatterConfig) -> Result<Self> {
        Ok(Self {
            prefix: config.prefix,
            redactor: Redactor::with_config(config.redactor)?,
        })
    }

    pub fn fields(&self) -> &[String] {
        &self.redactor.config().fields
    }

    /// Format a record. Only the message is redacted; the preamble is kept as is.
    pub fn format(&self, record: &LogRecord) -> String {
        let message = self.redactor.redact(&record.message).content;
        format!(
            "[{}] {} {} {}: {}",
            self.prefix,
            record.name,
            record.level,
            record.created.to_asctime(),
            message
        )
    }
}
