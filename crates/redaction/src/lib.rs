//! Redaction of personal data from log lines.
//!
//! Lines are `key=value` pairs joined by a separator. The value of every
//! sensitive field is replaced with a fixed token before the line is written.

pub mod formatter;
pub mod logger;
pub mod patterns;
pub mod record;
pub mod redactor;
pub mod row;

pub use formatter::{FormatterConfig, RedactingFormatter, DEFAULT_PREFIX};
pub use logger::{get_logger, Logger, USER_DATA_LOGGER};
pub use record::{Level, LogRecord};
pub use redactor::{filter_datum, RedactionResult, RedactionStats, Redactor, RedactorConfig};
pub use row::{read_rows, Row};

/// Fields treated as personally identifiable, in redaction order.
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Default placeholder for redacted values.
pub const REDACTION: &str = "***";

/// Default field separator.
pub const SEPARATOR: &str = ";";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pii_fields_order() {
        assert_eq!(PII_FIELDS, ["name", "email", "phone", "ssn", "password"]);
    }

    #[test]
    fn test_filter_with_defaults() {
        let out = filter_datum(
            &PII_FIELDS,
            REDACTION,
            "name=Bob;email=b@x;phone=1;ssn=2;password=3;ip=::1;",
            SEPARATOR,
        )
        .unwrap();
        assert_eq!(
            out,
            "name=***;email=***;phone=***;ssn=***;password=***;ip=::1;"
        );
    }
}
