//! Regex patterns for locating `field=value` spans in delimited log lines.

use regex::Regex;
use userdata_common::{Error, Result};

/// Build the pattern matching `field=` followed by the value up to the next
/// separator character (or end of input).
///
/// Every character of `separator` terminates a value. An empty separator makes
/// the value run to the end of the input.
pub fn field_pattern(field: &str, separator: &str) -> Result<Regex> {
    if field.is_empty() {
        return Err(Error::Config("field name must not be empty".to_string()));
    }

    let value = if separator.is_empty() {
        "(?s:.*)".to_string()
    } else {
        let class: String = separator
            .chars()
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        format!("[^{}]*", class)
    };

    let source = format!("{}={}", regex::escape(field), value);
    Regex::new(&source).map_err(|e| Error::Redaction(format!("{}: {}", field, e)))
}

/// Check whether a line carries `field=` anywhere.
pub fn mentions_field(line: &str, field: &str) -> bool {
    !field.is_empty() && line.contains(&format!("{}=", field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_stops_at_separator() {
        let pattern = field_pattern("email", ";").unwrap();
        let m = pattern.find("name=Bob;email=bob@x.com;ssn=1;").unwrap();
        assert_eq!(m.as_str(), "email=bob@x.com");
    }

    #[test]
    fn test_value_runs_to_end_without_separator() {
        let pattern = field_pattern("ssn", ";").unwrap();
        let m = pattern.find("name=Bob;ssn=123-45-6789").unwrap();
        assert_eq!(m.as_str(), "ssn=123-45-6789");
    }

    #[test]
    fn test_empty_value_matches() {
        let pattern = field_pattern("ssn", ";").unwrap();
        let m = pattern.find("ssn=;").unwrap();
        assert_eq!(m.as_str(), "ssn=");
    }

    #[test]
    fn test_requires_equals_after_name() {
        let pattern = field_pattern("name", ";").unwrap();
        assert!(!pattern.is_match("email=name@example.com;"));
        assert!(!pattern.is_match("name: Bob;"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let pattern = field_pattern("a.b", "|").unwrap();
        assert!(!pattern.is_match("axb=1|"));
        let m = pattern.find("a.b=1|c=2").unwrap();
        assert_eq!(m.as_str(), "a.b=1");

        let caret = field_pattern("k", "^]").unwrap();
        assert_eq!(caret.find("k=ab]cd").unwrap().as_str(), "k=ab");
        assert_eq!(caret.find("k=ab^cd").unwrap().as_str(), "k=ab");
    }

    #[test]
    fn test_multi_char_separator() {
        let pattern = field_pattern("phone", ", ").unwrap();
        let m = pattern.find("phone=555-1234, ssn=1").unwrap();
        assert_eq!(m.as_str(), "phone=555-1234");
    }

    #[test]
    fn test_empty_separator_takes_rest() {
        let pattern = field_pattern("password", "").unwrap();
        let m = pattern.find("password=a;b\nc").unwrap();
        assert_eq!(m.as_str(), "password=a;b\nc");
    }

    #[test]
    fn test_empty_field_rejected() {
        assert!(matches!(field_pattern("", ";"), Err(Error::Config(_))));
    }

    #[test]
    fn test_mentions_field() {
        assert!(mentions_field("name=Bob;ssn=;", "ssn"));
        assert!(!mentions_field("name=Bob;", "phone"));
        assert!(!mentions_field("name=Bob;", ""));
    }
}
