//! Field redaction over delimited `key=value` lines.

use crate::patterns::{field_pattern, mentions_field};
use crate::{PII_FIELDS, REDACTION, SEPARATOR};
use regex::{NoExpand, Regex};
use tracing::{debug, trace};
use userdata_common::Result;

/// Configuration for the redactor.
#[derive(Debug, Clone)]
pub struct RedactorConfig {
    /// Field names to redact, applied in order.
    pub fields: Vec<String>,
    /// Text written in place of each redacted value.
    pub redaction: String,
    /// Characters that end a field value.
    pub separator: String,
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            fields: PII_FIELDS.iter().map(|f| f.to_string()).collect(),
            redaction: REDACTION.to_string(),
            separator: SEPARATOR.to_string(),
        }
    }
}

/// Result of redaction.
#[derive(Debug)]
pub struct RedactionResult {
    /// The redacted content.
    pub content: String,
    /// Statistics about what was redacted.
    pub stats: RedactionStats,
}

/// Statistics about redactions performed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RedactionStats {
    /// Replaced spans per field, in field order. Fields with no match are omitted.
    pub fields: Vec<(String, usize)>,
    /// Total value characters removed.
    pub total_chars_redacted: usize,
}

impl RedactionStats {
    /// Total number of redactions.
    pub fn total(&self) -> usize {
        self.fields.iter().map(|(_, n)| n).sum()
    }

    /// Number of spans replaced for one field.
    pub fn count_for(&self, field: &str) -> usize {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Merge with another stats.
    pub fn merge(&mut self, other: &RedactionStats) {
        for (field, count) in &other.fields {
            match self.fields.iter_mut().find(|(name, _)| name == field) {
                Some((_, n)) => *n += count,
                None => self.fields.push((field.clone(), *count)),
            }
        }
        self.total_chars_redacted += other.total_chars_redacted;
    }
}

struct FieldRule {
    field: String,
    pattern: Regex,
    replacement: String,
}

/// Replaces the value of every listed field with a fixed token.
///
/// Fields are applied one after another, each on the output of the previous
/// one, so overlapping field names resolve in list order.
pub struct Redactor {
    config: RedactorConfig,
    rules: Vec<FieldRule>,
}

impl Redactor {
    /// Create a redactor for the PII field set.
    pub fn new() -> Result<Self> {
        Self::with_config(RedactorConfig::default())
    }

    /// Create a new redactor with custom configuration.
    pub fn with_config(config: RedactorConfig) -> Result<Self> {
        let rules = config
            .fields
            .iter()
            .map(|field| {
                Ok(FieldRule {
                    field: field.clone(),
                    pattern: field_pattern(field, &config.separator)?,
                    replacement: format!("{}={}", field, config.redaction),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { config, rules })
    }

    pub fn config(&self) -> &RedactorConfig {
        &self.config
    }

    /// Redact configured fields from a line.
    pub fn redact(&self, message: &str) -> RedactionResult {
        let mut stats = RedactionStats::default();
        let mut result = message.to_string();

        for rule in &self.rules {
            if !mentions_field(&result, &rule.field) {
                trace!("Field {} not present", rule.field);
                continue;
            }

            let mut count = 0;
            for mat in rule.pattern.find_iter(&result) {
                count += 1;
                let value = &mat.as_str()[rule.field.len() + 1..];
                stats.total_chars_redacted += value.chars().count();
            }

            result = rule
                .pattern
                .replace_all(&result, NoExpand(&rule.replacement))
                .into_owned();
            stats.fields.push((rule.field.clone(), count));
        }

        if stats.total() > 0 {
            debug!(
                "Redacted {} value(s) across {} field(s)",
                stats.total(),
                stats.fields.len()
            );
        }

        RedactionResult {
            content: result,
            stats,
        }
    }
}

/// Redact `fields` from `message`, replacing each value with `redaction`.
///
/// A value runs from just after `field=` to the next separator character or
/// the end of the message. Fields missing from the message are skipped.
pub fn filter_datum<S: AsRef<str>>(
    fields: &[S],
    redaction: &str,
    message: &str,
    separator: &str,
) -> Result<String> {
    let config = RedactorConfig {
        fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        redaction: redaction.to_string(),
        separator: separator.to_string(),
    };
    Ok(Redactor::with_config(config)?.redact(message).content)
}
