//! Rows of named columns and their rendering as log lines.

use std::io::BufRead;
use tracing::debug;
use userdata_common::{Error, Result};

/// A materialized data source row: column names paired with values, in
/// column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Pair column names with values. The lengths must agree.
    pub fn from_columns<S: AsRef<str>, V: AsRef<str>>(names: &[S], values: &[V]) -> Option<Self> {
        if names.len() != values.len() {
            return None;
        }
        let columns = names
            .iter()
            .zip(values)
            .map(|(n, v)| (n.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Some(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Render as `col=value<sep>` for each column, trailing separator included.
    pub fn to_line(&self, separator: &str) -> String {
        self.columns
            .iter()
            .map(|(name, value)| format!("{}={}{}", name, value, separator))
            .collect()
    }
}

/// Read a delimited table: the first non-empty line names the columns, each
/// following non-empty line holds one row of values.
///
/// An empty separator splits nothing, so every line is a single column.
pub fn read_rows<R: BufRead>(reader: R, separator: &str) -> Result<Vec<Row>> {
    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut cells = split_cells(line, separator);
        match &header {
            None => {
                // Column names are never empty, so a trailing separator ends the header.
                if cells.len() > 1 && cells.last() == Some(&"") {
                    cells.pop();
                }
                header = Some(cells.into_iter().map(str::to_string).collect());
            }
            Some(names) => {
                if cells.len() == names.len() + 1 && cells.last() == Some(&"") {
                    cells.pop();
                }
                let row = Row::from_columns(names, &cells).ok_or_else(|| Error::InvalidRow {
                    line: idx + 1,
                    reason: format!("expected {} values, found {}", names.len(), cells.len()),
                })?;
                rows.push(row);
            }
        }
    }

    debug!("Read {} row(s)", rows.len());
    Ok(rows)
}

fn split_cells<'a>(line: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return vec![line];
    }
    line.split(separator).collect()
}
