//! Command implementations.

use crate::RedactionArgs;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use userdata_password::{Digest, PasswordHasher};
use userdata_redaction::{
    read_rows, FormatterConfig, Level, Logger, RedactingFormatter, Redactor, RedactorConfig,
    PII_FIELDS,
};

/// Options for the `filter` command.
pub struct FilterOptions {
    pub input: PathBuf,
    pub redaction: RedactionArgs,
    pub logger_name: String,
    pub prefix: String,
    pub level: Level,
}

impl RedactionArgs {
    fn to_config(&self) -> RedactorConfig {
        let fields: Vec<String> = match &self.fields {
            Some(fields) => fields
                .iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            None => PII_FIELDS.iter().map(|f| f.to_string()).collect(),
        };
        if fields.is_empty() {
            warn!("No fields to redact; lines pass through unchanged");
        }
        RedactorConfig {
            fields,
            redaction: self.redaction.clone(),
            separator: self.separator.clone(),
        }
    }
}

/// Log every row of the input table through a redacting logger on stdout.
pub fn filter(options: &FilterOptions) -> Result<()> {
    let reader = open_input(&options.input)?;
    let rows = read_rows(reader, &options.redaction.separator)
        .with_context(|| format!("Failed to read rows from {:?}", options.input))?;

    let formatter = RedactingFormatter::with_config(FormatterConfig {
        prefix: options.prefix.clone(),
        redactor: options.redaction.to_config(),
    })?;
    debug!("Redacting fields: {}", formatter.fields().join(","));

    let stdout = io::stdout();
    let mut logger = Logger::new(
        options.logger_name.clone(),
        options.level,
        formatter,
        stdout.lock(),
    );

    let mut written = 0;
    for row in &rows {
        if logger.info(&row.to_line(&options.redaction.separator))? {
            written += 1;
        }
    }

    info!("Logged {} of {} row(s)", written, rows.len());
    Ok(())
}

/// Redact one message, or each line of stdin, and print the result.
pub fn redact(message: Option<&str>, args: &RedactionArgs) -> Result<()> {
    let redactor = Redactor::with_config(args.to_config())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match message {
        Some(message) => {
            writeln!(out, "{}", redactor.redact(message).content)?;
        }
        None => {
            let mut total = 0;
            for line in io::stdin().lock().lines() {
                let result = redactor.redact(&line.context("Failed to read stdin")?);
                total += result.stats.total();
                writeln!(out, "{}", result.content)?;
            }
            debug!("Redacted {} value(s) from stdin", total);
        }
    }

    Ok(())
}

/// Print a fresh digest for a password.
pub fn hash(password: Option<String>, cost: u32) -> Result<()> {
    let password = resolve_password(password)?;
    let digest = PasswordHasher::with_cost(cost).hash(&password)?;
    println!("{}", digest);
    Ok(())
}

/// Print whether the password matches the digest.
pub fn verify(digest: &str, password: Option<String>) -> Result<bool> {
    let password = resolve_password(password)?;
    let digest: Digest = digest.parse()?;
    let valid = PasswordHasher::new()
        .verify(&digest, &password)
        .context("Cannot verify password")?;
    println!("{}", if valid { "valid" } else { "invalid" });
    Ok(valid)
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    Ok(Box::new(BufReader::new(file)))
}

fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("No password given");
    }
    Ok(password)
}
