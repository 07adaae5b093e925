//! userdata - Log user data rows with personal fields redacted, and hash or
//! check passwords.

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use userdata_password::DEFAULT_COST;
use userdata_redaction::{Level, DEFAULT_PREFIX, REDACTION, SEPARATOR, USER_DATA_LOGGER};

#[derive(Parser)]
#[command(name = "userdata")]
#[command(
    author,
    version,
    about = "Redact personal data from log lines and manage password digests"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that redacts.
#[derive(Args, Debug, Clone)]
pub struct RedactionArgs {
    /// Fields to redact, comma separated (defaults to name,email,phone,ssn,password)
    #[arg(long, env = "USER_DATA_FIELDS", value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Replacement for redacted values
    #[arg(long, env = "USER_DATA_REDACTION", default_value = REDACTION)]
    pub redaction: String,

    /// Field separator
    #[arg(long, env = "USER_DATA_SEPARATOR", default_value = SEPARATOR)]
    pub separator: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a delimited table and log every row with personal fields redacted
    Filter {
        /// Input table (first line holds column names); "-" reads stdin
        #[arg(long, short = 'i', default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        redaction: RedactionArgs,

        /// Logger name shown in each line
        #[arg(long, env = "USER_DATA_LOGGER", default_value = USER_DATA_LOGGER)]
        logger_name: String,

        /// Prefix shown in brackets at the start of each line
        #[arg(long, env = "USER_DATA_PREFIX", default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// Minimum level written by the logger
        #[arg(long, env = "USER_DATA_LEVEL", default_value = "INFO")]
        level: Level,
    },

    /// Redact a single line, or each line of stdin, without the log preamble
    Redact {
        /// Line to redact; stdin is read when omitted
        #[arg(long, short)]
        message: Option<String>,

        #[command(flatten)]
        redaction: RedactionArgs,
    },

    /// Hash a password with a fresh salt
    Hash {
        /// Password to hash; read from stdin when omitted
        #[arg(long, env = "USER_DATA_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// bcrypt cost factor (4-31)
        #[arg(long, default_value_t = DEFAULT_COST)]
        cost: u32,
    },

    /// Check a password against a digest
    Verify {
        /// Digest produced by `hash`
        #[arg(long)]
        digest: String,

        /// Password to check; read from stdin when omitted
        #[arg(long, env = "USER_DATA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Filter {
            input,
            redaction,
            logger_name,
            prefix,
            level,
        } => {
            let options = commands::FilterOptions {
                input,
                redaction,
                logger_name,
                prefix,
                level,
            };
            commands::filter(&options)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Redact { message, redaction } => {
            commands::redact(message.as_deref(), &redaction)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Hash { password, cost } => {
            commands::hash(password, cost)?;
            Ok(ExitCode::SUCCESS)
        }

        // 0 valid, 1 invalid, 2 could not verify
        Commands::Verify { digest, password } => match commands::verify(&digest, password) {
            Ok(true) => Ok(ExitCode::SUCCESS),
            Ok(false) => Ok(ExitCode::from(1)),
            Err(e) => {
                error!("{:#}", e);
                Ok(ExitCode::from(2))
            }
        },
    }
}
