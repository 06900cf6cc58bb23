use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use service_logger::config::validate_config;
use service_logger::{ConfigError, LoggerBuilder, LoggerConfig, Meta};

#[derive(Parser)]
#[command(name = "logger-cli")]
#[command(about = "Send a single log record through a configured service logger", long_about = None)]
struct Cli {
    /// Service name attached to the record
    #[arg(short, long, env = "SERVICE_NAME", default_value = "logger-cli")]
    service: String,

    /// Syslog endpoint (host:port); empty for local output only
    #[arg(short, long, env = "REMOTE_LOGGING_URL", default_value = "")]
    remote: String,

    /// Environment tag; "development" prints human-readable lines to stderr
    #[arg(short, long, env = "ENVIRONMENT", default_value = "production")]
    environment: String,

    /// TOML file with a logger config; replaces the three options above
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit a debug record
    Debug(Record),
    /// Emit an info record
    Info(Record),
    /// Emit a warn record
    Warn(Record),
    /// Emit an error record
    Error {
        #[command(flatten)]
        record: Record,

        /// Error text for the record's error field
        #[arg(long)]
        error: Option<String>,
    },
}

#[derive(Args)]
struct Record {
    /// Log message
    message: String,

    /// Metadata entry as key=value; repeatable
    #[arg(short, long = "meta", value_parser = parse_meta_entry)]
    meta: Vec<(String, Value)>,
}

impl Record {
    fn meta(&self) -> Option<Meta> {
        if self.meta.is_empty() {
            None
        } else {
            Some(self.meta.iter().cloned().collect())
        }
    }
}

/// Error value built from `--error` text.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct CliError(String);

fn parse_meta_entry(entry: &str) -> Result<(String, Value), String> {
    let (key, raw) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {entry:?}"))?;
    if key.is_empty() {
        return Err(format!("empty key in {entry:?}"));
    }
    Ok((key.to_string(), parse_scalar(raw)))
}

fn parse_scalar(raw: &str) -> Value {
    if let Ok(flag) = raw.parse::<bool>() {
        return Value::from(flag);
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    match raw.parse::<f64>() {
        Ok(float) if float.is_finite() => Value::from(float),
        _ => Value::from(raw),
    }
}

/// Load and validate a logger config from a TOML file.
fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: LoggerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (builder, remote_requested) = match &cli.config {
        Some(path) => {
            let config = load_config(path)?;
            let requested = !config.remote_address.is_empty();
            (LoggerBuilder::from_config(&config), requested)
        }
        None => (
            LoggerBuilder::new(cli.service.as_str())
                .remote_address(cli.remote.as_str())
                .environment(cli.environment.as_str())
                .with_process_env(),
            !cli.remote.is_empty(),
        ),
    };
    let logger = builder.build();

    match cli.command {
        Commands::Debug(record) => logger.debug(&record.message, record.meta().as_ref()),
        Commands::Info(record) => logger.info(&record.message, record.meta().as_ref()),
        Commands::Warn(record) => logger.warn(&record.message, record.meta().as_ref()),
        Commands::Error { record, error } => {
            let error = error.map(CliError);
            logger.error(
                &record.message,
                error.as_ref().map(|e| e as &(dyn std::error::Error + 'static)),
                record.meta().as_ref(),
            );
        }
    }

    if remote_requested && !logger.has_remote() {
        return Err("remote endpoint unavailable, record was logged locally only".into());
    }

    Ok(())
}
