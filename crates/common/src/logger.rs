use crate::error::StudyGenError;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const LOG_FILE_NAME: &str = "studygen.log";

/// Parse a configured log level name
pub fn parse_log_level(level: &str) -> Result<Level, StudyGenError> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(StudyGenError::config(format!(
            "Invalid log level '{}' (expected trace, debug, info, warn or error)",
            other
        ))),
    }
}

/// `RUST_LOG` when set, otherwise the configured level
fn build_filter(log_level: &str) -> Result<EnvFilter, StudyGenError> {
    let level = parse_log_level(log_level)?;
    let fallback = LevelFilter::from_level(level);
    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(fallback.into())))
}

/// Log to stderr and to `studygen.log` under `log_dir`
///
/// Stdout stays reserved for generated notes and quiz output.
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<(), StudyGenError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        StudyGenError::config(format!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            StudyGenError::config(format!(
                "Failed to open log file {}: {}",
                log_file_path.display(),
                e
            ))
        })?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(build_filter(log_level)?);

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(build_filter(log_level)?);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| StudyGenError::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!("Logging to {}", log_file_path.display());
    Ok(())
}

/// Log to stderr only
pub fn setup_console_logging(log_level: &str) -> Result<(), StudyGenError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(build_filter(log_level)?)
        .try_init()
        .map_err(|e| StudyGenError::config(format!("Failed to initialize logging: {}", e)))
}
