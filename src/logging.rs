//! Structured logging and tracing for pos-energy
//!
//! Console output plus an optional daily-rolling log file, both built on the
//! tracing ecosystem. Components log through a [`StructuredLogger`] so every
//! line carries the component that produced it.

use crate::config::LoggingConfig;
use crate::error::{EnergyError, Result};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Once;
use tracing::{Level, debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Set to skip the rolling file appender entirely
pub const DISABLE_FILE_LOG_ENV: &str = "POS_ENERGY_DISABLE_FILE_LOG";

// Keep the non-blocking worker guard alive for the entire process lifetime
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();
static INIT_ONCE: Once = Once::new();
static INIT_ERROR: OnceCell<String> = OnceCell::new();

/// Initialize logging system based on configuration
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    INIT_ONCE.call_once(|| {
        let init_result = (|| -> Result<()> {
            let level = parse_log_level(&config.level)?;
            let filter = build_env_filter(level);

            if should_use_console_only() {
                init_console_only_logging(filter, config.json_format, level);
                return Ok(());
            }

            init_file_logging(config, filter, level)
        })();

        if let Err(e) = init_result {
            let _ = INIT_ERROR.set(e.to_string());
        }
    });

    if let Some(err) = INIT_ERROR.get() {
        return Err(EnergyError::config(err.clone()));
    }
    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("pos_energy={},tower_http=info,reqwest=warn", level).into()
    })
}

fn should_use_console_only() -> bool {
    cfg!(test) || std::env::var_os(DISABLE_FILE_LOG_ENV).is_some()
}

fn console_layer<S>(json_format: bool, level: Level) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a> + 'static,
{
    let base = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);
    if json_format {
        base.json()
            .with_filter(LevelFilter::from_level(level))
            .boxed()
    } else {
        base.with_filter(LevelFilter::from_level(level)).boxed()
    }
}

fn init_console_only_logging(filter: EnvFilter, json_format: bool, level: Level) {
    // A subscriber may already be installed by the host (tests, embedding apps)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer(json_format, level))
        .try_init();

    info!("Logging initialized - level: {:?}, console-only", level);
}

fn init_file_logging(config: &LoggingConfig, filter: EnvFilter, level: Level) -> Result<()> {
    let file_appender = rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix("pos-energy")
        .filename_suffix("log")
        .max_log_files(config.backup_count.max(1) as usize)
        .build(log_directory(&config.file))
        .map_err(|e| EnergyError::io(format!("Failed to create log file appender: {}", e)))?;

    let (non_blocking_appender, guard) = non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    let file_layer = {
        let base = fmt::layer()
            .with_writer(non_blocking_appender)
            .with_ansi(false)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false);
        if config.json_format {
            base.json()
                .with_filter(LevelFilter::from_level(level))
                .boxed()
        } else {
            base.with_filter(LevelFilter::from_level(level)).boxed()
        }
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);
    let installed = if config.console_output {
        subscriber
            .with(console_layer(config.json_format, level))
            .try_init()
    } else {
        subscriber.try_init()
    };
    installed.map_err(|e| EnergyError::config(format!("Failed to install logger: {}", e)))?;

    info!(
        "Logging initialized - level: {:?}, file: {}",
        level, config.file
    );
    Ok(())
}

/// Directory that receives the rolling files
///
/// A path with an extension is treated as a file name and its parent is used.
fn log_directory(file: &str) -> &Path {
    let p = Path::new(file);
    if p.extension().is_some() {
        match p.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    } else {
        p
    }
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        _ => Err(EnergyError::config(format!(
            "Invalid log level: {}",
            level_str
        ))),
    }
}

/// Context information for log messages
#[derive(Debug, Clone)]
pub struct LogContext {
    /// Component name (e.g., "controller", "sources", "web")
    pub component: String,

    /// Additional context fields
    pub extra_fields: Vec<(String, String)>,
}

impl LogContext {
    /// Create a new log context
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            extra_fields: Vec::new(),
        }
    }

    /// Add extra field
    pub fn with_field(mut self, key: &str, value: String) -> Self {
        self.extra_fields.push((key.to_string(), value));
        self
    }
}

/// Structured logger with context
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    context: LogContext,
}

impl StructuredLogger {
    /// Create a new structured logger with context
    pub fn new(context: LogContext) -> Self {
        Self { context }
    }

    pub fn component(&self) -> &str {
        &self.context.component
    }

    pub fn info(&self, message: &str) {
        let fields = self.format_fields();
        info!(%fields, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        let fields = self.format_fields();
        warn!(%fields, "{}", message);
    }

    pub fn error(&self, message: &str) {
        let fields = self.format_fields();
        error!(%fields, "{}", message);
    }

    pub fn debug(&self, message: &str) {
        let fields = self.format_fields();
        debug!(%fields, "{}", message);
    }

    fn format_fields(&self) -> String {
        let mut fields = vec![format!("component={}", self.context.component)];
        for (key, value) in &self.context.extra_fields {
            fields.push(format!("{}={}", key, value));
        }
        fields.join(",")
    }
}

/// Create a logger for a specific component
pub fn get_logger(component: &str) -> StructuredLogger {
    StructuredLogger::new(LogContext::new(component))
}

/// Create a logger with full context
pub fn get_logger_with_context(context: LogContext) -> StructuredLogger {
    StructuredLogger::new(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_log_context_fields() {
        let context = LogContext::new("sources").with_field("feed", "bitcoin".to_string());
        let logger = get_logger_with_context(context);
        assert_eq!(logger.component(), "sources");
        assert_eq!(logger.format_fields(), "component=sources,feed=bitcoin");
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_ok());
        get_logger("test").info("logging after init");
    }

    #[test]
    fn test_log_directory() {
        assert_eq!(log_directory("/tmp/pos-energy.log"), Path::new("/tmp"));
        assert_eq!(log_directory("pos-energy.log"), Path::new("."));
        assert_eq!(log_directory("/var/log/pos"), Path::new("/var/log/pos"));
    }
}
