//! Logging configuration

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::errors::DeployerError;

/// Log level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Logging options
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Log level
    pub log_level: LogLevel,

    /// Enable JSON format
    pub json_format: bool,
}

/// Initialize logging
///
/// Logs go to stderr so that the action output on stdout stays readable.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(options: LogOptions) -> Result<(), DeployerError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.log_level.to_filter_string()));

    let subscriber = tracing_subscriber::registry().with(filter);

    if options.json_format {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| DeployerError::ConfigError(e.to_string()))?;
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| DeployerError::ConfigError(e.to_string()))?;
    }

    Ok(())
}
