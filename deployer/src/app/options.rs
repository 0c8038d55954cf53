//! Application configuration options

use std::time::Duration;

use crate::app::context::DeploymentContext;
use crate::errors::DeployerError;
use crate::logs::{LogLevel, LogOptions};

/// Main application options
#[derive(Debug, Clone)]
pub struct Options {
    /// Logging configuration
    pub log: LogOptions,

    /// External tool binaries
    pub tools: ToolOptions,

    /// Wait after creating an execution role before using it
    pub role_propagation_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            log: LogOptions::default(),
            tools: ToolOptions::default(),
            role_propagation_delay: Duration::from_secs(5),
        }
    }
}

/// External tool binaries
#[derive(Debug, Clone)]
pub struct ToolOptions {
    /// Package installer
    pub pip: String,

    /// Archiver
    pub zip: String,

    /// Cloud CLI
    pub aws: String,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            pip: "pip3".to_string(),
            zip: "zip".to_string(),
            aws: "aws".to_string(),
        }
    }
}

impl Options {
    /// Build options from the `LAMBDA_DEPLOYER_*` variables of the context
    pub fn from_context(context: &DeploymentContext) -> Result<Self, DeployerError> {
        let mut options = Options::default();

        if let Some(level) = context.var("LAMBDA_DEPLOYER_LOG") {
            options.log.log_level = level
                .parse::<LogLevel>()
                .map_err(DeployerError::ConfigError)?;
        }
        if let Some(json) = context.var("LAMBDA_DEPLOYER_LOG_JSON") {
            options.log.json_format = matches!(json.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(pip) = context.var("LAMBDA_DEPLOYER_PIP") {
            options.tools.pip = pip.to_string();
        }
        if let Some(zip) = context.var("LAMBDA_DEPLOYER_ZIP") {
            options.tools.zip = zip.to_string();
        }
        if let Some(aws) = context.var("LAMBDA_DEPLOYER_AWS") {
            options.tools.aws = aws.to_string();
        }

        if let Some(secs) = context.var("LAMBDA_DEPLOYER_ROLE_DELAY_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                DeployerError::ConfigError(format!(
                    "LAMBDA_DEPLOYER_ROLE_DELAY_SECS must be a number of seconds, got {}",
                    secs
                ))
            })?;
            options.role_propagation_delay = Duration::from_secs(secs);
        }

        Ok(options)
    }
}
