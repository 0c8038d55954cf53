//! Error types for the Lambda deployer

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the deployer
#[derive(Error, Debug)]
pub enum DeployerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration file not found: {}", .0.display())]
    ConfigurationMissing(PathBuf),

    #[error("Command `{command}` failed ({status}): {stderr}")]
    ExternalCommandFailure {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to install dependencies: {}", .0.join(", "))]
    DependencyInstall(Vec<String>),

    #[error("Unexpected response from `{command}`: {reason}")]
    MalformedResponse { command: String, reason: String },

    #[error("Aborted: {0}")]
    Aborted(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Prompt error: {0}")]
    PromptError(String),
}

impl From<dialoguer::Error> for DeployerError {
    fn from(err: dialoguer::Error) -> Self {
        DeployerError::PromptError(err.to_string())
    }
}
