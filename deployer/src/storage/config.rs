//! Deployment configuration file management

use serde::{Deserialize, Serialize};

use crate::errors::DeployerError;
use crate::filesys::file::File;

/// Declarative description of the function to deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Python runtime and dependencies
    pub python: PythonSection,

    /// Remote function identity
    pub function: FunctionSection,
}

/// `python:` section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonSection {
    /// Runtime identifier, e.g. `python3.9`
    pub runtime: String,

    /// Ordered list of dependency names passed to the package installer
    pub requirements: Vec<String>,
}

/// `function:` section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSection {
    /// Function name on the platform
    pub name: String,

    /// Handler reference (`module.function`)
    pub handler: String,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            python: PythonSection {
                runtime: "python3.9".to_string(),
                requirements: Vec::new(),
            },
            function: FunctionSection {
                name: "example".to_string(),
                handler: "example.handler".to_string(),
            },
        }
    }
}

impl DeploymentConfig {
    /// Name of the execution role this function runs under
    pub fn role_name(&self) -> String {
        format!("{}-lambda-exec-policy", self.function.name)
    }
}

/// Load the configuration if the file exists.
///
/// A missing file is `Ok(None)`; a file that does not parse is an error.
pub async fn load_config(config_file: &File) -> Result<Option<DeploymentConfig>, DeployerError> {
    if !config_file.exists().await {
        return Ok(None);
    }

    let config: DeploymentConfig = config_file.read_yaml().await?;
    Ok(Some(config))
}
