//! Explicit process context

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::DeployerError;
use crate::storage::layout::ProjectLayout;

/// Working directory and environment snapshot the deployer operates on.
///
/// Captured once; every external command runs in `working_dir` with exactly
/// `env` as its environment.
#[derive(Debug, Clone)]
pub struct DeploymentContext {
    working_dir: PathBuf,
    env: BTreeMap<String, String>,
}

impl DeploymentContext {
    /// Create a context from explicit values
    pub fn new(working_dir: impl Into<PathBuf>, env: BTreeMap<String, String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            env,
        }
    }

    /// Snapshot the current process working directory and environment
    pub fn from_process() -> Result<Self, DeployerError> {
        let working_dir = std::env::current_dir()?;
        let env = std::env::vars().collect();
        Ok(Self::new(working_dir, env))
    }

    /// Get the working directory
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Get the environment snapshot
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Look up a single environment variable
    pub fn var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    /// Get the project layout rooted at the working directory
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(&self.working_dir)
    }
}
