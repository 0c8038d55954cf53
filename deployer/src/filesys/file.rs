//! File operations

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::errors::DeployerError;

/// A file wrapper with path
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Create a new file reference
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }

    /// Read file contents as string
    pub async fn read_string(&self) -> Result<String, DeployerError> {
        let mut file = fs::File::open(&self.path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;
        Ok(contents)
    }

    /// Read file contents as bytes
    pub async fn read_bytes(&self) -> Result<Vec<u8>, DeployerError> {
        let mut file = fs::File::open(&self.path).await?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await?;
        Ok(contents)
    }

    /// Read file as YAML
    pub async fn read_yaml<T: DeserializeOwned>(&self) -> Result<T, DeployerError> {
        let contents = self.read_string().await?;
        let value = serde_yaml::from_str(&contents)?;
        Ok(value)
    }

    /// Write string to file
    pub async fn write_string(&self, contents: &str) -> Result<(), DeployerError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&self.path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Write string to file unless it already exists.
    ///
    /// Returns `true` when the file was created.
    pub async fn write_if_absent(&self, contents: &str) -> Result<bool, DeployerError> {
        if self.exists().await {
            return Ok(false);
        }
        self.write_string(contents).await?;
        Ok(true)
    }

    /// Delete the file
    pub async fn delete(&self) -> Result<(), DeployerError> {
        if self.exists().await {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}
