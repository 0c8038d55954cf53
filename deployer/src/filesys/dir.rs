//! Directory operations

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::DeployerError;
use crate::filesys::file::File;

/// A directory wrapper with path
#[derive(Debug, Clone)]
pub struct Dir {
    path: PathBuf,
}

impl Dir {
    /// Create a new directory reference
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the directory exists
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Create the directory (and parents)
    pub async fn create(&self) -> Result<(), DeployerError> {
        fs::create_dir_all(&self.path).await?;
        Ok(())
    }

    /// Delete the directory and all contents
    pub async fn delete(&self) -> Result<(), DeployerError> {
        if self.exists().await {
            fs::remove_dir_all(&self.path).await?;
        }
        Ok(())
    }

    /// Delete the directory if present and create it empty
    pub async fn recreate(&self) -> Result<(), DeployerError> {
        self.delete().await?;
        self.create().await
    }

    /// List the names of all direct entries, sorted
    pub async fn list_names(&self) -> Result<Vec<String>, DeployerError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.path).await?;

        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        names.sort();
        Ok(names)
    }

    /// List subdirectories
    pub async fn list_dirs(&self) -> Result<Vec<PathBuf>, DeployerError> {
        let mut dirs = Vec::new();
        let mut entries = fs::read_dir(&self.path).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                dirs.push(entry.path());
            }
        }

        dirs.sort();
        Ok(dirs)
    }

    /// Get a file within this directory
    pub fn file(&self, name: &str) -> File {
        File::new(self.path.join(name))
    }

    /// Get a subdirectory
    pub fn subdir(&self, name: &str) -> Dir {
        Dir::new(self.path.join(name))
    }
}
