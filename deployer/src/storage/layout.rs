//! Project layout inside the working directory

use std::path::PathBuf;

use crate::filesys::dir::Dir;
use crate::filesys::file::File;

/// Name of the declarative configuration file
pub const CONFIG_FILE_NAME: &str = "lambda_config.yml";

/// Name of the local dependency bundle directory
pub const MODULES_DIR_NAME: &str = "python_modules";

/// Name of the transient deployment archive
pub const ARCHIVE_FILE_NAME: &str = "project.zip";

/// Name of the default handler source file
pub const HANDLER_FILE_NAME: &str = "example.py";

/// Files the deployer reads and writes, relative to the working directory
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Base directory (the working directory of the context)
    pub base_dir: PathBuf,
}

impl ProjectLayout {
    /// Create a new project layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the configuration file
    pub fn config_file(&self) -> File {
        File::new(self.base_dir.join(CONFIG_FILE_NAME))
    }

    /// Get the default handler source file
    pub fn handler_file(&self) -> File {
        File::new(self.base_dir.join(HANDLER_FILE_NAME))
    }

    /// Get the dependency bundle directory
    pub fn modules_dir(&self) -> Dir {
        Dir::new(self.base_dir.join(MODULES_DIR_NAME))
    }

    /// Get the initializer that puts the bundle on the import path
    pub fn modules_init_file(&self) -> File {
        self.modules_dir().file("__init__.py")
    }

    /// Get the deployment archive
    pub fn archive_file(&self) -> File {
        File::new(self.base_dir.join(ARCHIVE_FILE_NAME))
    }

    /// Get a transient file the invoke response payload is written to
    pub fn invoke_response_file(&self) -> File {
        File::new(
            self.base_dir
                .join(format!(".invoke-{}.json", uuid::Uuid::new_v4())),
        )
    }
}
