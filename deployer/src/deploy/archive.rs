//! Deployment archive packaging

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::app::context::DeploymentContext;
use crate::deploy::command::{run_checked, CommandRunner, CommandSpec};
use crate::errors::DeployerError;
use crate::filesys::file::File;

/// A freshly built archive of the working directory
#[derive(Debug, Clone)]
pub struct Archive {
    file: File,
    sha256: String,
}

impl Archive {
    /// Get the archive file
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Base64 SHA-256 of the archive, in the format the platform reports
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Remove the archive from disk
    pub async fn discard(self) -> Result<(), DeployerError> {
        debug!("Removing archive {}", self.file.path().display());
        self.file.delete().await
    }
}

/// Base64 encoded SHA-256 digest
pub fn sha256_base64(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    STANDARD.encode(hasher.finalize())
}

/// Compress the whole working directory into `target`.
///
/// A stale archive is removed first. If the archiver fails, whatever it left
/// behind is removed before the error is returned.
pub async fn build_archive(
    runner: &dyn CommandRunner,
    program: &str,
    context: &DeploymentContext,
    target: &File,
) -> Result<Archive, DeployerError> {
    target.delete().await?;

    info!("Compressing {} into {}", context.working_dir().display(), target.path().display());
    let command = CommandSpec::new(program, context)
        .arg("-qr")
        .arg(target.path().display().to_string())
        .arg(".");

    if let Err(e) = run_checked(runner, &command).await {
        target.delete().await?;
        return Err(e);
    }

    let sha256 = match target.read_bytes().await {
        Ok(bytes) => sha256_base64(&bytes),
        Err(e) => {
            target.delete().await?;
            return Err(e);
        }
    };

    Ok(Archive {
        file: target.clone(),
        sha256,
    })
}
