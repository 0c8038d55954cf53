//! External command execution

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::app::context::DeploymentContext;
use crate::errors::DeployerError;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: BTreeMap<String, String>,
}

impl CommandSpec {
    /// Create a command that runs inside the context's working directory and environment
    pub fn new(program: impl Into<String>, context: &DeploymentContext) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: context.working_dir().to_path_buf(),
            env: context.env().clone(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Command line as shown in logs and errors
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn success_with(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    fn status_label(&self) -> String {
        match self.status {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion and capture its output.
    ///
    /// Only a failure to start the process is an error; a non-zero exit is
    /// reported through [`CommandOutput::status`].
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, DeployerError>;
}

/// Runner spawning real processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, DeployerError> {
        debug!("Running: {}", command.display());

        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .env_clear()
            .envs(&command.env)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DeployerError::ExternalCommandFailure {
                command: command.display(),
                status: "not started".to_string(),
                stderr: e.to_string(),
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run a command and turn a non-zero exit into [`DeployerError::ExternalCommandFailure`]
pub async fn run_checked(
    runner: &dyn CommandRunner,
    command: &CommandSpec,
) -> Result<CommandOutput, DeployerError> {
    let output = runner.run(command).await?;

    if !output.success() {
        warn!("`{}` failed with {}", command.display(), output.status_label());
        return Err(DeployerError::ExternalCommandFailure {
            command: command.display(),
            status: output.status_label(),
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(output)
}
