//! AWS CLI client implementation

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::app::context::DeploymentContext;
use crate::deploy::command::{run_checked, CommandOutput, CommandRunner, CommandSpec};
use crate::errors::DeployerError;

/// Thin client driving the `aws` command line tool
#[derive(Clone)]
pub struct AwsCli {
    runner: Arc<dyn CommandRunner>,
    program: String,
    context: DeploymentContext,
}

impl AwsCli {
    /// Create a new client
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        program: impl Into<String>,
        context: DeploymentContext,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            context,
        }
    }

    /// Build the command for the given arguments
    pub fn command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(&self.program, &self.context).args(args)
    }

    /// Run a call and require a zero exit status
    pub async fn call<I, S>(&self, args: I) -> Result<CommandOutput, DeployerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = self.command(args);
        run_checked(self.runner.as_ref(), &command).await
    }

    /// Run a call and parse its stdout as JSON
    pub async fn call_json<T, I, S>(&self, args: I) -> Result<T, DeployerError>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = self.command(args).args(["--output", "json"]);
        let output = run_checked(self.runner.as_ref(), &command).await?;
        debug!("`{}` returned {} bytes", command.display(), output.stdout.len());

        serde_json::from_str(&output.stdout).map_err(|e| DeployerError::MalformedResponse {
            command: command.display(),
            reason: e.to_string(),
        })
    }
}
