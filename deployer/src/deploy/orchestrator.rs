//! Deployment orchestrator
//!
//! One method per CLI action. Every action except [`Orchestrator::initialize`]
//! starts with the configuration guard; external commands go through the
//! injected [`CommandRunner`] and questions through the injected
//! [`Confirmation`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::context::DeploymentContext;
use crate::app::options::Options;
use crate::aws::client::AwsCli;
use crate::aws::iam::BASIC_EXECUTION_POLICY_ARN;
use crate::aws::lambda::{FunctionConfiguration, InvokeResult, NewFunction};
use crate::deploy::archive::{build_archive, Archive};
use crate::deploy::command::CommandRunner;
use crate::deploy::confirm::Confirmation;
use crate::deploy::pip::{install_package, path_amplifier, prune_dist_info};
use crate::deploy::templates::{CONFIG_TEMPLATE, HANDLER_TEMPLATE};
use crate::errors::DeployerError;
use crate::storage::config::{load_config, DeploymentConfig};
use crate::storage::layout::ProjectLayout;

/// Files written by [`Orchestrator::initialize`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub config_written: bool,
    pub handler_written: bool,
}

/// Outcome of [`Orchestrator::install_dependencies`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub installed: Vec<String>,
    pub pruned: Vec<String>,
}

/// Outcome of [`Orchestrator::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub result: InvokeResult,

    /// Response payload written by the function, if any
    pub payload: Option<String>,
}

/// Drives the deployment workflow for one working directory
pub struct Orchestrator {
    context: DeploymentContext,
    options: Options,
    layout: ProjectLayout,
    config: Option<DeploymentConfig>,
    runner: Arc<dyn CommandRunner>,
    confirmation: Arc<dyn Confirmation>,
    aws: AwsCli,
}

impl Orchestrator {
    /// Create an orchestrator, reading the configuration once.
    ///
    /// A missing configuration file is not an error here; the guarded actions
    /// report it. A configuration file that does not parse is.
    pub async fn load(
        context: DeploymentContext,
        options: Options,
        runner: Arc<dyn CommandRunner>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Result<Self, DeployerError> {
        let layout = context.layout();
        let config = load_config(&layout.config_file()).await?;
        match &config {
            Some(config) => debug!("Loaded configuration for function {}", config.function.name),
            None => debug!("No configuration at {}", layout.config_file().path().display()),
        }

        let aws = AwsCli::new(runner.clone(), options.tools.aws.clone(), context.clone());

        Ok(Self {
            context,
            options,
            layout,
            config,
            runner,
            confirmation,
            aws,
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> Option<&DeploymentConfig> {
        self.config.as_ref()
    }

    /// Get the project layout
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    fn require_config(&self) -> Result<&DeploymentConfig, DeployerError> {
        self.config
            .as_ref()
            .ok_or_else(|| DeployerError::ConfigurationMissing(self.layout.config_file().path().to_path_buf()))
    }

    /// Write the starting template files that do not exist yet
    pub async fn initialize(&self) -> Result<InitReport, DeployerError> {
        write_templates(&self.layout).await
    }

    /// Wipe and repopulate the local dependency bundle.
    ///
    /// A dependency that fails to install does not stop the others; the
    /// failures are reported together once the bundle has been cleaned.
    pub async fn install_dependencies(&self) -> Result<InstallReport, DeployerError> {
        let config = self.require_config()?;
        let bundle = self.layout.modules_dir();

        println!("Creating {}", bundle.path().display());
        bundle.recreate().await?;
        self.layout
            .modules_init_file()
            .write_string(&path_amplifier())
            .await?;

        println!("Installing modules:");
        let mut report = InstallReport::default();
        let mut failed = Vec::new();

        for package in &config.python.requirements {
            println!("\t+ Installing: {}", package);
            match install_package(
                self.runner.as_ref(),
                &self.options.tools.pip,
                &self.context,
                bundle.path(),
                package,
            )
            .await
            {
                Ok(_) => report.installed.push(package.clone()),
                Err(e) => {
                    warn!("Failed to install {}: {}", package, e);
                    println!("\t! Failed: {}", package);
                    failed.push(package.clone());
                }
            }
        }

        report.pruned = prune_dist_info(&bundle).await?;
        debug!("Pruned {} metadata directories", report.pruned.len());

        if !failed.is_empty() {
            return Err(DeployerError::DependencyInstall(failed));
        }

        println!(
            "Finalized installation. Remember to import {} in every script that uses the modules.",
            crate::storage::layout::MODULES_DIR_NAME
        );
        Ok(report)
    }

    /// Package the working directory and replace the remote function code
    pub async fn upload(&self) -> Result<FunctionConfiguration, DeployerError> {
        let config = self.require_config()?;

        println!("Compressing and uploading the project to the cloud");
        let archive = self.build_archive().await?;
        let result = self
            .aws
            .update_function_code(&config.function.name, archive.file().path())
            .await;
        let local_sha256 = archive.sha256().to_string();
        let function = discard_after(archive, result).await?;
        check_code_digest(&local_sha256, &function);
        println!("Updated function {}", function.function_name);
        Ok(function)
    }

    /// Create the remote function, creating or reusing its execution role
    pub async fn create(&self) -> Result<FunctionConfiguration, DeployerError> {
        let config = self.require_config()?;

        let role_arn = self.resolve_role(config).await?;

        println!("Compressing and creating function {}", config.function.name);
        let archive = self.build_archive().await?;
        let result = self
            .aws
            .create_function(NewFunction {
                name: &config.function.name,
                runtime: &config.python.runtime,
                role_arn: &role_arn,
                handler: &config.function.handler,
                archive: archive.file().path(),
            })
            .await;
        let local_sha256 = archive.sha256().to_string();
        let function = discard_after(archive, result).await?;
        check_code_digest(&local_sha256, &function);
        println!("Created function {}", function.function_name);
        Ok(function)
    }

    /// Invoke the remote function and print its status and log
    pub async fn run(&self) -> Result<Invocation, DeployerError> {
        let config = self.require_config()?;

        let response_file = self.layout.invoke_response_file();
        let result = self
            .aws
            .invoke(&config.function.name, response_file.path())
            .await;
        let payload = if response_file.exists().await {
            Some(response_file.read_string().await)
        } else {
            None
        };
        response_file.delete().await?;
        let result = result?;
        let payload = payload.transpose()?;

        println!("Status code: {}", result.status_code);
        if let Some(error) = &result.function_error {
            println!("Function error: {}", error);
        }
        println!("Log:\n{}", result.log);
        if let Some(payload) = &payload {
            println!("Response: {}", payload);
        }

        Ok(Invocation { result, payload })
    }

    /// Delete the remote function
    pub async fn remove(&self) -> Result<(), DeployerError> {
        let config = self.require_config()?;

        self.aws.delete_function(&config.function.name).await?;
        println!("Deleted function {}", config.function.name);
        Ok(())
    }

    async fn build_archive(&self) -> Result<Archive, DeployerError> {
        build_archive(
            self.runner.as_ref(),
            &self.options.tools.zip,
            &self.context,
            &self.layout.archive_file(),
        )
        .await
    }

    async fn resolve_role(&self, config: &DeploymentConfig) -> Result<String, DeployerError> {
        let role_name = config.role_name();

        if let Some(role) = self.aws.find_role(&role_name).await? {
            let prompt = format!("Role {} already exists. Use it?", role_name);
            if !self.confirmation.confirm(&prompt)? {
                return Err(DeployerError::Aborted(format!(
                    "existing role {} was not reused",
                    role_name
                )));
            }
            info!("Reusing role {}", role.arn);
            return Ok(role.arn);
        }

        let role = self.aws.create_role(&role_name).await?;
        self.aws
            .attach_role_policy(&role_name, BASIC_EXECUTION_POLICY_ARN)
            .await?;

        let delay = self.options.role_propagation_delay;
        if !delay.is_zero() {
            println!("Waiting {}s for role {} to propagate", delay.as_secs(), role_name);
            tokio::time::sleep(delay).await;
        }

        Ok(role.arn)
    }
}

/// Write the starting template files that do not exist yet.
///
/// Needs no configuration: an existing file, valid or not, is left untouched.
pub async fn write_templates(layout: &ProjectLayout) -> Result<InitReport, DeployerError> {
    let config_file = layout.config_file();
    let handler_file = layout.handler_file();

    let report = InitReport {
        config_written: config_file.write_if_absent(CONFIG_TEMPLATE).await?,
        handler_written: handler_file.write_if_absent(HANDLER_TEMPLATE).await?,
    };

    for (written, file) in [
        (report.config_written, &config_file),
        (report.handler_written, &handler_file),
    ] {
        if written {
            println!("Created {}", file.path().display());
        } else {
            println!("{} already exists, leaving it untouched", file.path().display());
        }
    }

    Ok(report)
}

/// Remove the archive once the remote call is done.
///
/// The remote outcome wins: a failed cleanup is only logged when the call
/// itself failed.
async fn discard_after<T>(archive: Archive, result: Result<T, DeployerError>) -> Result<T, DeployerError> {
    let path = archive.file().path().to_path_buf();
    match (archive.discard().await, result) {
        (Ok(()), result) => result,
        (Err(e), Err(remote)) => {
            warn!("Failed to remove {}: {}", path.display(), e);
            Err(remote)
        }
        (Err(e), Ok(_)) => Err(e),
    }
}

fn check_code_digest(local_sha256: &str, function: &FunctionConfiguration) {
    match function.code_sha256.as_deref() {
        Some(remote) if remote != local_sha256 => warn!(
            "Code digest mismatch for {}: local {} remote {}",
            function.function_name, local_sha256, remote
        ),
        Some(_) => debug!("Code digest verified for {}", function.function_name),
        None => debug!("No code digest reported for {}", function.function_name),
    }
}
