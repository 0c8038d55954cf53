//! Flag dispatch

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::cli::{usage, Action, Flag};
use crate::app::context::DeploymentContext;
use crate::app::options::Options;
use crate::deploy::command::CommandRunner;
use crate::deploy::confirm::Confirmation;
use crate::deploy::orchestrator::{write_templates, Orchestrator};
use crate::errors::DeployerError;

/// Everything an invocation needs to build its orchestrator
pub struct Session {
    context: DeploymentContext,
    options: Options,
    runner: Arc<dyn CommandRunner>,
    confirmation: Arc<dyn Confirmation>,
    orchestrator: Option<Orchestrator>,
}

impl Session {
    pub fn new(
        context: DeploymentContext,
        options: Options,
        runner: Arc<dyn CommandRunner>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        Self {
            context,
            options,
            runner,
            confirmation,
            orchestrator: None,
        }
    }

    /// Get the orchestrator, reading the configuration on first use
    async fn orchestrator(&mut self) -> Result<&mut Orchestrator, DeployerError> {
        let orchestrator = match self.orchestrator.take() {
            Some(orchestrator) => orchestrator,
            None => {
                Orchestrator::load(
                    self.context.clone(),
                    self.options.clone(),
                    self.runner.clone(),
                    self.confirmation.clone(),
                )
                .await?
            }
        };
        Ok(self.orchestrator.insert(orchestrator))
    }

    /// Evaluate the flags in order.
    ///
    /// Unknown flags are reported and skipped. The first failing action stops
    /// the remaining ones.
    pub async fn run(&mut self, flags: &[Flag]) -> Result<(), DeployerError> {
        if flags.is_empty() {
            println!("{}", usage());
            return Ok(());
        }

        for flag in flags {
            match flag {
                Flag::Unknown(arg) => {
                    println!("Unknown option {}, ignoring it (see -h for the available flags)", arg);
                }
                Flag::Action(Action::Help) => println!("{}", usage()),
                Flag::Action(action) => {
                    info!("Running action {:?}", action);
                    self.dispatch(*action).await?;
                }
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, action: Action) -> Result<(), DeployerError> {
        match action {
            // Templates never depend on the configuration, which may be missing or broken.
            Action::Build => {
                let report = write_templates(&self.context.layout()).await?;
                if report.config_written {
                    debug!("Configuration written, reloading on next action");
                    self.orchestrator = None;
                }
            }
            Action::Help => println!("{}", usage()),
            Action::Install => {
                self.orchestrator().await?.install_dependencies().await?;
            }
            Action::Upload => {
                self.orchestrator().await?.upload().await?;
            }
            Action::Create => {
                self.orchestrator().await?.create().await?;
            }
            Action::Run => {
                self.orchestrator().await?.run().await?;
            }
            Action::Delete => {
                self.orchestrator().await?.remove().await?;
            }
        }

        Ok(())
    }
}
