//! Lambda Deployer - Entry Point
//!
//! Packages a Python function with its dependencies and manages it on AWS
//! Lambda through the `aws` command line tool.

use std::env;
use std::sync::Arc;

use colored::Colorize;
use tracing::error;

use lambda_deployer::app::cli::parse_flags;
use lambda_deployer::app::context::DeploymentContext;
use lambda_deployer::app::options::Options;
use lambda_deployer::app::run::Session;
use lambda_deployer::deploy::command::SystemRunner;
use lambda_deployer::deploy::confirm::Interactive;
use lambda_deployer::errors::DeployerError;
use lambda_deployer::logs::init_logging;

#[tokio::main]
async fn main() {
    let flags = parse_flags(env::args().skip(1));

    let context = match DeploymentContext::from_process() {
        Ok(context) => context,
        Err(e) => exit_with(e),
    };

    let options = match Options::from_context(&context) {
        Ok(options) => options,
        Err(e) => exit_with(e),
    };

    if let Err(e) = init_logging(options.log.clone()) {
        println!("Failed to initialize logging: {e}");
    }

    let mut session = Session::new(
        context,
        options,
        Arc::new(SystemRunner),
        Arc::new(Interactive),
    );

    if let Err(e) = session.run(&flags).await {
        exit_with(e);
    }
}

fn exit_with(err: DeployerError) -> ! {
    match &err {
        DeployerError::ConfigurationMissing(path) => {
            println!("{}", format!("No configuration found at {}", path.display()).yellow());
            println!("Run with -b to write a starting lambda_config.yml, then edit it.");
        }
        DeployerError::Aborted(reason) => {
            println!("{}", format!("Aborted: {}", reason).yellow());
        }
        _ => {
            error!("{}", err);
            eprintln!("{} {}", "[ERROR]".red().bold(), err);
        }
    }
    std::process::exit(1);
}
