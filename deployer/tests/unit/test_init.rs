//! Template initialization tests

use std::sync::Arc;

use lambda_deployer::deploy::confirm::AutoReject;
use lambda_deployer::storage::config::DeploymentConfig;

use crate::common::{FakeRunner, Project, EXAMPLE_CONFIG};

#[tokio::test]
async fn test_initialize_writes_loadable_defaults() {
    let project = Project::new(None);
    let runner = Arc::new(FakeRunner::new());
    let orchestrator = project.orchestrator(runner.clone(), Arc::new(AutoReject)).await;

    let report = orchestrator.initialize().await.unwrap();

    assert!(report.config_written);
    assert!(report.handler_written);
    assert_eq!(project.entries(), vec!["example.py", "lambda_config.yml"]);
    assert!(runner.calls().is_empty());

    let reloaded = project.orchestrator(runner, Arc::new(AutoReject)).await;
    let config = reloaded.config().unwrap();
    assert_eq!(config, &DeploymentConfig::default());
    assert_eq!(config.python.runtime, "python3.9");
    assert!(config.python.requirements.is_empty());
    assert_eq!(config.function.name, "example");
    assert_eq!(config.function.handler, "example.handler");
}

#[tokio::test]
async fn test_initialize_keeps_existing_files() {
    let project = Project::new(Some(EXAMPLE_CONFIG));
    let orchestrator = project
        .orchestrator(Arc::new(FakeRunner::new()), Arc::new(AutoReject))
        .await;

    let report = orchestrator.initialize().await.unwrap();

    assert!(!report.config_written);
    assert!(report.handler_written);
    let config = std::fs::read_to_string(project.path().join("lambda_config.yml")).unwrap();
    assert_eq!(config, EXAMPLE_CONFIG);
}
