//! Configuration guard tests

use std::sync::Arc;

use lambda_deployer::deploy::confirm::AutoApprove;
use lambda_deployer::deploy::orchestrator::Orchestrator;
use lambda_deployer::errors::DeployerError;

use crate::common::{FakeRunner, Project};

fn assert_missing<T: std::fmt::Debug>(result: Result<T, DeployerError>, project: &Project) {
    match result {
        Err(DeployerError::ConfigurationMissing(path)) => {
            assert_eq!(path, project.path().join("lambda_config.yml"));
        }
        other => panic!("expected ConfigurationMissing, got {:?}", other),
    }
}

#[tokio::test]
async fn test_guarded_actions_without_config_have_no_side_effects() {
    let project = Project::new(None);
    let runner = Arc::new(FakeRunner::new());
    let orchestrator = project.orchestrator(runner.clone(), Arc::new(AutoApprove)).await;
    assert!(orchestrator.config().is_none());

    assert_missing(orchestrator.install_dependencies().await, &project);
    assert_missing(orchestrator.upload().await, &project);
    assert_missing(orchestrator.create().await, &project);
    assert_missing(orchestrator.run().await, &project);
    assert_missing(orchestrator.remove().await, &project);

    assert!(runner.calls().is_empty());
    assert!(project.entries().is_empty());
}

#[tokio::test]
async fn test_malformed_config_fails_at_load() {
    let project = Project::new(Some("python:\n  runtime: [not, a, string\n"));
    let runner = Arc::new(FakeRunner::new());

    let result = Orchestrator::load(
        project.context(),
        project.options(),
        runner,
        Arc::new(AutoApprove),
    )
    .await;

    assert!(matches!(result, Err(DeployerError::YamlError(_))));
}
