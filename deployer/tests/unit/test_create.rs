//! Function creation and role resolution tests

use std::sync::Arc;

use lambda_deployer::aws::iam::BASIC_EXECUTION_POLICY_ARN;
use lambda_deployer::deploy::confirm::AutoApprove;
use lambda_deployer::errors::DeployerError;

use crate::common::{FakeRunner, Project, ScriptedAnswer, EXAMPLE_CONFIG};

const EXISTING_ARN: &str = "arn:aws:iam::123456789012:role/example-lambda-exec-policy";

fn arg_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[tokio::test]
async fn test_create_with_new_role() {
    let project = Project::new(Some(EXAMPLE_CONFIG));
    let runner = Arc::new(FakeRunner::new());
    let answer = Arc::new(ScriptedAnswer::new(true));
    let orchestrator = project.orchestrator(runner.clone(), answer.clone()).await;

    let function = orchestrator.create().await.unwrap();
    assert_eq!(function.function_name, "example");

    // no existing role, so nobody is asked
    assert!(answer.asked().is_empty());

    let create_role = runner.find("aws", &["iam", "create-role"]).unwrap();
    assert_eq!(
        arg_after(&create_role.command.args, "--role-name"),
        Some("example-lambda-exec-policy")
    );
    let policy = arg_after(&create_role.command.args, "--assume-role-policy-document").unwrap();
    assert!(policy.contains("lambda.amazonaws.com"));

    let attach = runner.find("aws", &["iam", "attach-role-policy"]).unwrap();
    assert_eq!(arg_after(&attach.command.args, "--policy-arn"), Some(BASIC_EXECUTION_POLICY_ARN));

    let create = runner.find("aws", &["lambda", "create-function"]).unwrap();
    let args = &create.command.args;
    assert_eq!(arg_after(args, "--function-name"), Some("example"));
    assert_eq!(arg_after(args, "--runtime"), Some("python3.9"));
    assert_eq!(arg_after(args, "--handler"), Some("example.handler"));
    assert_eq!(
        arg_after(args, "--role"),
        Some("arn:aws:iam::123456789012:role/example-lambda-exec-policy")
    );
    assert!(arg_after(args, "--zip-file").unwrap().starts_with("fileb://"));
    assert!(create.archive_present);

    assert!(!project.path().join("project.zip").exists());
}

#[tokio::test]
async fn test_create_reuses_existing_role_when_approved() {
    let project = Project::new(Some(EXAMPLE_CONFIG));
    let runner = Arc::new(
        FakeRunner::new()
            .with_existing_role("other-role", "arn:aws:iam::123456789012:role/other-role")
            .with_existing_role("example-lambda-exec-policy", EXISTING_ARN),
    );
    let answer = Arc::new(ScriptedAnswer::new(true));
    let orchestrator = project.orchestrator(runner.clone(), answer.clone()).await;

    orchestrator.create().await.unwrap();

    assert_eq!(answer.asked().len(), 1);
    assert!(answer.asked()[0].contains("example-lambda-exec-policy"));
    assert!(runner.find("aws", &["iam", "create-role"]).is_none());
    assert!(runner.find("aws", &["iam", "attach-role-policy"]).is_none());

    let create = runner.find("aws", &["lambda", "create-function"]).unwrap();
    assert_eq!(arg_after(&create.command.args, "--role"), Some(EXISTING_ARN));
    assert!(!project.path().join("project.zip").exists());
}

#[tokio::test]
async fn test_create_aborts_when_reuse_declined() {
    let project = Project::new(Some(EXAMPLE_CONFIG));
    let runner = Arc::new(FakeRunner::new().with_existing_role("example-lambda-exec-policy", EXISTING_ARN));
    let orchestrator = project
        .orchestrator(runner.clone(), Arc::new(ScriptedAnswer::new(false)))
        .await;

    let result = orchestrator.create().await;

    assert!(matches!(result, Err(DeployerError::Aborted(_))));
    assert_eq!(runner.count("zip", &[]), 0);
    assert!(runner.find("aws", &["lambda", "create-function"]).is_none());
    assert!(runner.find("aws", &["iam", "create-role"]).is_none());
}

#[tokio::test]
async fn test_create_removes_archive_when_remote_call_fails() {
    let project = Project::new(Some(EXAMPLE_CONFIG));
    let runner = Arc::new(FakeRunner::new().with_failing_lambda());
    let orchestrator = project.orchestrator(runner.clone(), Arc::new(AutoApprove)).await;

    let result = orchestrator.create().await;

    match result {
        Err(DeployerError::ExternalCommandFailure { command, status, .. }) => {
            assert!(command.starts_with("aws lambda create-function"));
            assert_eq!(status, "exit code 254");
        }
        other => panic!("expected ExternalCommandFailure, got {:?}", other),
    }
    assert!(runner.find("aws", &["lambda", "create-function"]).unwrap().archive_present);
    assert!(!project.path().join("project.zip").exists());
}

#[tokio::test]
async fn test_create_reports_remote_failure_over_cleanup_failure() {
    let project = Project::new(Some(EXAMPLE_CONFIG));
    let runner = Arc::new(FakeRunner::new().with_failing_lambda().with_pinned_archive());
    let orchestrator = project.orchestrator(runner, Arc::new(AutoApprove)).await;

    let result = orchestrator.create().await;

    assert!(matches!(result, Err(DeployerError::ExternalCommandFailure { .. })));
}

#[tokio::test]
async fn test_create_with_malformed_role_listing() {
    let project = Project::new(Some(EXAMPLE_CONFIG));
    let runner = Arc::new(FakeRunner::new().with_malformed_roles());
    let orchestrator = project.orchestrator(runner.clone(), Arc::new(AutoApprove)).await;

    let result = orchestrator.create().await;

    assert!(matches!(result, Err(DeployerError::MalformedResponse { .. })));
    assert_eq!(runner.count("zip", &[]), 0);
    assert!(runner.find("aws", &["iam", "create-role"]).is_none());
}
