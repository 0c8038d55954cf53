//! Flag dispatch tests

use std::sync::Arc;

use lambda_deployer::app::cli::parse_flags;
use lambda_deployer::app::run::Session;
use lambda_deployer::deploy::confirm::AutoReject;
use lambda_deployer::errors::DeployerError;

use crate::common::{list_names, FakeRunner, Project, EXAMPLE_CONFIG};

fn session(project: &Project, runner: Arc<FakeRunner>) -> Session {
    Session::new(project.context(), project.options(), runner, Arc::new(AutoReject))
}

#[tokio::test]
async fn test_build_then_install_in_one_invocation() {
    let project = Project::new(None);
    let runner = Arc::new(FakeRunner::new());

    session(&project, runner.clone())
        .run(&parse_flags(["-b", "-i"]))
        .await
        .unwrap();

    assert_eq!(
        project.entries(),
        vec!["example.py", "lambda_config.yml", "python_modules"]
    );
    assert_eq!(list_names(&project.path().join("python_modules")), vec!["__init__.py"]);
}

#[tokio::test]
async fn test_flags_run_in_order_and_unknown_flags_are_skipped() {
    let project = Project::new(Some(EXAMPLE_CONFIG));
    let runner = Arc::new(FakeRunner::new());

    session(&project, runner.clone())
        .run(&parse_flags(["-i", "--bogus", "-u", "-d"]))
        .await
        .unwrap();

    let programs: Vec<String> = runner
        .calls()
        .iter()
        .map(|c| format!("{} {}", c.command.program, c.command.args[0]))
        .collect();
    assert_eq!(
        programs,
        vec!["pip3 install", "zip -qr", "aws lambda", "aws lambda"]
    );
}

#[tokio::test]
async fn test_build_ignores_malformed_config() {
    let project = Project::new(Some("python: [oops\n"));
    let runner = Arc::new(FakeRunner::new());

    session(&project, runner.clone())
        .run(&parse_flags(["-b"]))
        .await
        .unwrap();

    assert_eq!(project.entries(), vec!["example.py", "lambda_config.yml"]);
    let config = std::fs::read_to_string(project.path().join("lambda_config.yml")).unwrap();
    assert_eq!(config, "python: [oops\n");
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_config_fails_guarded_action_after_build() {
    let project = Project::new(Some("python: [oops\n"));
    let runner = Arc::new(FakeRunner::new());

    let result = session(&project, runner.clone())
        .run(&parse_flags(["-b", "-i"]))
        .await;

    assert!(matches!(result, Err(DeployerError::YamlError(_))));
    assert!(project.path().join("example.py").exists());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_missing_config_stops_before_later_flags() {
    let project = Project::new(None);
    let runner = Arc::new(FakeRunner::new());

    let result = session(&project, runner.clone())
        .run(&parse_flags(["-h", "-u", "-b"]))
        .await;

    assert!(matches!(result, Err(DeployerError::ConfigurationMissing(_))));
    assert!(runner.calls().is_empty());
    assert!(project.entries().is_empty());
}

#[tokio::test]
async fn test_no_flags_prints_usage_only() {
    let project = Project::new(None);
    let runner = Arc::new(FakeRunner::new());

    session(&project, runner.clone()).run(&[]).await.unwrap();

    assert!(runner.calls().is_empty());
    assert!(project.entries().is_empty());
}
