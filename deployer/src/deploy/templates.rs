//! Starting template files

/// Default `lambda_config.yml`
pub const CONFIG_TEMPLATE: &str = r#"python:
  runtime: python3.9
  requirements: []
function:
  name: example
  handler: example.handler
"#;

/// Default handler source matching the `example.handler` reference
pub const HANDLER_TEMPLATE: &str = r#"def handler(event, context):
    return {
        "statusCode": 200,
        "body": "Hello from Lambda!",
    }
"#;
