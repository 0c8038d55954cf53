//! Lambda function calls

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::info;

use crate::aws::client::AwsCli;
use crate::errors::DeployerError;

/// Function configuration returned by create/update calls
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionConfiguration {
    pub function_name: String,

    #[serde(default)]
    pub function_arn: Option<String>,

    /// Base64 SHA-256 of the deployed package
    #[serde(default)]
    pub code_sha256: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InvokeResponse {
    status_code: i32,

    #[serde(default)]
    function_error: Option<String>,

    #[serde(default)]
    log_result: Option<String>,
}

/// Outcome of a synchronous invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeResult {
    pub status_code: i32,
    pub function_error: Option<String>,

    /// Decoded tail of the execution log
    pub log: String,
}

/// Parameters of a new function
#[derive(Debug, Clone)]
pub struct NewFunction<'a> {
    pub name: &'a str,
    pub runtime: &'a str,
    pub role_arn: &'a str,
    pub handler: &'a str,
    pub archive: &'a Path,
}

fn zip_file_arg(archive: &Path) -> String {
    format!("fileb://{}", archive.display())
}

fn decode_log(command: &str, log_result: Option<&str>) -> Result<String, DeployerError> {
    let Some(encoded) = log_result else {
        return Ok(String::new());
    };

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| DeployerError::MalformedResponse {
            command: command.to_string(),
            reason: format!("log result is not base64: {}", e),
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl AwsCli {
    /// Create a function from a local archive
    pub async fn create_function(&self, function: NewFunction<'_>) -> Result<FunctionConfiguration, DeployerError> {
        info!("Creating function: {}", function.name);
        self.call_json([
            "lambda".to_string(),
            "create-function".to_string(),
            "--function-name".to_string(),
            function.name.to_string(),
            "--runtime".to_string(),
            function.runtime.to_string(),
            "--role".to_string(),
            function.role_arn.to_string(),
            "--handler".to_string(),
            function.handler.to_string(),
            "--zip-file".to_string(),
            zip_file_arg(function.archive),
        ])
        .await
    }

    /// Replace the code of an existing function
    pub async fn update_function_code(
        &self,
        name: &str,
        archive: &Path,
    ) -> Result<FunctionConfiguration, DeployerError> {
        info!("Updating function code: {}", name);
        self.call_json([
            "lambda".to_string(),
            "update-function-code".to_string(),
            "--function-name".to_string(),
            name.to_string(),
            "--zip-file".to_string(),
            zip_file_arg(archive),
        ])
        .await
    }

    /// Invoke a function synchronously, writing its payload to `response_file`
    pub async fn invoke(&self, name: &str, response_file: &Path) -> Result<InvokeResult, DeployerError> {
        info!("Invoking function: {}", name);
        let args = [
            "lambda".to_string(),
            "invoke".to_string(),
            "--function-name".to_string(),
            name.to_string(),
            "--log-type".to_string(),
            "Tail".to_string(),
            response_file.display().to_string(),
        ];
        let command = self.command(args.clone()).display();
        let response: InvokeResponse = self.call_json(args).await?;

        Ok(InvokeResult {
            status_code: response.status_code,
            function_error: response.function_error,
            log: decode_log(&command, response.log_result.as_deref())?,
        })
    }

    /// Delete a function
    pub async fn delete_function(&self, name: &str) -> Result<(), DeployerError> {
        info!("Deleting function: {}", name);
        self.call(["lambda", "delete-function", "--function-name", name])
            .await?;
        Ok(())
    }
}
