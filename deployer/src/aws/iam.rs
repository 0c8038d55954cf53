//! IAM execution role calls

use serde::Deserialize;
use tracing::info;

use crate::aws::client::AwsCli;
use crate::errors::DeployerError;

/// Trust policy letting the Lambda service assume the execution role
pub const LAMBDA_TRUST_POLICY: &str = r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Principal":{"Service":"lambda.amazonaws.com"},"Action":"sts:AssumeRole"}]}"#;

/// Managed policy granting basic execution rights (log delivery)
pub const BASIC_EXECUTION_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

/// An IAM role as returned by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Role {
    pub role_name: String,
    pub arn: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListRolesResponse {
    roles: Vec<Role>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateRoleResponse {
    role: Role,
}

impl AwsCli {
    /// List every role of the account
    pub async fn list_roles(&self) -> Result<Vec<Role>, DeployerError> {
        let response: ListRolesResponse = self.call_json(["iam", "list-roles"]).await?;
        Ok(response.roles)
    }

    /// Find a role by exact name
    pub async fn find_role(&self, role_name: &str) -> Result<Option<Role>, DeployerError> {
        let roles = self.list_roles().await?;
        Ok(roles.into_iter().find(|role| role.role_name == role_name))
    }

    /// Create a role assumable by the Lambda service
    pub async fn create_role(&self, role_name: &str) -> Result<Role, DeployerError> {
        info!("Creating execution role: {}", role_name);
        let response: CreateRoleResponse = self
            .call_json([
                "iam",
                "create-role",
                "--role-name",
                role_name,
                "--assume-role-policy-document",
                LAMBDA_TRUST_POLICY,
            ])
            .await?;
        Ok(response.role)
    }

    /// Attach a managed policy to a role
    pub async fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<(), DeployerError> {
        info!("Attaching policy {} to role {}", policy_arn, role_name);
        self.call([
            "iam",
            "attach-role-policy",
            "--role-name",
            role_name,
            "--policy-arn",
            policy_arn,
        ])
        .await?;
        Ok(())
    }
}
