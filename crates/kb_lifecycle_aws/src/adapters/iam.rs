use aws_sdk_iam::operation::create_role::CreateRoleError;
use aws_sdk_iam::operation::delete_role::DeleteRoleError;
use aws_sdk_iam::operation::delete_role_policy::DeleteRolePolicyError;
use aws_sdk_iam::operation::get_role::GetRoleError;
use aws_sdk_iam::operation::put_role_policy::PutRolePolicyError;
use kb_lifecycle_core::error::{ServiceError, ServiceErrorKind};
use kb_lifecycle_core::ports::RoleService;
use tracing::info;

use super::{block_on, kind_when, sdk_failure};

pub struct IamRoles {
    client: aws_sdk_iam::Client,
}

impl IamRoles {
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

impl RoleService for IamRoles {
    fn find_role(&self, role_name: &str) -> Result<Option<String>, ServiceError> {
        match block_on(self.client.get_role().role_name(role_name).send()) {
            Ok(output) => Ok(output.role().map(|role| role.arn().to_string())),
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(GetRoleError::is_no_such_entity_exception) =>
            {
                Ok(None)
            }
            Err(error) => Err(sdk_failure("GetRole", ServiceErrorKind::Other, &error)),
        }
    }

    fn delete_inline_policy(
        &self,
        role_name: &str,
        policy_name: &str,
    ) -> Result<(), ServiceError> {
        block_on(
            self.client
                .delete_role_policy()
                .role_name(role_name)
                .policy_name(policy_name)
                .send(),
        )
        .map_err(|error| {
            let kind = kind_when(
                error
                    .as_service_error()
                    .is_some_and(DeleteRolePolicyError::is_no_such_entity_exception),
                ServiceErrorKind::NotFound,
            );
            sdk_failure("DeleteRolePolicy", kind, &error)
        })?;
        info!(event = "aws.iam.inline_policy_deleted", role = role_name, policy = policy_name);
        Ok(())
    }

    fn delete_role(&self, role_name: &str) -> Result<(), ServiceError> {
        block_on(self.client.delete_role().role_name(role_name).send()).map_err(|error| {
            let kind = kind_when(
                error
                    .as_service_error()
                    .is_some_and(DeleteRoleError::is_no_such_entity_exception),
                ServiceErrorKind::NotFound,
            );
            sdk_failure("DeleteRole", kind, &error)
        })?;
        info!(event = "aws.iam.role_deleted", role = role_name);
        Ok(())
    }

    fn create_role(
        &self,
        role_name: &str,
        trust_policy: &str,
        description: &str,
    ) -> Result<String, ServiceError> {
        let output = block_on(
            self.client
                .create_role()
                .role_name(role_name)
                .assume_role_policy_document(trust_policy)
                .description(description)
                .send(),
        )
        .map_err(|error| {
            let kind = kind_when(
                error
                    .as_service_error()
                    .is_some_and(CreateRoleError::is_entity_already_exists_exception),
                ServiceErrorKind::AlreadyExists,
            );
            sdk_failure("CreateRole", kind, &error)
        })?;

        let arn = output
            .role()
            .map(|role| role.arn().to_string())
            .ok_or_else(|| {
                ServiceError::other("CreateRole", "create role response did not include the role")
            })?;
        info!(event = "aws.iam.role_created", role = role_name, arn = %arn);
        Ok(arn)
    }

    fn put_inline_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        policy_document: &str,
    ) -> Result<(), ServiceError> {
        block_on(
            self.client
                .put_role_policy()
                .role_name(role_name)
                .policy_name(policy_name)
                .policy_document(policy_document)
                .send(),
        )
        .map_err(|error| {
            let kind = kind_when(
                error
                    .as_service_error()
                    .is_some_and(PutRolePolicyError::is_no_such_entity_exception),
                ServiceErrorKind::NotFound,
            );
            sdk_failure("PutRolePolicy", kind, &error)
        })?;
        info!(event = "aws.iam.inline_policy_attached", role = role_name, policy = policy_name);
        Ok(())
    }
}
