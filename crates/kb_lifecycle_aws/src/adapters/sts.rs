use kb_lifecycle_core::error::{ServiceError, ServiceErrorKind};
use kb_lifecycle_core::ports::IdentityService;
use tracing::debug;

use super::{block_on, sdk_failure};

pub struct StsIdentity {
    client: aws_sdk_sts::Client,
}

impl StsIdentity {
    pub fn new(client: aws_sdk_sts::Client) -> Self {
        Self { client }
    }
}

impl IdentityService for StsIdentity {
    fn caller_account_id(&self) -> Result<String, ServiceError> {
        let output = block_on(self.client.get_caller_identity().send()).map_err(|error| {
            sdk_failure("GetCallerIdentity", ServiceErrorKind::Other, &error)
        })?;

        let account_id = output.account().ok_or_else(|| {
            ServiceError::other(
                "GetCallerIdentity",
                "caller identity response did not include an account id",
            )
        })?;
        debug!(event = "aws.sts.identity_resolved", account_id = %account_id);
        Ok(account_id.to_string())
    }
}
