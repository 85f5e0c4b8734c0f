//! Provisioning of the resources that cleanup removes.
//!
//! Each step tolerates the resource already existing, so running setup twice
//! converges on the same summary.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ServiceError, SetupError};
use crate::policy::{assume_role_policy, inline_policy};
use crate::ports::{find_exact_collection, Services};
use crate::report::Reporter;
use crate::resources::{ResourceNames, COLLECTION_DESCRIPTION, ROLE_DESCRIPTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    IamRole,
    InlinePolicy,
    SearchCollection,
    StorageBucket,
}

impl SetupStep {
    pub fn label(self) -> &'static str {
        match self {
            Self::IamRole => "Creating IAM role",
            Self::InlinePolicy => "Attaching inline policy",
            Self::SearchCollection => "Creating OpenSearch Serverless collection",
            Self::StorageBucket => "Creating S3 bucket",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provisioned {
    Created,
    AlreadyExisted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupSummary {
    pub account_id: String,
    pub role_arn: String,
    pub role: Provisioned,
    pub collection_arn: String,
    pub collection: Provisioned,
    pub bucket: String,
    pub bucket_status: Provisioned,
}

pub fn run_setup(
    services: &Services<'_>,
    reporter: &mut dyn Reporter,
) -> Result<SetupSummary, SetupError> {
    reporter.banner("🚀 Bedrock Knowledge Base Setup");

    let account_id = services
        .identity
        .caller_account_id()
        .map_err(|source| {
            reporter.failure(&format!("Error getting account ID: {source}"));
            SetupError::Identity { source }
        })?;
    reporter.success(&format!("AWS Account ID: {account_id}"));
    let names = ResourceNames::for_account(&account_id);

    let (role_arn, role) = create_role(services, &names, reporter)
        .map_err(|source| step_failed(SetupStep::IamRole, source, reporter))?;
    attach_inline_policy(services, &names, reporter)
        .map_err(|source| step_failed(SetupStep::InlinePolicy, source, reporter))?;
    let (collection_arn, collection) = create_collection(services, &names, reporter)
        .map_err(|source| step_failed(SetupStep::SearchCollection, source, reporter))?;
    let bucket_status = create_bucket(services, &names, reporter)
        .map_err(|source| step_failed(SetupStep::StorageBucket, source, reporter))?;

    let summary = SetupSummary {
        account_id,
        role_arn,
        role,
        collection_arn,
        collection,
        bucket: names.bucket,
        bucket_status,
    };
    info!(
        event = "core.setup.completed",
        role_arn = %summary.role_arn,
        collection_arn = %summary.collection_arn,
        bucket = %summary.bucket,
    );

    reporter.banner("✅ Setup Complete!");
    reporter.detail("Save these values for later use:");
    reporter.detail(&format!("Role ARN: {}", summary.role_arn));
    reporter.detail(&format!("AOSS ARN: {}", summary.collection_arn));
    reporter.detail(&format!("S3 Bucket: {}", summary.bucket));
    Ok(summary)
}

fn step_failed(
    step: SetupStep,
    source: ServiceError,
    reporter: &mut dyn Reporter,
) -> SetupError {
    warn!(event = "core.setup.step_failed", step = step.label(), error = %source);
    reporter.failure(&format!("Error: {source}"));
    SetupError::Step { step, source }
}

fn create_role(
    services: &Services<'_>,
    names: &ResourceNames,
    reporter: &mut dyn Reporter,
) -> Result<(String, Provisioned), ServiceError> {
    reporter.progress(&format!("Creating IAM Role: {}", names.role));

    let trust_policy = assume_role_policy().to_string();
    match services
        .roles
        .create_role(&names.role, &trust_policy, ROLE_DESCRIPTION)
    {
        Ok(arn) => {
            reporter.success(&format!("Role created: {arn}"));
            Ok((arn, Provisioned::Created))
        }
        Err(error) if error.is_already_exists() => {
            reporter.warning("Role already exists");
            let arn = services.roles.find_role(&names.role)?.ok_or_else(|| {
                ServiceError::not_found(
                    "GetRole",
                    format!(
                        "role {} was reported as existing but could not be read",
                        names.role
                    ),
                )
            })?;
            Ok((arn, Provisioned::AlreadyExisted))
        }
        Err(error) => Err(error),
    }
}

fn attach_inline_policy(
    services: &Services<'_>,
    names: &ResourceNames,
    reporter: &mut dyn Reporter,
) -> Result<(), ServiceError> {
    reporter.progress(&format!("Attaching policies to {}", names.role));
    services.roles.put_inline_policy(
        &names.role,
        &names.inline_policy,
        &inline_policy().to_string(),
    )?;
    reporter.success("Policies attached");
    Ok(())
}

fn create_collection(
    services: &Services<'_>,
    names: &ResourceNames,
    reporter: &mut dyn Reporter,
) -> Result<(String, Provisioned), ServiceError> {
    reporter.progress(&format!("Creating AOSS Collection: {}", names.collection));

    match services
        .collections
        .create_collection(&names.collection, COLLECTION_DESCRIPTION)
    {
        Ok(arn) => {
            reporter.success(&format!("Collection created: {arn}"));
            Ok((arn, Provisioned::Created))
        }
        Err(error) if error.is_already_exists() => {
            reporter.warning("Collection already exists");
            let collections = services.collections.list_collections(&names.collection)?;
            let existing =
                find_exact_collection(&collections, &names.collection).ok_or_else(|| {
                    ServiceError::not_found(
                        "ListCollections",
                        format!(
                            "collection {} was reported as existing but is not listed",
                            names.collection
                        ),
                    )
                })?;
            Ok((existing.arn.clone(), Provisioned::AlreadyExisted))
        }
        Err(error) => Err(error),
    }
}

fn create_bucket(
    services: &Services<'_>,
    names: &ResourceNames,
    reporter: &mut dyn Reporter,
) -> Result<Provisioned, ServiceError> {
    reporter.progress(&format!("Creating S3 Bucket: {}", names.bucket));

    match services.buckets.create_bucket(&names.bucket) {
        Ok(()) => {
            reporter.success(&format!("Bucket created: {}", names.bucket));
            Ok(Provisioned::Created)
        }
        Err(error) if error.is_already_exists() => {
            reporter.warning(&format!("Bucket already exists: {}", names.bucket));
            Ok(Provisioned::AlreadyExisted)
        }
        Err(error) => Err(error),
    }
}
