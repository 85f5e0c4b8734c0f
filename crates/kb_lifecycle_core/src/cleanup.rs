//! Ordered, fail-fast deletion of the knowledge base resources.
//!
//! The steps run in [`CLEANUP_ORDER`] with no dependency analysis between
//! them. A missing resource is reported and skipped; any other failure stops
//! the sequence without undoing earlier steps.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::confirm::{Confirmer, CONFIRMATION_QUESTION};
use crate::error::{CleanupError, ServiceError};
use crate::ports::{find_exact_collection, Services};
use crate::report::Reporter;
use crate::resources::ResourceNames;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupStep {
    IamRole,
    SearchCollection,
    StorageBucket,
}

pub const CLEANUP_ORDER: [CleanupStep; 3] = [
    CleanupStep::IamRole,
    CleanupStep::SearchCollection,
    CleanupStep::StorageBucket,
];

impl CleanupStep {
    pub fn label(self) -> &'static str {
        match self {
            Self::IamRole => "IAM role",
            Self::SearchCollection => "OpenSearch Serverless collection",
            Self::StorageBucket => "S3 bucket",
        }
    }

    pub fn resource_name(self, names: &ResourceNames) -> &str {
        match self {
            Self::IamRole => &names.role,
            Self::SearchCollection => &names.collection,
            Self::StorageBucket => &names.bucket,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    RoleDeleted { inline_policy_removed: bool },
    CollectionDeleted { collection_id: String },
    BucketDeleted { objects_deleted: usize },
    NotFound,
}

impl StepOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StepOutcome::NotFound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: CleanupStep,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub account_id: String,
    pub names: ResourceNames,
    pub steps: Vec<StepRecord>,
}

impl CleanupReport {
    pub fn outcome(&self, step: CleanupStep) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|record| record.step == step)
            .map(|record| &record.outcome)
    }
}

pub fn run_cleanup(
    services: &Services<'_>,
    confirmer: &mut dyn Confirmer,
    reporter: &mut dyn Reporter,
) -> Result<CleanupReport, CleanupError> {
    reporter.banner("🧹 Bedrock Knowledge Base Cleanup");

    let account_id = services
        .identity
        .caller_account_id()
        .map_err(|source| {
            reporter.failure(&format!("Error getting account ID: {source}"));
            CleanupError::Identity { source }
        })?;
    reporter.success(&format!("AWS Account ID: {account_id}"));

    let names = ResourceNames::for_account(&account_id);
    info!(
        event = "core.cleanup.names_resolved",
        account_id = %account_id,
        role = %names.role,
        collection = %names.collection,
        bucket = %names.bucket,
    );

    reporter.warning("This will delete the following resources:");
    reporter.detail(&format!("- IAM Role: {}", names.role));
    reporter.detail(&format!("- AOSS Collection: {}", names.collection));
    reporter.detail(&format!("- S3 Bucket: {}", names.bucket));

    let confirmed = confirmer
        .confirm(CONFIRMATION_QUESTION)
        .map_err(|source| {
            reporter.failure(&format!("Could not read confirmation: {source}"));
            CleanupError::Prompt { source }
        })?;
    if !confirmed {
        info!(event = "core.cleanup.cancelled");
        reporter.failure("Cleanup cancelled");
        return Err(CleanupError::Cancelled);
    }

    let mut steps = Vec::with_capacity(CLEANUP_ORDER.len());
    for step in CLEANUP_ORDER {
        info!(
            event = "core.cleanup.step_started",
            step = step.label(),
            resource = step.resource_name(&names),
        );
        let outcome = run_step(step, services, &names, reporter).map_err(|source| {
            warn!(
                event = "core.cleanup.step_failed",
                step = step.label(),
                error = %source,
            );
            reporter.failure(&format!("Failed to delete {}: {source}", step.label()));
            CleanupError::Step { step, source }
        })?;
        info!(
            event = "core.cleanup.step_completed",
            step = step.label(),
            not_found = outcome.is_not_found(),
        );
        steps.push(StepRecord { step, outcome });
    }

    reporter.banner("✅ Cleanup complete!");
    Ok(CleanupReport {
        account_id,
        names,
        steps,
    })
}

fn run_step(
    step: CleanupStep,
    services: &Services<'_>,
    names: &ResourceNames,
    reporter: &mut dyn Reporter,
) -> Result<StepOutcome, ServiceError> {
    match step {
        CleanupStep::IamRole => delete_role(services, names, reporter),
        CleanupStep::SearchCollection => delete_collection(services, names, reporter),
        CleanupStep::StorageBucket => delete_bucket(services, names, reporter),
    }
}

fn delete_role(
    services: &Services<'_>,
    names: &ResourceNames,
    reporter: &mut dyn Reporter,
) -> Result<StepOutcome, ServiceError> {
    reporter.progress(&format!("Deleting IAM Role: {}", names.role));

    if services.roles.find_role(&names.role)?.is_none() {
        reporter.warning("Role not found");
        return Ok(StepOutcome::NotFound);
    }

    let inline_policy_removed = match services
        .roles
        .delete_inline_policy(&names.role, &names.inline_policy)
    {
        Ok(()) => true,
        Err(error) if error.is_not_found() => {
            debug!(
                event = "core.cleanup.inline_policy_absent",
                role = %names.role,
                policy = %names.inline_policy,
            );
            false
        }
        Err(error) => return Err(error),
    };

    services.roles.delete_role(&names.role)?;
    reporter.success("Role deleted");
    Ok(StepOutcome::RoleDeleted {
        inline_policy_removed,
    })
}

fn delete_collection(
    services: &Services<'_>,
    names: &ResourceNames,
    reporter: &mut dyn Reporter,
) -> Result<StepOutcome, ServiceError> {
    reporter.progress(&format!("Deleting AOSS Collection: {}", names.collection));

    let collections = services.collections.list_collections(&names.collection)?;
    let Some(collection) = find_exact_collection(&collections, &names.collection) else {
        reporter.warning("Collection not found");
        return Ok(StepOutcome::NotFound);
    };

    services.collections.delete_collection(&collection.id)?;
    reporter.success("Collection deleted");
    Ok(StepOutcome::CollectionDeleted {
        collection_id: collection.id.clone(),
    })
}

fn delete_bucket(
    services: &Services<'_>,
    names: &ResourceNames,
    reporter: &mut dyn Reporter,
) -> Result<StepOutcome, ServiceError> {
    reporter.progress(&format!("Deleting S3 Bucket: {}", names.bucket));

    if !services.buckets.bucket_exists(&names.bucket)? {
        reporter.warning("Bucket not found");
        return Ok(StepOutcome::NotFound);
    }

    let objects_deleted = services.buckets.delete_all_objects(&names.bucket)?;
    reporter.detail(&format!("Removed {objects_deleted} object(s)"));
    services.buckets.delete_bucket(&names.bucket)?;
    reporter.success("Bucket deleted");
    Ok(StepOutcome::BucketDeleted { objects_deleted })
}
