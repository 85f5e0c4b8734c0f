use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, Delete, ObjectIdentifier,
};
use kb_lifecycle_core::error::{ServiceError, ServiceErrorKind};
use kb_lifecycle_core::ports::BucketService;
use tracing::{debug, info};

use super::{block_on, kind_when, sdk_failure};

/// Upper bound on keys accepted by a single `DeleteObjects` request.
pub const MAX_DELETE_BATCH: usize = 1_000;

/// Region that rejects an explicit location constraint.
const DEFAULT_S3_REGION: &str = "us-east-1";

pub struct S3Buckets {
    client: aws_sdk_s3::Client,
    location: String,
}

impl S3Buckets {
    pub fn new(client: aws_sdk_s3::Client, location: impl Into<String>) -> Self {
        Self {
            client,
            location: location.into(),
        }
    }
}

pub fn location_constraint(location: &str) -> Option<BucketLocationConstraint> {
    let location = location.trim();
    if location.is_empty() || location == DEFAULT_S3_REGION {
        return None;
    }
    Some(BucketLocationConstraint::from(location))
}

pub fn delete_batches(keys: &[String]) -> std::slice::Chunks<'_, String> {
    keys.chunks(MAX_DELETE_BATCH)
}

async fn list_object_keys(
    client: &aws_sdk_s3::Client,
    bucket: &str,
) -> Result<Vec<String>, ServiceError> {
    let mut keys = Vec::new();
    let mut pages = client.list_objects_v2().bucket(bucket).into_paginator().send();
    while let Some(page) = pages.next().await {
        let page = page.map_err(|error| {
            let kind = kind_when(
                error
                    .as_service_error()
                    .is_some_and(ListObjectsV2Error::is_no_such_bucket),
                ServiceErrorKind::NotFound,
            );
            sdk_failure("ListObjectsV2", kind, &error)
        })?;
        keys.extend(
            page.contents()
                .iter()
                .filter_map(|object| object.key().map(str::to_string)),
        );
    }
    Ok(keys)
}

async fn delete_batch(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    batch: &[String],
) -> Result<usize, ServiceError> {
    let objects = batch
        .iter()
        .map(|key| ObjectIdentifier::builder().key(key).build())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| ServiceError::other("DeleteObjects", error.to_string()))?;
    let delete = Delete::builder()
        .set_objects(Some(objects))
        .quiet(true)
        .build()
        .map_err(|error| ServiceError::other("DeleteObjects", error.to_string()))?;

    let output = client
        .delete_objects()
        .bucket(bucket)
        .delete(delete)
        .send()
        .await
        .map_err(|error| sdk_failure("DeleteObjects", ServiceErrorKind::Other, &error))?;

    if let Some(first) = output.errors().first() {
        return Err(ServiceError::other(
            "DeleteObjects",
            format!(
                "{} object(s) could not be deleted; first failure on '{}': {}",
                output.errors().len(),
                first.key().unwrap_or_default(),
                first.message().unwrap_or("no message"),
            ),
        ));
    }
    Ok(batch.len())
}

impl BucketService for S3Buckets {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, ServiceError> {
        match block_on(self.client.head_bucket().bucket(bucket).send()) {
            Ok(_) => Ok(true),
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(HeadBucketError::is_not_found) =>
            {
                Ok(false)
            }
            Err(error) => Err(sdk_failure("HeadBucket", ServiceErrorKind::Other, &error)),
        }
    }

    fn delete_all_objects(&self, bucket: &str) -> Result<usize, ServiceError> {
        let client = self.client.clone();
        let deleted = block_on(async move {
            let keys = list_object_keys(&client, bucket).await?;
            let mut deleted = 0usize;
            for batch in delete_batches(&keys) {
                deleted += delete_batch(&client, bucket, batch).await?;
                debug!(event = "aws.s3.batch_deleted", bucket = bucket, deleted = deleted);
            }
            Ok::<_, ServiceError>(deleted)
        })?;

        info!(event = "aws.s3.objects_deleted", bucket = bucket, count = deleted);
        Ok(deleted)
    }

    fn delete_bucket(&self, bucket: &str) -> Result<(), ServiceError> {
        block_on(self.client.delete_bucket().bucket(bucket).send()).map_err(|error| {
            let kind = kind_when(
                error.as_service_error().and_then(|e| e.code()) == Some("NoSuchBucket"),
                ServiceErrorKind::NotFound,
            );
            sdk_failure("DeleteBucket", kind, &error)
        })?;
        info!(event = "aws.s3.bucket_deleted", bucket = bucket);
        Ok(())
    }

    fn create_bucket(&self, bucket: &str) -> Result<(), ServiceError> {
        let mut request = self.client.create_bucket().bucket(bucket);
        if let Some(constraint) = location_constraint(&self.location) {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(constraint)
                    .build(),
            );
        }

        block_on(request.send()).map_err(|error| {
            let kind = kind_when(
                error
                    .as_service_error()
                    .is_some_and(CreateBucketError::is_bucket_already_owned_by_you),
                ServiceErrorKind::AlreadyExists,
            );
            sdk_failure("CreateBucket", kind, &error)
        })?;
        info!(event = "aws.s3.bucket_created", bucket = bucket, location = %self.location);
        Ok(())
    }
}
