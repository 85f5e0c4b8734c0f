use aws_sdk_opensearchserverless::operation::create_collection::CreateCollectionError;
use aws_sdk_opensearchserverless::operation::delete_collection::DeleteCollectionError;
use aws_sdk_opensearchserverless::types::{CollectionFilters, CollectionType};
use kb_lifecycle_core::error::{ServiceError, ServiceErrorKind};
use kb_lifecycle_core::ports::{CollectionService, CollectionSummary};
use tracing::{debug, info};

use super::{block_on, kind_when, sdk_failure};

pub struct AossCollections {
    client: aws_sdk_opensearchserverless::Client,
}

impl AossCollections {
    pub fn new(client: aws_sdk_opensearchserverless::Client) -> Self {
        Self { client }
    }
}

fn to_summary(
    summary: &aws_sdk_opensearchserverless::types::CollectionSummary,
) -> Option<CollectionSummary> {
    Some(CollectionSummary {
        id: summary.id()?.to_string(),
        name: summary.name()?.to_string(),
        arn: summary.arn()?.to_string(),
    })
}

impl CollectionService for AossCollections {
    fn list_collections(&self, name: &str) -> Result<Vec<CollectionSummary>, ServiceError> {
        let client = self.client.clone();
        let filters = CollectionFilters::builder().name(name).build();

        let collections = block_on(async move {
            let mut collections = Vec::new();
            let mut next_token: Option<String> = None;
            loop {
                let output = client
                    .list_collections()
                    .collection_filters(filters.clone())
                    .set_next_token(next_token.take())
                    .send()
                    .await
                    .map_err(|error| {
                        sdk_failure("ListCollections", ServiceErrorKind::Other, &error)
                    })?;

                collections.extend(output.collection_summaries().iter().filter_map(to_summary));
                match output.next_token() {
                    Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                    _ => break,
                }
            }
            Ok::<_, ServiceError>(collections)
        })?;

        debug!(
            event = "aws.aoss.collections_listed",
            filter = name,
            count = collections.len(),
        );
        Ok(collections)
    }

    fn delete_collection(&self, collection_id: &str) -> Result<(), ServiceError> {
        block_on(self.client.delete_collection().id(collection_id).send()).map_err(|error| {
            let kind = kind_when(
                error
                    .as_service_error()
                    .is_some_and(DeleteCollectionError::is_resource_not_found_exception),
                ServiceErrorKind::NotFound,
            );
            sdk_failure("DeleteCollection", kind, &error)
        })?;
        info!(event = "aws.aoss.collection_deleted", collection_id = collection_id);
        Ok(())
    }

    fn create_collection(&self, name: &str, description: &str) -> Result<String, ServiceError> {
        let output = block_on(
            self.client
                .create_collection()
                .name(name)
                .r#type(CollectionType::Vectorsearch)
                .description(description)
                .send(),
        )
        .map_err(|error| {
            let kind = kind_when(
                error
                    .as_service_error()
                    .is_some_and(CreateCollectionError::is_conflict_exception),
                ServiceErrorKind::AlreadyExists,
            );
            sdk_failure("CreateCollection", kind, &error)
        })?;

        let arn = output
            .create_collection_detail()
            .and_then(|detail| detail.arn())
            .ok_or_else(|| {
                ServiceError::other(
                    "CreateCollection",
                    "create collection response did not include an arn",
                )
            })?
            .to_string();
        info!(event = "aws.aoss.collection_created", name = name, arn = %arn);
        Ok(arn)
    }
}
