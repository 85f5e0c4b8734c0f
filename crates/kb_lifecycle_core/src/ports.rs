//! Service ports the lifecycle procedures run against.
//!
//! Every call is synchronous from the caller's point of view. Adapters that
//! talk to asynchronous clients are expected to block until the call
//! completes, so the procedures stay strictly sequential.

use serde::Serialize;

use crate::error::ServiceError;

pub trait IdentityService {
    fn caller_account_id(&self) -> Result<String, ServiceError>;
}

pub trait RoleService {
    /// Returns the role ARN, or `None` when no role has that name.
    fn find_role(&self, role_name: &str) -> Result<Option<String>, ServiceError>;

    fn delete_inline_policy(&self, role_name: &str, policy_name: &str)
        -> Result<(), ServiceError>;

    fn delete_role(&self, role_name: &str) -> Result<(), ServiceError>;

    /// Creates the role and returns its ARN. A name clash surfaces as an
    /// `AlreadyExists` error.
    fn create_role(
        &self,
        role_name: &str,
        trust_policy: &str,
        description: &str,
    ) -> Result<String, ServiceError>;

    fn put_inline_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        policy_document: &str,
    ) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CollectionSummary {
    pub id: String,
    pub name: String,
    pub arn: String,
}

pub trait CollectionService {
    /// Lists collections using `name` as a server-side filter. Callers must
    /// still compare names exactly.
    fn list_collections(&self, name: &str) -> Result<Vec<CollectionSummary>, ServiceError>;

    fn delete_collection(&self, collection_id: &str) -> Result<(), ServiceError>;

    /// Creates a vector search collection and returns its ARN.
    fn create_collection(&self, name: &str, description: &str) -> Result<String, ServiceError>;
}

pub trait BucketService {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, ServiceError>;

    /// Deletes every object in the bucket and returns how many were removed.
    fn delete_all_objects(&self, bucket: &str) -> Result<usize, ServiceError>;

    fn delete_bucket(&self, bucket: &str) -> Result<(), ServiceError>;

    fn create_bucket(&self, bucket: &str) -> Result<(), ServiceError>;
}

/// Explicit handle on every external collaborator, built once by the binary
/// from its loaded cloud configuration.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub identity: &'a dyn IdentityService,
    pub roles: &'a dyn RoleService,
    pub collections: &'a dyn CollectionService,
    pub buckets: &'a dyn BucketService,
}

/// Picks the collection whose name matches exactly; the service-side name
/// filter is not trusted to do that.
pub fn find_exact_collection<'a>(
    collections: &'a [CollectionSummary],
    name: &str,
) -> Option<&'a CollectionSummary> {
    collections.iter().find(|collection| collection.name == name)
}
