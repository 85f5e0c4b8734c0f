use serde::Serialize;

pub const ROLE_NAME: &str = "bedrock-kb-role";
pub const INLINE_POLICY_NAME: &str = "bedrock-kb-policy";
pub const COLLECTION_NAME: &str = "bedrock-kb-collection";
pub const BUCKET_NAME_PREFIX: &str = "bedrock-kb-documents-";

pub const ROLE_DESCRIPTION: &str = "Role for Bedrock Knowledge Base";
pub const COLLECTION_DESCRIPTION: &str = "Vector store for Bedrock Knowledge Base";

/// Names of every resource owned by one knowledge base deployment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceNames {
    pub role: String,
    pub inline_policy: String,
    pub collection: String,
    pub bucket: String,
}

impl ResourceNames {
    pub fn for_account(account_id: &str) -> Self {
        Self {
            role: ROLE_NAME.to_string(),
            inline_policy: INLINE_POLICY_NAME.to_string(),
            collection: COLLECTION_NAME.to_string(),
            bucket: bucket_name(account_id),
        }
    }
}

/// The account id is appended verbatim; bucket names are globally unique so
/// the account id is what keeps two deployments apart.
pub fn bucket_name(account_id: &str) -> String {
    format!("{BUCKET_NAME_PREFIX}{account_id}")
}
