#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::Mutex;

use kb_lifecycle_core::confirm::{is_affirmative, Confirmer};
use kb_lifecycle_core::error::ServiceError;
use kb_lifecycle_core::ports::{
    BucketService, CollectionService, CollectionSummary, IdentityService, RoleService, Services,
};
use kb_lifecycle_core::report::{MessageLevel, Reporter};

pub const ACCOUNT_ID: &str = "123456789012";

#[derive(Debug, Clone)]
struct FakeRole {
    arn: String,
    inline_policies: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct CloudState {
    account_id: Option<String>,
    roles: HashMap<String, FakeRole>,
    collections: Vec<CollectionSummary>,
    buckets: HashMap<String, usize>,
    calls: Vec<String>,
    failures: HashMap<&'static str, ServiceError>,
    next_collection: usize,
}

/// In-memory stand-in for the four cloud services that records every call
/// in order.
pub struct FakeCloud {
    state: Mutex<CloudState>,
}

impl FakeCloud {
    pub fn new(account_id: &str) -> Self {
        Self {
            state: Mutex::new(CloudState {
                account_id: Some(account_id.to_string()),
                ..CloudState::default()
            }),
        }
    }

    pub fn without_identity() -> Self {
        Self {
            state: Mutex::new(CloudState::default()),
        }
    }

    pub fn with_role(self, role_name: &str) -> Self {
        self.lock().roles.insert(
            role_name.to_string(),
            FakeRole {
                arn: format!("arn:aws:iam::{ACCOUNT_ID}:role/{role_name}"),
                inline_policies: BTreeMap::new(),
            },
        );
        self
    }

    pub fn with_inline_policy(self, role_name: &str, policy_name: &str) -> Self {
        self.lock()
            .roles
            .get_mut(role_name)
            .expect("role must be seeded before its policy")
            .inline_policies
            .insert(policy_name.to_string(), "{}".to_string());
        self
    }

    pub fn with_collection(self, id: &str, name: &str) -> Self {
        self.lock().collections.push(CollectionSummary {
            id: id.to_string(),
            name: name.to_string(),
            arn: format!("arn:aws:aoss:us-west-2:{ACCOUNT_ID}:collection/{id}"),
        });
        self
    }

    pub fn with_bucket(self, bucket: &str, objects: usize) -> Self {
        self.lock().buckets.insert(bucket.to_string(), objects);
        self
    }

    /// Makes every call of `operation` fail with `error`.
    pub fn failing(self, operation: &'static str, error: ServiceError) -> Self {
        self.lock().failures.insert(operation, error);
        self
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            identity: self,
            roles: self,
            collections: self,
            buckets: self,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn operations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.split(':').next().unwrap_or_default().to_string())
            .collect()
    }

    pub fn has_role(&self, role_name: &str) -> bool {
        self.lock().roles.contains_key(role_name)
    }

    pub fn role_policy(&self, role_name: &str, policy_name: &str) -> Option<String> {
        self.lock()
            .roles
            .get(role_name)
            .and_then(|role| role.inline_policies.get(policy_name).cloned())
    }

    pub fn collection_names(&self) -> Vec<String> {
        self.lock()
            .collections
            .iter()
            .map(|collection| collection.name.clone())
            .collect()
    }

    pub fn bucket_objects(&self, bucket: &str) -> Option<usize> {
        self.lock().buckets.get(bucket).copied()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CloudState> {
        self.state.lock().expect("poisoned mutex")
    }

    fn record(&self, operation: &'static str, target: &str) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.calls.push(format!("{operation}:{target}"));
        match state.failures.get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl IdentityService for FakeCloud {
    fn caller_account_id(&self) -> Result<String, ServiceError> {
        self.record("GetCallerIdentity", "")?;
        self.lock()
            .account_id
            .clone()
            .ok_or_else(|| ServiceError::other("GetCallerIdentity", "no credentials"))
    }
}

impl RoleService for FakeCloud {
    fn find_role(&self, role_name: &str) -> Result<Option<String>, ServiceError> {
        self.record("GetRole", role_name)?;
        Ok(self.lock().roles.get(role_name).map(|role| role.arn.clone()))
    }

    fn delete_inline_policy(
        &self,
        role_name: &str,
        policy_name: &str,
    ) -> Result<(), ServiceError> {
        self.record("DeleteRolePolicy", &format!("{role_name}/{policy_name}"))?;
        let mut state = self.lock();
        let removed = state
            .roles
            .get_mut(role_name)
            .and_then(|role| role.inline_policies.remove(policy_name));
        match removed {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found(
                "DeleteRolePolicy",
                format!("policy {policy_name} not attached to {role_name}"),
            )),
        }
    }

    fn delete_role(&self, role_name: &str) -> Result<(), ServiceError> {
        self.record("DeleteRole", role_name)?;
        let mut state = self.lock();
        let Some(role) = state.roles.get(role_name) else {
            return Err(ServiceError::not_found("DeleteRole", role_name));
        };
        if !role.inline_policies.is_empty() {
            return Err(ServiceError::other(
                "DeleteRole",
                "Cannot delete entity, must delete policies first.",
            ));
        }
        state.roles.remove(role_name);
        Ok(())
    }

    fn create_role(
        &self,
        role_name: &str,
        _trust_policy: &str,
        _description: &str,
    ) -> Result<String, ServiceError> {
        self.record("CreateRole", role_name)?;
        let mut state = self.lock();
        if state.roles.contains_key(role_name) {
            return Err(ServiceError::already_exists(
                "CreateRole",
                format!("Role with name {role_name} already exists."),
            ));
        }
        let arn = format!("arn:aws:iam::{ACCOUNT_ID}:role/{role_name}");
        state.roles.insert(
            role_name.to_string(),
            FakeRole {
                arn: arn.clone(),
                inline_policies: BTreeMap::new(),
            },
        );
        Ok(arn)
    }

    fn put_inline_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        policy_document: &str,
    ) -> Result<(), ServiceError> {
        self.record("PutRolePolicy", &format!("{role_name}/{policy_name}"))?;
        let mut state = self.lock();
        let role = state
            .roles
            .get_mut(role_name)
            .ok_or_else(|| ServiceError::not_found("PutRolePolicy", role_name))?;
        role.inline_policies
            .insert(policy_name.to_string(), policy_document.to_string());
        Ok(())
    }
}

impl CollectionService for FakeCloud {
    fn list_collections(&self, name: &str) -> Result<Vec<CollectionSummary>, ServiceError> {
        self.record("ListCollections", name)?;
        // Mimics a loose server-side filter so callers must match exactly.
        Ok(self
            .lock()
            .collections
            .iter()
            .filter(|collection| collection.name.starts_with(name))
            .cloned()
            .collect())
    }

    fn delete_collection(&self, collection_id: &str) -> Result<(), ServiceError> {
        self.record("DeleteCollection", collection_id)?;
        let mut state = self.lock();
        let before = state.collections.len();
        state
            .collections
            .retain(|collection| collection.id != collection_id);
        if state.collections.len() == before {
            return Err(ServiceError::not_found("DeleteCollection", collection_id));
        }
        Ok(())
    }

    fn create_collection(&self, name: &str, _description: &str) -> Result<String, ServiceError> {
        self.record("CreateCollection", name)?;
        let mut state = self.lock();
        if state.collections.iter().any(|collection| collection.name == name) {
            return Err(ServiceError::already_exists(
                "CreateCollection",
                format!("collection {name} already exists"),
            ));
        }
        state.next_collection += 1;
        let id = format!("generated{}", state.next_collection);
        let arn = format!("arn:aws:aoss:us-west-2:{ACCOUNT_ID}:collection/{id}");
        state.collections.push(CollectionSummary {
            id,
            name: name.to_string(),
            arn: arn.clone(),
        });
        Ok(arn)
    }
}

impl BucketService for FakeCloud {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, ServiceError> {
        self.record("HeadBucket", bucket)?;
        Ok(self.lock().buckets.contains_key(bucket))
    }

    fn delete_all_objects(&self, bucket: &str) -> Result<usize, ServiceError> {
        self.record("DeleteObjects", bucket)?;
        let mut state = self.lock();
        let objects = state
            .buckets
            .get_mut(bucket)
            .ok_or_else(|| ServiceError::not_found("ListObjectsV2", bucket))?;
        Ok(std::mem::take(objects))
    }

    fn delete_bucket(&self, bucket: &str) -> Result<(), ServiceError> {
        self.record("DeleteBucket", bucket)?;
        let mut state = self.lock();
        match state.buckets.get(bucket) {
            None => Err(ServiceError::not_found("DeleteBucket", bucket)),
            Some(0) => {
                state.buckets.remove(bucket);
                Ok(())
            }
            Some(_) => Err(ServiceError::other(
                "DeleteBucket",
                "The bucket you tried to delete is not empty",
            )),
        }
    }

    fn create_bucket(&self, bucket: &str) -> Result<(), ServiceError> {
        self.record("CreateBucket", bucket)?;
        let mut state = self.lock();
        if state.buckets.contains_key(bucket) {
            return Err(ServiceError::already_exists(
                "CreateBucket",
                "BucketAlreadyOwnedByYou",
            ));
        }
        state.buckets.insert(bucket.to_string(), 0);
        Ok(())
    }
}

/// Answers every confirmation with a fixed response line.
pub struct ScriptedConfirmer {
    response: String,
    pub questions: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn answering(response: &str) -> Self {
        Self {
            response: response.to_string(),
            questions: Vec::new(),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.questions.push(question.to_string());
        Ok(is_affirmative(&self.response))
    }
}

pub struct BrokenConfirmer;

impl Confirmer for BrokenConfirmer {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub messages: Vec<(MessageLevel, String)>,
}

impl RecordingReporter {
    pub fn texts(&self, level: MessageLevel) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(message_level, _)| *message_level == level)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn contains(&self, level: MessageLevel, needle: &str) -> bool {
        self.texts(level).iter().any(|text| text.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn message(&mut self, level: MessageLevel, text: &str) {
        self.messages.push((level, text.to_string()));
    }
}
